/*!
 * Pool Diagnostics
 * Dump, statistics, snapshots and invariant checks
 */

use super::types::{
    BlockDescriptor, PoolError, PoolPressure, PoolResult, PoolSnapshot, PoolStats,
};
use super::ObjectPool;
use log::error;
use std::io::{self, Write};

impl ObjectPool {
    /// Live descriptors in sequence order
    pub fn descriptors(&self) -> impl Iterator<Item = &BlockDescriptor> + '_ {
        self.registry.iter()
    }

    /// Write one line per live descriptor, in sequence order
    pub fn dump_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for block in self.registry.iter() {
            writeln!(out, "{}", block)?;
        }
        Ok(())
    }

    /// Print every live descriptor to stdout
    pub fn dump(&self) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        if let Err(e) = self.dump_to(&mut lock) {
            error!("Failed to write pool dump: {}", e);
        }
    }

    pub fn stats(&self) -> PoolStats {
        let live_bytes = self.registry.live_bytes();
        PoolStats {
            capacity: self.capacity(),
            high_water_mark: self.high_water_mark,
            live_bytes,
            fragmented_bytes: self.high_water_mark.saturating_sub(live_bytes),
            available_bytes: self.tail_capacity(),
            live_blocks: self.registry.len(),
            handles_issued: self.handles.issued(),
            compactions: self.compactions,
            bytes_reclaimed: self.bytes_reclaimed,
            usage_percentage: self.usage_ratio() * 100.0,
            pressure: self.pressure(),
        }
    }

    /// Pressure level against this pool's configured thresholds
    pub fn pressure(&self) -> PoolPressure {
        self.check_pressure().unwrap_or(PoolPressure::Low)
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            status: self.status,
            stats: self.stats(),
            blocks: self.registry.iter().cloned().collect(),
        }
    }

    /// Check every structural invariant of the pool.
    ///
    /// - high-water mark within capacity
    /// - every block non-empty, referenced, and below the high-water mark
    /// - blocks laid out in increasing, non-overlapping order
    /// - handles strictly increasing and already issued
    pub fn verify_integrity(&self) -> PoolResult<()> {
        let corrupt = |msg: String| -> PoolResult<()> {
            error!("Pool corruption detected: {}", msg);
            Err(PoolError::CorruptionDetected(msg))
        };

        if self.high_water_mark > self.capacity() {
            return corrupt(format!(
                "high-water mark {} exceeds capacity {}",
                self.high_water_mark,
                self.capacity()
            ));
        }

        let mut previous: Option<&BlockDescriptor> = None;
        for block in self.registry.iter() {
            if block.size == 0 || block.ref_count == 0 {
                return corrupt(format!(
                    "handle {} has size {} and {} references",
                    block.handle, block.size, block.ref_count
                ));
            }
            if block.end() > self.high_water_mark {
                return corrupt(format!(
                    "handle {} ends at {} past high-water mark {}",
                    block.handle,
                    block.end(),
                    self.high_water_mark
                ));
            }
            if block.handle.raw() >= self.handles.peek() {
                return corrupt(format!("handle {} was never issued", block.handle));
            }
            if let Some(prev) = previous {
                if block.handle <= prev.handle {
                    return corrupt(format!(
                        "handle {} follows handle {}",
                        block.handle, prev.handle
                    ));
                }
                if block.offset < prev.end() {
                    return corrupt(format!(
                        "handle {} at {} overlaps handle {} ending at {}",
                        block.handle,
                        block.offset,
                        prev.handle,
                        prev.end()
                    ));
                }
            }
            previous = Some(block);
        }

        Ok(())
    }
}
