/*!
 * Pool Allocator Implementation
 * Tail placement with compaction on demand
 */

use super::types::{BlockDescriptor, Handle, PoolError, PoolPressure, PoolResult};
use super::ObjectPool;
use crate::core::limits::MIN_TAIL_SLACK;
use crate::core::types::Size;
use log::{debug, error, info, warn};

/// A request fits only if it leaves at least `MIN_TAIL_SLACK` bytes behind
#[inline]
fn fits(size: Size, remaining: Size) -> bool {
    remaining
        .checked_sub(size)
        .is_some_and(|left| left >= MIN_TAIL_SLACK)
}

impl ObjectPool {
    /// Reserve `size` zeroed bytes and return a handle with reference count 1.
    ///
    /// If the tail is too small, one compaction pass runs first. Returns
    /// `Ok(None)` when the request still does not fit; an exact fit is
    /// rejected because at least one byte of slack must remain. A failed
    /// insert issues no handle and adds no descriptor.
    ///
    /// # Errors
    /// `InvalidSize` for `size == 0`, `NotInitialized` after teardown,
    /// `HandlesExhausted` once every handle value has been issued.
    pub fn insert(&mut self, size: Size) -> PoolResult<Option<Handle>> {
        self.ensure_ready()?;
        if size == 0 {
            error!("Contract violation: insert of a zero-sized object");
            return Err(PoolError::InvalidSize { size });
        }

        if !fits(size, self.tail_capacity()) {
            debug!(
                "Tail has {} bytes, {} requested; compacting",
                self.tail_capacity(),
                size
            );
            self.compact();
        }

        if !fits(size, self.tail_capacity()) {
            warn!(
                "Insert of {} bytes failed: {} bytes free at tail after compaction ({} live / {} total)",
                size,
                self.tail_capacity(),
                self.registry.live_bytes(),
                self.capacity()
            );
            return Ok(None);
        }

        let handle = self.handles.issue()?;
        let offset = self.high_water_mark;
        let block = BlockDescriptor::new(handle, offset, size);
        self.arena.zero(block.range());
        self.registry.push(block);
        self.high_water_mark += size;

        match self.check_pressure() {
            Some(level) if level >= PoolPressure::High => warn!(
                "Pool pressure {}: inserted {} bytes at offset {} as handle {} ({:.1}% used: {} / {})",
                level,
                size,
                offset,
                handle,
                self.usage_ratio() * 100.0,
                self.high_water_mark,
                self.capacity()
            ),
            _ => info!(
                "Inserted {} bytes at offset {} as handle {}",
                size, offset, handle
            ),
        }

        Ok(Some(handle))
    }

    /// High-water mark as a fraction of capacity
    pub(super) fn usage_ratio(&self) -> f64 {
        if self.capacity() == 0 {
            return 1.0;
        }
        self.high_water_mark as f64 / self.capacity() as f64
    }

    /// Check pool pressure level; `None` below the medium threshold
    pub(super) fn check_pressure(&self) -> Option<PoolPressure> {
        match PoolPressure::from_ratio(
            self.usage_ratio(),
            self.warning_threshold,
            self.critical_threshold,
        ) {
            PoolPressure::Low => None,
            level => Some(level),
        }
    }
}
