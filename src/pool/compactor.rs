/*!
 * Pool Compaction
 * Copying relocation of live blocks into the alternate arena
 */

use super::types::CompactionReport;
use super::ObjectPool;
use log::{debug, info};

impl ObjectPool {
    /// Copy every live block, in registry order, to the start of the other
    /// arena and make that arena current.
    ///
    /// Only gaps left by removed descriptors disappear. Reference counts are
    /// not inspected and no descriptor is removed or reordered.
    pub(super) fn compact(&mut self) -> CompactionReport {
        let previous_mark = self.high_water_mark;
        let mut cursor = 0;
        let mut moved_blocks = 0;

        for block in self.registry.iter_mut() {
            if block.offset != cursor {
                moved_blocks += 1;
            }
            self.arena.copy_to_other(block.range(), cursor);
            block.offset = cursor;
            cursor += block.size;
        }

        self.arena.swap();
        self.high_water_mark = cursor;

        let report = CompactionReport {
            moved_blocks,
            reclaimed_bytes: previous_mark - cursor,
            high_water_mark: cursor,
        };
        self.compactions += 1;
        self.bytes_reclaimed += report.reclaimed_bytes as u64;

        if report.reclaimed_bytes > 0 {
            info!(
                "Compaction complete: reclaimed {} bytes, moved {} of {} blocks, high-water mark {} -> {} (now on {:?} arena)",
                report.reclaimed_bytes,
                report.moved_blocks,
                self.registry.len(),
                previous_mark,
                cursor,
                self.arena.current_side()
            );
        } else {
            debug!(
                "Compaction found no gaps ({} blocks, high-water mark {})",
                self.registry.len(),
                cursor
            );
        }

        report
    }
}
