/*!
 * Reference Counting
 * Explicit add/drop of object references
 */

use super::types::{DropOutcome, Handle, PoolError, PoolResult};
use super::ObjectPool;
use crate::core::types::RefCount;
use log::{debug, error, info, warn};

impl ObjectPool {
    /// Add one reference to a live object and return the new count.
    ///
    /// A handle whose object was already removed is a no-op returning
    /// `Ok(None)`; it is logged because it usually means the caller kept a
    /// handle past its last `drop_reference`.
    pub fn add_reference(&mut self, handle: Handle) -> PoolResult<Option<RefCount>> {
        self.ensure_ready()?;
        self.handles.check_issued(handle)?;

        let Some(index) = self.registry.position(handle) else {
            warn!("add_reference on removed handle {} ignored", handle);
            return Ok(None);
        };

        let block = self.registry.at_mut(index);
        block.ref_count = block.ref_count.checked_add(1).ok_or_else(|| {
            error!("Contract violation: reference count overflow on handle {}", handle);
            PoolError::RefCountOverflow {
                handle: handle.raw(),
            }
        })?;

        debug!("Handle {} now has {} references", handle, block.ref_count);
        Ok(Some(block.ref_count))
    }

    /// Drop one reference.
    ///
    /// When the count is 1 the descriptor is excised in one step and its
    /// bytes become a gap until the next compaction. Otherwise the count is
    /// decremented. A removed handle is a no-op reported as
    /// [`DropOutcome::NotFound`].
    pub fn drop_reference(&mut self, handle: Handle) -> PoolResult<DropOutcome> {
        self.ensure_ready()?;
        self.handles.check_issued(handle)?;

        let Some(index) = self.registry.position(handle) else {
            warn!("drop_reference on removed handle {} ignored", handle);
            return Ok(DropOutcome::NotFound);
        };

        let block = self.registry.at_mut(index);
        if block.ref_count == 1 {
            let removed = self.registry.remove(index);
            info!(
                "Removed handle {} ({} bytes at offset {}); {} bytes fragmented until next compaction",
                handle,
                removed.size,
                removed.offset,
                self.high_water_mark - self.registry.live_bytes()
            );
            return Ok(DropOutcome::Removed { size: removed.size });
        }

        block.ref_count -= 1;
        debug!("Handle {} now has {} references", handle, block.ref_count);
        Ok(DropOutcome::Released {
            remaining: block.ref_count,
        })
    }
}
