/*!
 * Pool Storage Operations
 * Byte access to live objects in the current arena
 */

use super::types::{Handle, PoolResult};
use super::ObjectPool;

impl ObjectPool {
    /// Bytes of a live object.
    ///
    /// The slice borrows the pool, so it cannot be held across an `insert`
    /// (which may relocate every object). Returns `Ok(None)` when the handle
    /// was issued but its object has been removed.
    ///
    /// # Errors
    /// `UnissuedHandle` for a handle this pool never issued.
    pub fn retrieve(&self, handle: Handle) -> PoolResult<Option<&[u8]>> {
        self.ensure_ready()?;
        self.handles.check_issued(handle)?;

        Ok(self
            .registry
            .get(handle)
            .map(|block| self.arena.slice(block.range())))
    }

    /// Mutable bytes of a live object
    pub fn retrieve_mut(&mut self, handle: Handle) -> PoolResult<Option<&mut [u8]>> {
        self.ensure_ready()?;
        self.handles.check_issued(handle)?;

        match self.registry.get(handle).map(|block| block.range()) {
            Some(range) => Ok(Some(self.arena.slice_mut(range))),
            None => Ok(None),
        }
    }
}
