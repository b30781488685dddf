/*!
 * Pool Traits
 * Object pool abstractions
 */

use super::types::*;
use crate::core::types::{RefCount, Size};

/// Handle-based object storage
pub trait ObjectStore {
    /// Reserve `size` zeroed bytes; `Ok(None)` when the pool is full even after compaction
    fn insert(&mut self, size: Size) -> PoolResult<Option<Handle>>;

    /// Bytes of a live object; `Ok(None)` once it has been removed
    fn retrieve(&self, handle: Handle) -> PoolResult<Option<&[u8]>>;

    /// Mutable bytes of a live object
    fn retrieve_mut(&mut self, handle: Handle) -> PoolResult<Option<&mut [u8]>>;
}

/// Explicit reference counting
pub trait ReferenceCounter {
    /// Add a reference; returns the new count, or `None` for a removed object
    fn add_reference(&mut self, handle: Handle) -> PoolResult<Option<RefCount>>;

    /// Drop a reference, removing the object when the last one goes
    fn drop_reference(&mut self, handle: Handle) -> PoolResult<DropOutcome>;
}

/// Pool statistics provider
pub trait PoolInfo {
    /// Get overall pool statistics
    fn stats(&self) -> PoolStats;

    /// Get pressure level against the configured thresholds
    fn pressure(&self) -> PoolPressure {
        self.stats().pressure
    }
}
