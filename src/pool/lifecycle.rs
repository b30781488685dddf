/*!
 * Pool Lifecycle
 * Initialization and teardown
 */

use super::types::{PoolError, PoolResult, PoolStatus};
use super::ObjectPool;
use log::{error, info};

impl ObjectPool {
    /// Reset the pool to empty: no descriptors, high-water mark 0, next handle 1.
    ///
    /// Idempotent. This is the only way to use a pool again after `teardown`.
    pub fn initialize(&mut self) {
        self.registry.clear();
        self.handles.reset();
        self.arena.reset();
        self.high_water_mark = 0;
        self.compactions = 0;
        self.bytes_reclaimed = 0;
        self.status = PoolStatus::Ready;
        info!("Object pool initialized ({} bytes per arena)", self.capacity());
    }

    /// Release every descriptor and reset all counters.
    ///
    /// # Errors
    /// `EmptyTeardown` when no object is live, `NotInitialized` when the
    /// pool was already torn down. Neither changes any state.
    pub fn teardown(&mut self) -> PoolResult<()> {
        self.ensure_ready()?;
        if self.registry.is_empty() {
            error!("Contract violation: teardown of an empty pool");
            return Err(PoolError::EmptyTeardown);
        }

        let released = self.registry.len();
        self.registry.clear();
        self.handles.reset();
        self.high_water_mark = 0;
        self.status = PoolStatus::TornDown;
        info!("Object pool torn down, released {} objects", released);
        Ok(())
    }
}
