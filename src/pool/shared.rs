/*!
 * Shared Pool
 * One external lock around one pool instance
 */

use super::types::{DropOutcome, Handle, PoolResult, PoolStats};
use super::ObjectPool;
use crate::config::PoolConfig;
use crate::core::types::{RefCount, Size};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a pool guarded by a single mutex.
///
/// Every call holds the lock for the whole operation, including any
/// compaction an insert triggers. Object bytes are only reachable inside
/// [`SharedPool::with`] / [`SharedPool::read`], so no slice outlives the lock.
#[derive(Debug, Clone)]
pub struct SharedPool {
    inner: Arc<Mutex<ObjectPool>>,
}

impl SharedPool {
    pub fn new(config: &PoolConfig) -> Self {
        Self::from_pool(ObjectPool::new(config))
    }

    pub fn from_pool(pool: ObjectPool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Run `f` with exclusive access to the pool
    pub fn with<R>(&self, f: impl FnOnce(&mut ObjectPool) -> R) -> R {
        let mut pool = self.inner.lock();
        f(&mut pool)
    }

    /// Copy-free read of one object's bytes under the lock
    pub fn read<R>(&self, handle: Handle, f: impl FnOnce(&[u8]) -> R) -> PoolResult<Option<R>> {
        let pool = self.inner.lock();
        Ok(pool.retrieve(handle)?.map(f))
    }

    pub fn insert(&self, size: Size) -> PoolResult<Option<Handle>> {
        self.inner.lock().insert(size)
    }

    pub fn add_reference(&self, handle: Handle) -> PoolResult<Option<RefCount>> {
        self.inner.lock().add_reference(handle)
    }

    pub fn drop_reference(&self, handle: Handle) -> PoolResult<DropOutcome> {
        self.inner.lock().drop_reference(handle)
    }

    pub fn stats(&self) -> PoolStats {
        self.inner.lock().stats()
    }
}
