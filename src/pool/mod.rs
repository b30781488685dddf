/*!
 * Object Pool
 *
 * Fixed-capacity pool that hands out reference-counted handles to
 * variable-sized objects and relocates live objects to remove fragmentation.
 *
 * ## Layout
 *
 * - **Buffer arena**: two byte regions of equal capacity, one current
 * - **Block registry**: live descriptors in insertion order
 * - **Reference allocator**: strictly increasing handles, never reused
 * - **Compactor**: copies live blocks into the other region when the tail
 *   of the current region is too small for a request, then swaps regions
 *
 * ## Reclamation
 *
 * Dropping the last reference removes the descriptor but leaves its bytes
 * in place. Space comes back only when an insert finds the tail too small
 * and compaction runs. Slices returned by `retrieve` borrow the pool, so
 * they cannot outlive the next `insert`.
 *
 * The pool is single-threaded: every mutating operation takes `&mut self`.
 * Use [`SharedPool`] to put one pool behind an external lock.
 */

mod allocator;
mod arena;
mod compactor;
mod diagnostics;
mod handles;
mod lifecycle;
mod refcount;
mod registry;
mod shared;
mod storage;
pub mod traits;
pub mod types;

pub use shared::SharedPool;
pub use traits::{ObjectStore, PoolInfo, ReferenceCounter};
pub use types::{
    BlockDescriptor, CompactionReport, DropOutcome, Handle, PoolError, PoolPressure, PoolResult,
    PoolSnapshot, PoolStats, PoolStatus,
};

use crate::config::PoolConfig;
use crate::core::limits::bytes_to_kb;
use crate::core::types::{Offset, RawHandle, RefCount, Size};
use arena::BufferArena;
use handles::HandleAllocator;
use log::info;
use registry::BlockRegistry;

/// Compacting object pool
#[derive(Debug)]
pub struct ObjectPool {
    arena: BufferArena,
    registry: BlockRegistry,
    handles: HandleAllocator,
    high_water_mark: Offset,
    status: PoolStatus,
    // Pressure thresholds (usage ratio)
    warning_threshold: f64,
    critical_threshold: f64,
    // Lifetime counters, reset by initialize()
    compactions: u64,
    bytes_reclaimed: u64,
}

impl ObjectPool {
    /// Create an initialized, empty pool
    pub fn new(config: &PoolConfig) -> Self {
        info!(
            "Object pool initialized with 2 x {} bytes ({} KB per arena)",
            config.capacity,
            bytes_to_kb(config.capacity)
        );
        Self {
            arena: BufferArena::new(config.capacity),
            registry: BlockRegistry::new(),
            handles: HandleAllocator::new(),
            high_water_mark: 0,
            status: PoolStatus::Ready,
            warning_threshold: config.warning_threshold,
            critical_threshold: config.critical_threshold,
            compactions: 0,
            bytes_reclaimed: 0,
        }
    }

    /// Create a pool with default thresholds (useful for testing)
    pub fn with_capacity(capacity: Size) -> Self {
        Self::new(&PoolConfig::default().with_capacity(capacity))
    }

    #[inline]
    pub fn capacity(&self) -> Size {
        self.arena.capacity()
    }

    #[inline]
    pub fn high_water_mark(&self) -> Offset {
        self.high_water_mark
    }

    #[inline]
    pub fn status(&self) -> PoolStatus {
        self.status
    }

    /// Number of live objects
    #[inline]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Raw value of the next handle `insert` will issue
    #[inline]
    pub fn next_handle(&self) -> RawHandle {
        self.handles.peek()
    }

    /// Bytes available at the tail without compacting
    #[inline]
    pub fn tail_capacity(&self) -> Size {
        self.capacity() - self.high_water_mark
    }

    /// Current reference count of a live object
    pub fn ref_count(&self, handle: Handle) -> PoolResult<Option<RefCount>> {
        self.ensure_ready()?;
        self.handles.check_issued(handle)?;
        Ok(self.registry.get(handle).map(|block| block.ref_count))
    }

    fn ensure_ready(&self) -> PoolResult<()> {
        match self.status {
            PoolStatus::Ready => Ok(()),
            PoolStatus::TornDown => {
                log::error!("Contract violation: pool used after teardown");
                Err(PoolError::NotInitialized)
            }
        }
    }
}

impl Default for ObjectPool {
    fn default() -> Self {
        Self::new(&PoolConfig::default())
    }
}

// Implement trait interfaces
impl ObjectStore for ObjectPool {
    fn insert(&mut self, size: Size) -> PoolResult<Option<Handle>> {
        ObjectPool::insert(self, size)
    }

    fn retrieve(&self, handle: Handle) -> PoolResult<Option<&[u8]>> {
        ObjectPool::retrieve(self, handle)
    }

    fn retrieve_mut(&mut self, handle: Handle) -> PoolResult<Option<&mut [u8]>> {
        ObjectPool::retrieve_mut(self, handle)
    }
}

impl ReferenceCounter for ObjectPool {
    fn add_reference(&mut self, handle: Handle) -> PoolResult<Option<RefCount>> {
        ObjectPool::add_reference(self, handle)
    }

    fn drop_reference(&mut self, handle: Handle) -> PoolResult<DropOutcome> {
        ObjectPool::drop_reference(self, handle)
    }
}

impl PoolInfo for ObjectPool {
    fn stats(&self) -> PoolStats {
        ObjectPool::stats(self)
    }
}
