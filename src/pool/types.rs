/*!
 * Pool Types
 * Handles, descriptors, errors and statistics for the object pool
 */

use crate::core::limits::MEDIUM_PRESSURE_THRESHOLD;
use crate::core::types::{Offset, RawHandle, RefCount, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use thiserror::Error;

/// Pool operation result
pub type PoolResult<T> = Result<T, PoolError>;

/// Caller contract violations.
///
/// Expected failures (capacity exhaustion, stale handles) never show up here;
/// they are reported through `Option` / [`DropOutcome::NotFound`].
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum PoolError {
    #[error("Invalid object size: {size} bytes (objects must be at least 1 byte)")]
    #[diagnostic(
        code(pool::invalid_size),
        help("Request a positive number of bytes.")
    )]
    InvalidSize { size: Size },

    #[error("Handle {handle} has not been issued yet (next handle is {next})")]
    #[diagnostic(
        code(pool::unissued_handle),
        help("Only handles returned by insert() on this pool are valid. The handle may belong to another pool or to a pool that was re-initialized.")
    )]
    UnissuedHandle { handle: RawHandle, next: RawHandle },

    #[error("Cannot tear down an empty pool")]
    #[diagnostic(
        code(pool::empty_teardown),
        help("Teardown requires at least one live object. Call initialize() to reset an empty pool.")
    )]
    EmptyTeardown,

    #[error("Pool is not initialized")]
    #[diagnostic(
        code(pool::not_initialized),
        help("The pool was torn down. Call initialize() before using it again.")
    )]
    NotInitialized,

    #[error("Handle space exhausted (last handle {last})")]
    #[diagnostic(
        code(pool::handles_exhausted),
        help("Handles are never reused. Call initialize() to start a new handle sequence.")
    )]
    HandlesExhausted { last: RawHandle },

    #[error("Reference count overflow on handle {handle}")]
    #[diagnostic(code(pool::refcount_overflow))]
    RefCountOverflow { handle: RawHandle },

    #[error("Pool corruption detected: {0}")]
    #[diagnostic(
        code(pool::corruption),
        help("An internal invariant no longer holds. This is a bug in the pool.")
    )]
    CorruptionDetected(String),
}

impl PoolError {
    /// Every pool error is a caller or internal contract violation
    pub fn is_contract_violation(&self) -> bool {
        true
    }
}

/// Opaque identifier for a live object.
///
/// Handles are issued in strictly increasing order starting at 1 and are
/// never reused within a pool's lifetime. Raw value 0 is the null handle and
/// is represented by `Option<Handle>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(NonZeroU64);

impl Handle {
    /// Wrap a raw value; returns `None` for the null handle
    #[inline]
    pub fn from_raw(raw: RawHandle) -> Option<Self> {
        NonZeroU64::new(raw).map(Handle)
    }

    #[inline]
    pub(crate) fn from_non_zero(raw: NonZeroU64) -> Self {
        Handle(raw)
    }

    #[inline]
    pub fn raw(self) -> RawHandle {
        self.0.get()
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata for one allocated object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    pub handle: Handle,
    pub offset: Offset,
    pub size: Size,
    pub ref_count: RefCount,
}

impl BlockDescriptor {
    pub fn new(handle: Handle, offset: Offset, size: Size) -> Self {
        Self {
            handle,
            offset,
            size,
            ref_count: 1,
        }
    }

    /// One-past-the-end offset of this block
    #[inline]
    pub fn end(&self) -> Offset {
        self.offset + self.size
    }

    #[inline]
    pub fn range(&self) -> std::ops::Range<Offset> {
        self.offset..self.end()
    }
}

/// Dump line format
impl std::fmt::Display for BlockDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "reference id = {}, start address = {}, size = {}",
            self.handle, self.offset, self.size
        )
    }
}

/// Result of dropping one reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    /// Count decremented, object still live
    Released { remaining: RefCount },
    /// Last reference dropped, descriptor excised; its bytes are a gap until the next compaction
    Removed { size: Size },
    /// Handle was issued but its object is already gone
    NotFound,
}

/// Lifecycle status of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolStatus {
    Ready,
    TornDown,
}

impl std::fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PoolStatus::Ready => write!(f, "READY"),
            PoolStatus::TornDown => write!(f, "TORN_DOWN"),
        }
    }
}

/// Summary of one compaction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionReport {
    pub moved_blocks: usize,
    pub reclaimed_bytes: Size,
    pub high_water_mark: Offset,
}

/// Pool statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    pub capacity: Size,
    pub high_water_mark: Offset,
    pub live_bytes: Size,
    /// Bytes below the high-water mark that belong to removed objects
    pub fragmented_bytes: Size,
    /// Tail bytes above the high-water mark
    pub available_bytes: Size,
    pub live_blocks: usize,
    pub handles_issued: u64,
    pub compactions: u64,
    pub bytes_reclaimed: u64,
    pub usage_percentage: f64,
    /// Level against the pool's configured thresholds
    pub pressure: PoolPressure,
}

/// Pool pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoolPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl PoolPressure {
    pub fn from_ratio(ratio: f64, warning: f64, critical: f64) -> Self {
        if ratio >= critical {
            PoolPressure::Critical
        } else if ratio >= warning {
            PoolPressure::High
        } else if ratio >= MEDIUM_PRESSURE_THRESHOLD {
            PoolPressure::Medium
        } else {
            PoolPressure::Low
        }
    }
}

impl std::fmt::Display for PoolPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PoolPressure::Low => write!(f, "LOW"),
            PoolPressure::Medium => write!(f, "MEDIUM"),
            PoolPressure::High => write!(f, "HIGH"),
            PoolPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Serializable point-in-time view of a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub status: PoolStatus,
    pub stats: PoolStats,
    pub blocks: Vec<BlockDescriptor>,
}
