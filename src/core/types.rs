/*!
 * Core Types
 * Common types used across the pool
 */

/// Size type for pool operations (bytes)
pub type Size = usize;

/// Byte offset into the current arena
pub type Offset = usize;

/// Raw handle value as seen by callers and diagnostics
pub type RawHandle = u64;

/// Number of outstanding references to one object
pub type RefCount = usize;
