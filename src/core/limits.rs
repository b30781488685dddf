/*!
 * Pool Limits and Constants
 *
 * Centralized location for pool-wide defaults and sentinel values.
 */

use super::types::{RawHandle, Size};

// =============================================================================
// CAPACITY
// =============================================================================

/// Default arena capacity (1MB)
/// Both arenas are allocated at this size, so a pool reserves twice this amount
pub const DEFAULT_POOL_CAPACITY: Size = 1024 * 1024;

/// Minimum tail slack that must remain after a placement.
/// An insert succeeds only if `size < remaining`, so an exact fit is rejected.
pub const MIN_TAIL_SLACK: Size = 1;

// =============================================================================
// HANDLES
// =============================================================================

/// Raw value reserved for "no object"
pub const NULL_HANDLE: RawHandle = 0;

/// First handle issued by a freshly initialized pool
pub const FIRST_HANDLE: RawHandle = 1;

// =============================================================================
// PRESSURE THRESHOLDS
// =============================================================================

/// Usage ratio at which inserts start logging pressure warnings
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.80;

/// Usage ratio reported as critical pressure
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.95;

/// Usage ratio reported as medium pressure (stats only, never logged)
pub const MEDIUM_PRESSURE_THRESHOLD: f64 = 0.60;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Convert bytes to KB
#[inline]
pub const fn bytes_to_kb(bytes: Size) -> Size {
    bytes / 1024
}
