/*!
 * Compacting Pool Library
 *
 * Fixed-capacity object pool with reference-counted handles and
 * copying compaction.
 */

pub mod config;
pub mod core;
pub mod logging;
pub mod pool;
pub mod script;

// Re-exports
pub use config::{ConfigError, PoolConfig};
pub use crate::core::limits::{DEFAULT_POOL_CAPACITY, NULL_HANDLE};
pub use logging::init_tracing;
pub use pool::{
    BlockDescriptor, CompactionReport, DropOutcome, Handle, ObjectPool, ObjectStore, PoolError,
    PoolInfo, PoolPressure, PoolResult, PoolSnapshot, PoolStats, PoolStatus, ReferenceCounter,
    SharedPool,
};
pub use script::{parse_script, Command, Outcome, ScriptError, Session};
