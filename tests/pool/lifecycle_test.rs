/*!
 * Pool Lifecycle Tests
 * initialize / teardown contract and handle counter reset
 */

use compacting_pool::{ObjectPool, PoolConfig, PoolError, PoolStatus};
use pretty_assertions::assert_eq;

#[test]
fn test_new_pool_is_empty() {
    let pool = ObjectPool::with_capacity(100);
    assert_eq!(pool.status(), PoolStatus::Ready);
    assert_eq!(pool.capacity(), 100);
    assert_eq!(pool.high_water_mark(), 0);
    assert_eq!(pool.next_handle(), 1);
    assert!(pool.is_empty());
}

#[test]
fn test_pool_from_config() {
    let config = PoolConfig::default().with_capacity(4096);
    let pool = ObjectPool::new(&config);
    assert_eq!(pool.capacity(), 4096);
    assert_eq!(pool.tail_capacity(), 4096);
}

#[test]
fn test_initialize_is_idempotent() {
    let mut pool = ObjectPool::with_capacity(100);
    pool.insert(10).unwrap();
    pool.initialize();
    pool.initialize();

    assert!(pool.is_empty());
    assert_eq!(pool.high_water_mark(), 0);
    assert_eq!(pool.next_handle(), 1);
    assert_eq!(pool.stats().compactions, 0);
}

#[test]
fn test_teardown_requires_live_objects() {
    let mut pool = ObjectPool::with_capacity(100);
    assert_eq!(pool.teardown(), Err(PoolError::EmptyTeardown));
    // Rejected teardown leaves the pool usable
    assert_eq!(pool.status(), PoolStatus::Ready);
    assert!(pool.insert(10).unwrap().is_some());
}

#[test]
fn test_teardown_after_all_dropped_is_rejected() {
    let mut pool = ObjectPool::with_capacity(100);
    let h = pool.insert(10).unwrap().unwrap();
    pool.drop_reference(h).unwrap();
    assert_eq!(pool.teardown(), Err(PoolError::EmptyTeardown));
}

#[test]
fn test_operations_after_teardown_fail_until_initialize() {
    let mut pool = ObjectPool::with_capacity(100);
    let h = pool.insert(10).unwrap().unwrap();
    pool.teardown().unwrap();

    assert_eq!(pool.status(), PoolStatus::TornDown);
    assert!(pool.is_empty());
    assert_eq!(pool.insert(10), Err(PoolError::NotInitialized));
    assert_eq!(pool.retrieve(h), Err(PoolError::NotInitialized));
    assert_eq!(pool.add_reference(h), Err(PoolError::NotInitialized));
    assert_eq!(pool.drop_reference(h), Err(PoolError::NotInitialized));
    assert_eq!(pool.teardown(), Err(PoolError::NotInitialized));

    pool.initialize();
    assert_eq!(pool.status(), PoolStatus::Ready);
    assert_eq!(pool.insert(10).unwrap().map(|h| h.raw()), Some(1));
}

#[test]
fn test_teardown_resets_handle_counter() {
    let mut pool = ObjectPool::with_capacity(100);
    pool.insert(10).unwrap();
    pool.insert(10).unwrap();
    pool.insert(10).unwrap();
    assert_eq!(pool.next_handle(), 4);

    pool.teardown().unwrap();
    pool.initialize();

    let h = pool.insert(10).unwrap().unwrap();
    assert_eq!(h.raw(), 1);
}

#[test]
fn test_errors_are_contract_violations() {
    let mut pool = ObjectPool::with_capacity(10);
    let err = pool.teardown().unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(err.to_string(), "Cannot tear down an empty pool");
}
