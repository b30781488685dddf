/*!
 * Reference Counting Tests
 * add / drop lifecycle and stale handle policy
 */

use compacting_pool::{DropOutcome, Handle, ObjectPool, PoolError};
use pretty_assertions::assert_eq;

#[test]
fn test_insert_starts_with_one_reference() {
    let mut pool = ObjectPool::with_capacity(100);
    let h = pool.insert(10).unwrap().unwrap();
    assert_eq!(pool.ref_count(h).unwrap(), Some(1));
}

#[test]
fn test_add_then_drop_keeps_object() {
    let mut pool = ObjectPool::with_capacity(100);
    let h = pool.insert(10).unwrap().unwrap();

    assert_eq!(pool.add_reference(h).unwrap(), Some(2));
    assert_eq!(
        pool.drop_reference(h).unwrap(),
        DropOutcome::Released { remaining: 1 }
    );
    assert!(pool.retrieve(h).unwrap().is_some());
}

#[test]
fn test_full_lifecycle_removes_object() {
    let mut pool = ObjectPool::with_capacity(100);
    let h = pool.insert(10).unwrap().unwrap();

    // 1 -> 2 -> 1 -> 0
    pool.add_reference(h).unwrap();
    pool.drop_reference(h).unwrap();
    assert_eq!(
        pool.drop_reference(h).unwrap(),
        DropOutcome::Removed { size: 10 }
    );

    assert_eq!(pool.retrieve(h).unwrap(), None);
    assert_eq!(pool.ref_count(h).unwrap(), None);
    assert!(pool.is_empty());
}

#[test]
fn test_removal_does_not_move_bytes() {
    let mut pool = ObjectPool::with_capacity(100);
    let a = pool.insert(10).unwrap().unwrap();
    let b = pool.insert(10).unwrap().unwrap();
    pool.retrieve_mut(b).unwrap().unwrap().fill(3);

    pool.drop_reference(a).unwrap();

    // Lazy reclamation: the gap stays until the next compaction
    assert_eq!(pool.high_water_mark(), 20);
    assert_eq!(pool.descriptors().next().map(|d| d.offset), Some(10));
    assert_eq!(pool.stats().fragmented_bytes, 10);
    assert_eq!(pool.retrieve(b).unwrap().unwrap(), &[3u8; 10]);
}

#[test]
fn test_stale_handle_is_noop() {
    let mut pool = ObjectPool::with_capacity(100);
    let a = pool.insert(10).unwrap().unwrap();
    let b = pool.insert(10).unwrap().unwrap();
    pool.drop_reference(a).unwrap();

    assert_eq!(pool.add_reference(a).unwrap(), None);
    assert_eq!(pool.drop_reference(a).unwrap(), DropOutcome::NotFound);

    // Other objects untouched
    assert_eq!(pool.ref_count(b).unwrap(), Some(1));
    assert_eq!(pool.len(), 1);
}

#[test]
fn test_drop_middle_keeps_order() {
    let mut pool = ObjectPool::with_capacity(100);
    let handles: Vec<_> = (0..4).map(|_| pool.insert(5).unwrap().unwrap()).collect();

    pool.drop_reference(handles[1]).unwrap();
    pool.drop_reference(handles[3]).unwrap();

    let live: Vec<_> = pool.descriptors().map(|d| d.handle).collect();
    assert_eq!(live, vec![handles[0], handles[2]]);
    assert!(pool.verify_integrity().is_ok());
}

#[test]
fn test_unissued_handle_rejected_by_add_and_drop() {
    let mut pool = ObjectPool::with_capacity(100);
    let a = pool.insert(10).unwrap().unwrap();
    pool.insert(20).unwrap().unwrap();
    let before = pool.snapshot();

    let next = pool.next_handle();
    let future = Handle::from_raw(next).unwrap();
    assert_eq!(
        pool.add_reference(future),
        Err(PoolError::UnissuedHandle { handle: next, next })
    );
    assert_eq!(
        pool.drop_reference(future),
        Err(PoolError::UnissuedHandle { handle: next, next })
    );

    // Neither call touched the pool
    assert_eq!(pool.snapshot(), before);
    assert_eq!(pool.next_handle(), next);
    assert_eq!(pool.ref_count(a).unwrap(), Some(1));
}

#[test]
fn test_unissued_differs_from_removed() {
    let mut pool = ObjectPool::with_capacity(100);
    let a = pool.insert(10).unwrap().unwrap();
    pool.drop_reference(a).unwrap();

    // Removed: expected failure
    assert_eq!(pool.drop_reference(a), Ok(DropOutcome::NotFound));
    // Never issued: contract violation
    let future = Handle::from_raw(pool.next_handle() + 3).unwrap();
    assert!(matches!(
        pool.drop_reference(future),
        Err(PoolError::UnissuedHandle { .. })
    ));
}
