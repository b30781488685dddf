/*!
 * Shared Pool Tests
 * External locking around one pool instance
 */

use compacting_pool::{DropOutcome, PoolConfig, SharedPool};
use std::thread;

#[test]
fn test_shared_pool_from_many_threads() {
    let pool = SharedPool::new(&PoolConfig::default().with_capacity(64 * 1024));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let pool = pool.clone();
            thread::spawn(move || {
                let mut handles = Vec::new();
                for _ in 0..100 {
                    if let Some(h) = pool.insert(16).unwrap() {
                        handles.push(h);
                    }
                }
                handles
            })
        })
        .collect();

    let mut all: Vec<_> = workers
        .into_iter()
        .flat_map(|w| w.join().unwrap())
        .collect();
    assert_eq!(all.len(), 400);

    // Handles are unique across threads
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 400);

    let stats = pool.stats();
    assert_eq!(stats.live_blocks, 400);
    assert_eq!(stats.live_bytes, 400 * 16);
    assert!(pool.with(|p| p.verify_integrity()).is_ok());
}

#[test]
fn test_shared_pool_read_and_refcount() {
    let pool = SharedPool::new(&PoolConfig::default().with_capacity(128));
    let h = pool.insert(8).unwrap().unwrap();

    pool.with(|p| p.retrieve_mut(h).unwrap().unwrap().fill(9));
    let sum = pool.read(h, |bytes| bytes.iter().map(|&b| b as u32).sum::<u32>());
    assert_eq!(sum.unwrap(), Some(72));

    assert_eq!(pool.add_reference(h).unwrap(), Some(2));
    assert_eq!(
        pool.drop_reference(h).unwrap(),
        DropOutcome::Released { remaining: 1 }
    );
    assert_eq!(
        pool.drop_reference(h).unwrap(),
        DropOutcome::Removed { size: 8 }
    );
    assert_eq!(pool.read(h, |bytes| bytes.len()).unwrap(), None);
}
