/*!
 * Property Tests
 * Random operation sequences checked against a reference model
 */

use compacting_pool::{DropOutcome, Handle, ObjectPool};
use proptest::prelude::*;
use std::collections::BTreeMap;

const CAPACITY: usize = 256;

#[derive(Debug, Clone)]
enum Op {
    Insert(usize),
    Add(usize),
    Drop(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1usize..80).prop_map(Op::Insert),
        1 => any::<usize>().prop_map(Op::Add),
        2 => any::<usize>().prop_map(Op::Drop),
    ]
}

/// Live objects as the model sees them: size, reference count, fill byte
#[derive(Debug, Default)]
struct Model {
    live: BTreeMap<Handle, (usize, usize, u8)>,
    issued: Vec<Handle>,
    high_water_mark: usize,
}

impl Model {
    fn live_bytes(&self) -> usize {
        self.live.values().map(|(size, _, _)| size).sum()
    }

    /// Offset the pool should place `size` at, or `None` if it must fail
    fn placement(&mut self, size: usize) -> Option<usize> {
        if size < CAPACITY - self.high_water_mark {
            return Some(self.high_water_mark);
        }
        self.high_water_mark = self.live_bytes();
        (size < CAPACITY - self.high_water_mark).then_some(self.high_water_mark)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_pool_matches_model(ops in prop::collection::vec(op_strategy(), 1..120)) {
        let mut pool = ObjectPool::with_capacity(CAPACITY);
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Insert(size) => {
                    let expected = model.placement(size);
                    let result = pool.insert(size).unwrap();
                    prop_assert_eq!(result.is_some(), expected.is_some());

                    if let (Some(h), Some(offset)) = (result, expected) {
                        if let Some(last) = model.issued.last() {
                            prop_assert!(h > *last);
                        }
                        let fill = (h.raw() % 251) as u8 + 1;
                        prop_assert!(pool.retrieve(h).unwrap().unwrap().iter().all(|&b| b == 0));
                        pool.retrieve_mut(h).unwrap().unwrap().fill(fill);

                        let placed = pool.descriptors().last().map(|d| (d.handle, d.offset));
                        prop_assert_eq!(placed, Some((h, offset)));

                        model.high_water_mark = offset + size;
                        model.live.insert(h, (size, 1, fill));
                        model.issued.push(h);
                    }
                }
                Op::Add(pick) if !model.issued.is_empty() => {
                    let h = model.issued[pick % model.issued.len()];
                    let count = pool.add_reference(h).unwrap();
                    match model.live.get_mut(&h) {
                        Some(entry) => {
                            entry.1 += 1;
                            prop_assert_eq!(count, Some(entry.1));
                        }
                        None => prop_assert_eq!(count, None),
                    }
                }
                Op::Drop(pick) if !model.issued.is_empty() => {
                    let h = model.issued[pick % model.issued.len()];
                    let outcome = pool.drop_reference(h).unwrap();
                    match model.live.get(&h).copied() {
                        Some((size, 1, _)) => {
                            model.live.remove(&h);
                            prop_assert_eq!(outcome, DropOutcome::Removed { size });
                        }
                        Some((size, count, fill)) => {
                            model.live.insert(h, (size, count - 1, fill));
                            prop_assert_eq!(outcome, DropOutcome::Released { remaining: count - 1 });
                        }
                        None => prop_assert_eq!(outcome, DropOutcome::NotFound),
                    }
                }
                _ => {}
            }

            prop_assert!(pool.verify_integrity().is_ok());
            prop_assert_eq!(pool.high_water_mark(), model.high_water_mark);
            prop_assert_eq!(pool.len(), model.live.len());
            prop_assert!(pool.stats().live_bytes <= pool.high_water_mark());

            for (h, (size, _, fill)) in &model.live {
                let bytes = pool.retrieve(*h).unwrap().unwrap();
                prop_assert_eq!(bytes.len(), *size);
                prop_assert!(bytes.iter().all(|b| b == fill));
            }
        }
    }
}
