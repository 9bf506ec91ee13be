//! # Property Tests for the Ordered Queue
//!
//! ## Test Categories
//!
//! 1. **Sort Invariant** - random operation sequences never break ordering
//! 2. **Round-Trip** - dequeuing everything yields the sorted order
//! 3. **Position** - binary search agrees with the list index

use ordered_queue::domain::invariants::{invariant_association_complete, invariant_sorted};
use ordered_queue::{Keyed, ManualTimeSource, OrderedQueue, QueueConfig, Timestamp};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Once};

// =============================================================================
// TEST HELPERS
// =============================================================================

#[derive(Debug)]
struct Task {
    id: String,
}

impl Keyed for Task {
    fn key(&self) -> &str {
        &self.id
    }
}

fn task(id: impl Into<String>) -> Arc<Task> {
    Arc::new(Task { id: id.into() })
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn order_of<C: ordered_queue::TimeSource>(
    queue: &OrderedQueue<Task, C>,
    item: &Arc<Task>,
) -> (Timestamp, String) {
    (queue.timestamp_of(item).unwrap(), item.id.clone())
}

#[derive(Clone, Debug)]
enum Op {
    Enqueue { key: u8, ts: Option<u16> },
    Dequeue,
    Remove(usize),
    Requeue { pick: usize, ts: Option<u16> },
    Tick(u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<u8>(), proptest::option::of(0u16..500))
            .prop_map(|(key, ts)| Op::Enqueue { key, ts }),
        1 => Just(Op::Dequeue),
        1 => any::<usize>().prop_map(Op::Remove),
        2 => (any::<usize>(), proptest::option::of(0u16..500))
            .prop_map(|(pick, ts)| Op::Requeue { pick, ts }),
        1 => (0u16..50).prop_map(Op::Tick),
    ]
}

// =============================================================================
// SORT INVARIANT
// =============================================================================

proptest! {
    #[test]
    fn prop_operations_preserve_order(ops in proptest::collection::vec(op_strategy(), 1..120)) {
        init_tracing();
        let clock = Arc::new(ManualTimeSource::new(250));
        let mut queue = OrderedQueue::with_time_source(Arc::clone(&clock));
        let mut handles: Vec<Arc<Task>> = Vec::new();

        for op in ops {
            match op {
                Op::Enqueue { key, ts } => {
                    let item = task(format!("k{:03}-{}", key, handles.len()));
                    handles.push(Arc::clone(&item));
                    queue.enqueue(item, ts.map(Timestamp::from)).unwrap();
                }
                Op::Dequeue => {
                    if let Some(front) = queue.dequeue() {
                        prop_assert_eq!(queue.timestamp_of(&front), None);
                    }
                }
                Op::Remove(pick) if !handles.is_empty() => {
                    let item = &handles[pick % handles.len()];
                    let was_queued = queue.contains(item).unwrap();
                    prop_assert_eq!(queue.remove(item).unwrap(), was_queued);
                    prop_assert!(!queue.contains(item).unwrap());
                }
                Op::Requeue { pick, ts } if !handles.is_empty() => {
                    let item = Arc::clone(&handles[pick % handles.len()]);
                    queue.requeue(Arc::clone(&item), ts.map(Timestamp::from)).unwrap();
                    let expected = ts.map(Timestamp::from).unwrap_or_else(|| {
                        use ordered_queue::TimeSource;
                        clock.now()
                    });
                    prop_assert_eq!(queue.timestamp_of(&item), Some(expected));
                }
                Op::Tick(ms) => clock.advance(u64::from(ms)),
                _ => {}
            }

            prop_assert!(invariant_sorted(&queue));
            prop_assert!(invariant_association_complete(&queue));
        }
    }
}

// =============================================================================
// ROUND-TRIP
// =============================================================================

#[test]
fn test_random_round_trip() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut queue = OrderedQueue::with_config(QueueConfig {
        initial_capacity: 512,
        ..Default::default()
    });

    let mut expected = Vec::new();
    for i in 0..500 {
        let ts: Timestamp = rng.gen_range(0..100);
        let key = format!("{:04}", rng.gen_range(0..10_000u32) * 1_000 + i);
        let item = task(key.clone());
        queue.enqueue(item, Some(ts)).unwrap();
        expected.push((ts, key));
    }
    expected.sort();

    let listed: Vec<_> = queue.iter().map(|t| order_of(&queue, t)).collect();
    assert_eq!(listed, expected);

    let mut drained = Vec::new();
    while let Some(item) = queue.dequeue() {
        drained.push(item.id.clone());
    }
    let expected_keys: Vec<_> = expected.into_iter().map(|(_, key)| key).collect();
    assert_eq!(drained, expected_keys);
    assert!(queue.is_empty());
    assert!(invariant_association_complete(&queue));
}

// =============================================================================
// POSITION
// =============================================================================

#[test]
fn test_position_for_every_item() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut queue = OrderedQueue::new();
    let items: Vec<_> = (0..200).map(|i| task(format!("t{:03}", i))).collect();
    for item in &items {
        queue
            .enqueue(Arc::clone(item), Some(rng.gen_range(0..20)))
            .unwrap();
    }

    for item in &items {
        let index = queue.position(item).unwrap().expect("queued item");
        assert!(Arc::ptr_eq(&queue.list()[index], item));
    }

    for (index, item) in queue.list().iter().enumerate() {
        assert_eq!(queue.position(item).unwrap(), Some(index));
    }
}

#[test]
fn test_drain_due_items_from_clock() {
    let clock = ManualTimeSource::new(1_000);
    let mut queue = OrderedQueue::with_time_source(&clock);
    let first = task("first");
    let second = task("second");

    queue.enqueue(Arc::clone(&first), None).unwrap();
    clock.advance(500);
    queue.enqueue(Arc::clone(&second), None).unwrap();

    let due = queue.drain_until(1_200).unwrap();
    assert_eq!(due.len(), 1);
    assert!(Arc::ptr_eq(&due[0], &first));
    assert_eq!(queue.status().oldest, Some(1_500));
}
