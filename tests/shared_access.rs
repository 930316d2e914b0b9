//! Sharing one heap between threads behind a lock
//!
//! The heap does no synchronisation of its own; callers serialise access.
//! These tests exercise that pattern with `parking_lot` locks and check that
//! handles can cross threads.

use parking_lot::{Mutex, RwLock};
use rust_fibonacci_heap::fibonacci::{FibHandle, FibonacciHeap};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_producers_then_drain() {
    let heap = Arc::new(Mutex::new(FibonacciHeap::new()));
    let workers: Vec<_> = (0..4u64)
        .map(|t| {
            let heap = Arc::clone(&heap);
            thread::spawn(move || {
                for i in 0..1_000 {
                    heap.lock().insert(i * 4 + t);
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    let mut heap = heap.lock();
    assert_eq!(heap.len(), 4_000);
    assert!(heap.is_valid());
    let drained: Vec<u64> = heap.drain_sorted().collect();
    assert_eq!(drained, (0..4_000).collect::<Vec<_>>());
}

#[test]
fn test_handles_used_from_other_threads() {
    let heap = Arc::new(Mutex::new(FibonacciHeap::new()));
    let handles: Vec<FibHandle> = {
        let mut guard = heap.lock();
        (0..200).map(|i| guard.insert(1_000 + i)).collect()
    };

    let chunks: Vec<Vec<FibHandle>> = handles.chunks(50).map(<[FibHandle]>::to_vec).collect();
    let workers: Vec<_> = chunks
        .into_iter()
        .map(|chunk| {
            let heap = Arc::clone(&heap);
            thread::spawn(move || {
                for h in chunk {
                    let mut guard = heap.lock();
                    let current = *guard.get(&h).unwrap();
                    guard.decrease_key(&h, current - 1_000).unwrap();
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    let heap = heap.lock();
    assert!(heap.is_valid());
    assert_eq!(heap.peek_min(), Ok(&0));
    assert_eq!(heap.clone().into_sorted_vec(), (0..200).collect::<Vec<_>>());
}

#[test]
fn test_readers_share_a_snapshot() {
    let heap = Arc::new(RwLock::new(FibonacciHeap::from_values([9, 4, 7, 1])));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let heap = Arc::clone(&heap);
            thread::spawn(move || {
                let guard = heap.read();
                (*guard.peek_min().unwrap(), guard.len())
            })
        })
        .collect();
    for r in readers {
        assert_eq!(r.join().unwrap(), (1, 4));
    }

    heap.write().extract_min().unwrap();
    assert_eq!(heap.read().peek_min(), Ok(&4));
}
