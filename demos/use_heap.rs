//! Walk-through of the heap API
//!
//! Callers are expected to keep the handles returned by `insert` in whatever
//! structure suits them (a map, an adjacency list, a graph edge). `find`
//! exists as a fallback but costs linear time.
//!
//! Run with `cargo run --example use_heap`. It prints the final heap dump;
//! every other check is an assertion.

use rust_fibonacci_heap::fibonacci::{FibHandle, FibonacciHeap};
use rust_fibonacci_heap::HeapError;
use rustc_hash::FxHashMap;

fn main() -> Result<(), HeapError> {
    let mut handles: FxHashMap<i32, FibHandle> = FxHashMap::default();

    let mut first = FibonacciHeap::new();
    let mut second = FibonacciHeap::from_values(1..=10);

    // a deep copy, then overwritten by another heap's copy
    let mut third = second.clone();
    assert_eq!(third.len(), 10);
    third = first.clone();

    assert!(first.is_empty());
    assert!(!second.is_empty());
    assert!(third.is_empty());
    assert_eq!(second.len(), 10);
    assert_eq!(second.peek_min(), Ok(&1));
    assert_eq!(first.peek_min(), Err(HeapError::EmptyHeap));

    let four = second.find(&4).ok_or(HeapError::InvalidHandle)?;
    assert_eq!(second.get(&four), Ok(&4));

    for v in [3, 8, 1, 18, 13, 85, -2, 44] {
        handles.insert(v, first.insert(v));
    }
    assert_eq!(first.find(&3), handles.get(&3).copied());

    assert_eq!(first.extract_min()?, -2);
    assert_eq!(first.extract_min()?, 1);
    handles.remove(&-2);
    handles.remove(&1);

    // 44 becomes 2 in place; the handle is unchanged
    let h = handles.remove(&44).ok_or(HeapError::InvalidHandle)?;
    first.decrease_key(&h, 2)?;
    handles.insert(2, h);
    assert_eq!(first.get(&h), Ok(&2));

    // raising a value reinserts the element under a new handle
    let h = handles.remove(&2).ok_or(HeapError::InvalidHandle)?;
    let h = first.change_value(&h, 44)?;
    handles.insert(44, h);
    assert_eq!(first.find(&44), Some(h));

    for v in [3, 8] {
        if let Some(h) = handles.remove(&v) {
            first.delete(&h)?;
        }
    }

    for v in 1..=10 {
        if let Some(h) = second.find(&v) {
            handles.insert(v, h);
        }
    }

    // handles taken from `second` keep working once it is merged away
    first.append(&mut second);
    assert!(second.is_empty());
    assert_eq!(first.len(), 14);
    assert_eq!(first.get(&handles[&4]), Ok(&4));
    assert!(first.is_valid());

    print!("{}", first.dump());

    first.clear();
    handles.clear();
    assert!(first.is_empty());
    Ok(())
}
