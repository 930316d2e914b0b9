//! Arena-backed Fibonacci Heap for Rust
//!
//! This crate provides a Fibonacci heap priority queue with handle-based
//! `decrease_key`, as used by shortest-path and minimum-spanning-tree
//! algorithms that repeatedly lower the priority of queued items.
//!
//! # Complexity
//!
//! | Operation        | Cost                 |
//! |------------------|----------------------|
//! | `insert`         | O(1)                 |
//! | `peek_min`       | O(1)                 |
//! | `append` (merge) | O(1)                 |
//! | `get`            | O(1)                 |
//! | `decrease_key`   | O(1) amortized       |
//! | `extract_min`    | O(log n) amortized   |
//! | `delete`         | O(log n) amortized   |
//! | `find`           | O(n) worst case      |
//!
//! # Design
//!
//! Nodes and root ring entries live in generational slot-map arenas, so the
//! cyclic parent/child/ring graph needs no unsafe code and no reference
//! counting. A [`FibHandle`](fibonacci::FibHandle) that outlives its element
//! is detected and rejected with [`HeapError::InvalidHandle`] rather than
//! reading freed or reused memory. Every contract violation is reported
//! through [`HeapError`]; nothing aborts.
//!
//! The heap is not thread-safe by itself. Wrap it in a mutex to share it.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::fibonacci::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let five = heap.insert(5);
//! heap.insert(3);
//! heap.insert(8);
//! heap.decrease_key(&five, 1).unwrap();
//! assert_eq!(heap.peek_min(), Ok(&1));
//!
//! let mut other = FibonacciHeap::from_values([2, 9]);
//! heap.append(&mut other);
//! assert!(other.is_empty());
//! assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3, 8, 9]);
//! ```

mod arena;
pub mod dump;
pub mod fibonacci;
mod node;
pub mod pathfinding;
pub mod rank;
mod ring;
pub mod traits;
pub mod validate;

// Re-export the main traits for convenience
pub use traits::{DecreaseKeyHeap, Heap, HeapError};
