//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for priority queues:
//!
//! - [`Heap`]: Base trait for simple heaps without `decrease_key` support
//! - [`DecreaseKeyHeap`]: Extended trait adding `decrease_key` and handle-based operations
//!
//! The base [`Heap`] trait mirrors the shape of Rust's `BinaryHeap` API,
//! while [`DecreaseKeyHeap`] adds the operations needed by algorithms like
//! Dijkstra's shortest path and Prim's minimum spanning tree.
//!
//! Unlike the `(priority, item)` heaps of some crates, the element itself is
//! the priority here: any `T: Ord` can be stored, and tuples such as
//! `(distance, vertex)` carry a payload with a built-in tie-break.

use std::fmt;

/// Error type for heap operations
///
/// Every variant is a caller contract violation. None of them is transient
/// and none is retried internally; the heap is left unchanged when one is
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `peek_min` or `extract_min` was called on a heap with no elements
    EmptyHeap,
    /// The new priority is not less than the current priority
    PriorityNotDecreased,
    /// The handle is no longer valid (element was removed) or belongs to another heap
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::PriorityNotDecreased => {
                write!(f, "new priority is not less than current priority")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is not valid for this heap (element removed or foreign handle)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque, equality-comparable capability that identifies one
/// specific element instance. It must not outlive the heap that issued it;
/// presenting a stale or foreign handle yields [`HeapError::InvalidHandle`].
pub trait Handle: Copy + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// For heaps that support `decrease_key` operations, see [`DecreaseKeyHeap`].
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::Heap;
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap: FibonacciHeap<i32> = Heap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.pop(), Some(1));
/// ```
pub trait Heap<T: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(1) for the Fibonacci heap.
    fn push(&mut self, value: T);

    /// Returns the minimum element without removing it
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
    fn peek(&self) -> Option<&T>;

    /// Removes and returns the minimum element
    ///
    /// # Time Complexity
    /// O(log n) amortized for the Fibonacci heap.
    fn pop(&mut self) -> Option<T>;

    /// Merges another heap into this one, consuming the other heap
    ///
    /// # Time Complexity
    /// O(1) for the Fibonacci heap.
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` support
///
/// This trait extends [`Heap`] with operations that require tracking element handles:
/// - `push_with_handle` returns a handle that can be used with `decrease_key`
/// - `decrease_key` efficiently lowers an element's priority
/// - `remove` deletes an arbitrary element by handle
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::{Heap, DecreaseKeyHeap};
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap: FibonacciHeap<i32> = Heap::new();
/// let handle = heap.push_with_handle(10);
/// heap.push(7);
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some(&5));
/// ```
pub trait DecreaseKeyHeap<T: Ord>: Heap<T> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element, returning a handle to it
    fn push_with_handle(&mut self, value: T) -> Self::Handle;

    /// Decreases the priority of an element identified by the handle
    ///
    /// # Errors
    /// Returns `HeapError::PriorityNotDecreased` if the new priority is not
    /// less than the current priority, and `HeapError::InvalidHandle` if the
    /// handle does not name a live element of this heap.
    ///
    /// # Time Complexity
    /// O(1) amortized for the Fibonacci heap.
    fn decrease_key(&mut self, handle: &Self::Handle, new_value: T) -> Result<(), HeapError>;

    /// Removes the element identified by the handle and returns it
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle is stale or foreign.
    fn remove(&mut self, handle: &Self::Handle) -> Result<T, HeapError>;

    /// Returns the element identified by the handle
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle is stale or foreign.
    fn get(&self, handle: &Self::Handle) -> Result<&T, HeapError>;
}
