//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert, peek and merge
//! - O(1) amortized decrease_key
//! - O(log n) amortized extract_min and delete
//!
//! The structure consists of a collection of heap-ordered trees. Roots are
//! linked in a circular doubly linked ring and the heap caches the ring entry
//! holding the minimum.
//!
//! Nodes live in a generational arena (see [`crate::arena`]); parents,
//! children and ring links are arena references, never owning pointers. A
//! [`FibHandle`] names one element instance and is rejected with
//! [`HeapError::InvalidHandle`] once that element leaves the heap.

use crate::arena::{Arena, EntryRef, NodeRef};
use crate::node::{adopt, detach, Node};
use crate::rank::{bucket_count, Rank};
use crate::ring::RootRing;
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Handle to an element in a Fibonacci heap
///
/// Handles stay valid while their element is in the heap, including after
/// the heap is merged into another heap: the element and its handle move
/// together. A deep copy made with `clone` does not accept the original's
/// handles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibHandle {
    pub(crate) node: NodeRef,
}

impl Handle for FibHandle {}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let five = heap.insert(5);
/// heap.insert(3);
/// heap.decrease_key(&five, 1).unwrap();
/// assert_eq!(heap.peek_min(), Ok(&1));
/// assert_eq!(heap.extract_min(), Ok(1));
/// assert_eq!(heap.extract_min(), Ok(3));
/// ```
pub struct FibonacciHeap<T: Ord> {
    pub(crate) arena: Arena<T>,
    pub(crate) ring: RootRing,
    pub(crate) len: usize,
    /// Highest rank any node has reached; sizes the consolidation buckets
    pub(crate) max_rank: Rank,
}

impl<T: Ord> FibonacciHeap<T> {
    /// Creates an empty heap
    pub fn new() -> Self {
        FibonacciHeap {
            arena: Arena::new(),
            ring: RootRing::new(),
            len: 0,
            max_rank: 0,
        }
    }

    /// Builds a heap by inserting every value in turn. O(n).
    ///
    /// No handles are returned; use [`insert`](Self::insert) when the caller
    /// needs them.
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut heap = FibonacciHeap::new();
        for value in values {
            heap.insert(value);
        }
        heap
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the smallest value without removing it. O(1).
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap holds no elements.
    pub fn peek_min(&self) -> Result<&T, HeapError> {
        self.ring
            .min_node(&self.arena)
            .map(|n| &self.arena[n].value)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Inserts a value as a new singleton tree and returns its handle. O(1).
    pub fn insert(&mut self, value: T) -> FibHandle {
        let node = self.arena.insert_node(Node::new(value));
        self.ring.insert_root(&mut self.arena, node);
        self.len += 1;
        FibHandle { node }
    }

    /// Removes and returns the smallest value. O(log n) amortized.
    ///
    /// The minimum's children become roots, then trees of equal rank are
    /// linked until every root rank is distinct.
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap holds no elements.
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        self.take_min_root().ok_or(HeapError::EmptyHeap)
    }

    /// Lowers the value of the element behind `handle`. O(1) amortized.
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the handle is stale or foreign
    /// - `HeapError::PriorityNotDecreased` unless `new_value` is strictly
    ///   smaller than the current value
    pub fn decrease_key(&mut self, handle: &FibHandle, new_value: T) -> Result<(), HeapError> {
        let node = self.locate(handle)?;
        if new_value >= self.arena[node].value {
            return Err(HeapError::PriorityNotDecreased);
        }
        self.arena[node].value = new_value;

        match self.arena[node].parent {
            Some(parent) if self.arena[node].value < self.arena[parent].value => {
                self.cut(node);
                self.cascading_cut(parent);
            }
            // heap order still holds below a parent that is no larger
            Some(_) => {}
            None => {
                let smaller = match self.ring.min_node(&self.arena) {
                    Some(min) => self.arena[node].value < self.arena[min].value,
                    None => true,
                };
                if smaller {
                    if let Some(entry) = self.arena.root_entry(node) {
                        self.ring.force_min(entry);
                    }
                }
            }
        }
        Ok(())
    }

    /// Removes the element behind `handle` and returns its value.
    /// O(log n) amortized.
    ///
    /// The node is promoted to a root (cascading as a decrease-key cut would)
    /// and then extracted as if it were the minimum. No sentinel value is
    /// needed, so this works for any `T: Ord`.
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the handle is stale or foreign.
    pub fn delete(&mut self, handle: &FibHandle) -> Result<T, HeapError> {
        let node = self.locate(handle)?;
        if let Some(parent) = self.arena[node].parent {
            self.cut(node);
            self.cascading_cut(parent);
        }
        let entry = self
            .arena
            .root_entry(node)
            .ok_or(HeapError::InvalidHandle)?;
        self.ring.force_min(entry);
        self.take_min_root().ok_or(HeapError::InvalidHandle)
    }

    /// Sets the element behind `handle` to `new_value` and returns the handle
    /// that now names it.
    ///
    /// - smaller: decrease-key in place, same handle
    /// - equal: nothing happens, same handle
    /// - larger: the element is deleted and reinserted, so a *new* handle is
    ///   returned and the old one becomes invalid
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the handle is stale or foreign.
    pub fn change_value(&mut self, handle: &FibHandle, new_value: T) -> Result<FibHandle, HeapError> {
        let node = self.locate(handle)?;
        match new_value.cmp(&self.arena[node].value) {
            Ordering::Less => {
                self.decrease_key(handle, new_value)?;
                Ok(*handle)
            }
            Ordering::Equal => Ok(*handle),
            Ordering::Greater => {
                self.delete(handle)?;
                Ok(self.insert(new_value))
            }
        }
    }

    /// Moves every element of `other` into this heap, leaving `other` empty.
    ///
    /// O(1) in the number of elements: the two root rings are spliced and
    /// the storage segments change owner. Handles issued by `other` remain
    /// valid against `self`.
    #[doc(alias = "merge")]
    pub fn append(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }
        self.arena.absorb(&mut other.arena);
        let donor = std::mem::take(&mut other.ring);
        self.ring.splice(&mut self.arena, donor);
        self.len += other.len;
        self.max_rank = self.max_rank.max(other.max_rank);

        other.len = 0;
        other.max_rank = 0;
    }

    /// Removes every element. O(n). All outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.arena = Arena::new();
        self.ring = RootRing::new();
        self.len = 0;
        self.max_rank = 0;
    }

    /// Finds an element equal to `value`.
    ///
    /// Worst case O(n): this is a fallback for callers that did not keep the
    /// handle from [`insert`](Self::insert). Subtrees whose root exceeds
    /// `value` are skipped. With duplicates, which occurrence is returned is
    /// unspecified.
    #[doc(alias = "get_address")]
    pub fn find(&self, value: &T) -> Option<FibHandle> {
        let mut stack: Vec<NodeRef> = self
            .ring
            .iter(&self.arena)
            .map(|e| self.arena[e].node)
            .collect();
        while let Some(node) = stack.pop() {
            let n = &self.arena[node];
            match n.value.cmp(value) {
                Ordering::Equal => return Some(FibHandle { node }),
                Ordering::Less => stack.extend(n.occupied()),
                Ordering::Greater => {}
            }
        }
        None
    }

    /// Returns the value behind `handle`. O(1).
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the handle is stale or foreign.
    pub fn get(&self, handle: &FibHandle) -> Result<&T, HeapError> {
        self.arena
            .node(handle.node)
            .map(|n| &n.value)
            .ok_or(HeapError::InvalidHandle)
    }

    /// True if `handle` names an element currently in this heap.
    pub fn contains(&self, handle: &FibHandle) -> bool {
        self.arena.contains_node(handle.node)
    }

    /// Consumes the heap, returning its values in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.drain_sorted().collect()
    }

    /// Removes the values in ascending order as an iterator.
    ///
    /// Elements not yet yielded when the iterator is dropped stay in the heap.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T> {
        DrainSorted { heap: self }
    }

    fn locate(&self, handle: &FibHandle) -> Result<NodeRef, HeapError> {
        if self.arena.contains_node(handle.node) {
            Ok(handle.node)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Removes the root behind the cached minimum entry and restores the
    /// heap's shape. Returns `None` on an empty heap.
    fn take_min_root(&mut self) -> Option<T> {
        let min_entry = self.ring.min()?;
        let min_node = self.arena[min_entry].node;

        let children: SmallVec<[NodeRef; 8]> = self.arena[min_node].occupied().collect();
        for child in children {
            detach(&mut self.arena, child);
            self.ring.insert_root(&mut self.arena, child);
        }

        self.ring.remove_root(&mut self.arena, min_entry);
        let removed = self.arena.remove_node(min_node)?;
        self.len -= 1;

        if self.len == 0 {
            self.ring = RootRing::new();
            self.max_rank = 0;
        } else {
            self.consolidate();
        }
        Some(removed.value)
    }

    /// Links roots of equal rank until all root ranks are distinct, then
    /// rescans the surviving roots for the minimum.
    fn consolidate(&mut self) {
        let roots: Vec<EntryRef> = self.ring.iter(&self.arena).collect();
        let mut buckets: Vec<Option<EntryRef>> = vec![None; bucket_count(self.max_rank)];

        for entry in roots {
            let mut survivor = entry;
            let mut rank = usize::from(self.arena[self.arena[survivor].node].rank);
            loop {
                if rank >= buckets.len() {
                    buckets.resize(rank + 1, None);
                }
                let Some(earlier) = buckets[rank].take() else {
                    break;
                };
                survivor = self.link(earlier, survivor);
                rank += 1;
            }
            buckets[rank] = Some(survivor);
        }

        self.ring.rescan_min(&self.arena);
    }

    /// Makes the larger of two equal-rank roots a child of the smaller and
    /// returns the surviving entry. On a tie `first` survives.
    fn link(&mut self, first: EntryRef, second: EntryRef) -> EntryRef {
        let a = self.arena[first].node;
        let b = self.arena[second].node;
        let (winner_entry, loser_entry, winner, loser) = if self.arena[b].value < self.arena[a].value {
            (second, first, b, a)
        } else {
            (first, second, a, b)
        };

        self.ring.remove_root(&mut self.arena, loser_entry);
        adopt(&mut self.arena, winner, loser);
        self.max_rank = self.max_rank.max(self.arena[winner].rank);
        winner_entry
    }

    /// Moves `node` and its subtree onto the root ring.
    fn cut(&mut self, node: NodeRef) {
        if detach(&mut self.arena, node).is_some() {
            self.ring.insert_root(&mut self.arena, node);
        }
    }

    /// Walks up from `ancestor`: marked non-roots are cut, the first unmarked
    /// non-root is marked, and a root ends the walk.
    fn cascading_cut(&mut self, mut ancestor: NodeRef) {
        loop {
            let node = &mut self.arena[ancestor];
            let Some(parent) = node.parent else {
                break;
            };
            if !node.marked {
                node.marked = true;
                break;
            }
            self.cut(ancestor);
            ancestor = parent;
        }
    }
}

impl<T: Ord + Clone> FibonacciHeap<T> {
    /// Copies the tree under `root` from `source` into this heap's arena,
    /// keeping slot positions and marks. Returns the copy's root.
    fn copy_tree(&mut self, source: &Arena<T>, root: NodeRef) -> NodeRef {
        let twin = self.arena.insert_node(shell(&source[root]));
        let mut pending = vec![(root, twin)];

        while let Some((original, copy)) = pending.pop() {
            for (slot, child) in source[original].children.iter().enumerate() {
                let Some(child) = *child else { continue };
                let mut node = shell(&source[child]);
                node.parent = Some(copy);
                node.slot = Some(slot);
                let child_copy = self.arena.insert_node(node);
                self.arena[copy].children[slot] = Some(child_copy);
                pending.push((child, child_copy));
            }
        }
        twin
    }
}

/// A detached copy of `node`: same value, rank and mark, every slot vacant.
fn shell<T: Clone>(node: &Node<T>) -> Node<T> {
    let mut copy = Node::new(node.value.clone());
    copy.rank = node.rank;
    copy.marked = node.marked;
    copy.children.resize(node.children.len(), None);
    copy
}

/// Deep structural copy. The copy has its own storage: mutating either heap
/// never affects the other, and handles from one are rejected by the other.
impl<T: Ord + Clone> Clone for FibonacciHeap<T> {
    fn clone(&self) -> Self {
        let mut copy = FibonacciHeap::new();
        for entry in self.ring.iter(&self.arena) {
            let twin = copy.copy_tree(&self.arena, self.arena[entry].node);
            copy.ring.insert_root(&mut copy.arena, twin);
        }
        copy.len = self.len;
        copy.max_rank = self.max_rank;
        copy
    }
}

impl<T: Ord> Default for FibonacciHeap<T> {
    fn default() -> Self {
        FibonacciHeap::new()
    }
}

impl<T: Ord> FromIterator<T> for FibonacciHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        FibonacciHeap::from_values(iter)
    }
}

impl<T: Ord> Extend<T> for FibonacciHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Iterator returned by [`FibonacciHeap::drain_sorted`]
pub struct DrainSorted<'a, T: Ord> {
    heap: &'a mut FibonacciHeap<T>,
}

impl<T: Ord> Iterator for DrainSorted<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.extract_min().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len, Some(self.heap.len))
    }
}

impl<T: Ord> ExactSizeIterator for DrainSorted<'_, T> {}

impl<T: Ord> Heap<T> for FibonacciHeap<T> {
    fn new() -> Self {
        FibonacciHeap::new()
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, value: T) {
        self.insert(value);
    }

    fn peek(&self) -> Option<&T> {
        self.peek_min().ok()
    }

    fn pop(&mut self) -> Option<T> {
        self.extract_min().ok()
    }

    fn merge(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}

impl<T: Ord> DecreaseKeyHeap<T> for FibonacciHeap<T> {
    type Handle = FibHandle;

    fn push_with_handle(&mut self, value: T) -> FibHandle {
        self.insert(value)
    }

    fn decrease_key(&mut self, handle: &FibHandle, new_value: T) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_value)
    }

    fn remove(&mut self, handle: &FibHandle) -> Result<T, HeapError> {
        self.delete(handle)
    }

    fn get(&self, handle: &FibHandle) -> Result<&T, HeapError> {
        FibonacciHeap::get(self, handle)
    }
}
