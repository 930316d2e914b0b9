//! Read-only introspection and a human-readable dump
//!
//! The accessors here expose the ring order and every node field without
//! giving out anything that could mutate the heap. [`Dump`] is built purely
//! on top of them, the same way an external formatter would be.
//!
//! ```rust
//! use rust_fibonacci_heap::fibonacci::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::from_values([4, 2, 7]);
//! heap.extract_min().unwrap();
//! let text = heap.dump().to_string();
//! assert!(text.starts_with("front: "));
//! assert!(text.contains("len: 2"));
//! ```

use crate::fibonacci::{FibHandle, FibonacciHeap};
use crate::traits::HeapError;
use std::collections::VecDeque;
use std::fmt;

/// Borrowed view of one node's fields
pub struct NodeView<'a, T: Ord> {
    heap: &'a FibonacciHeap<T>,
    handle: FibHandle,
}

impl<'a, T: Ord> NodeView<'a, T> {
    pub fn handle(&self) -> FibHandle {
        self.handle
    }

    pub fn value(&self) -> &'a T {
        let heap: &'a FibonacciHeap<T> = self.heap;
        &heap.arena[self.handle.node].value
    }

    /// `None` for roots
    pub fn parent(&self) -> Option<FibHandle> {
        self.heap.arena[self.handle.node]
            .parent
            .map(|node| FibHandle { node })
    }

    /// Position in the parent's slot array; `None` for roots
    pub fn slot(&self) -> Option<usize> {
        self.heap.arena[self.handle.node].slot
    }

    pub fn is_marked(&self) -> bool {
        self.heap.arena[self.handle.node].marked
    }

    pub fn is_root(&self) -> bool {
        self.heap.arena[self.handle.node].is_root()
    }

    /// Number of occupied child slots
    pub fn rank(&self) -> usize {
        usize::from(self.heap.arena[self.handle.node].rank)
    }

    /// Every child slot in order, vacant slots included
    pub fn slots(&self) -> impl Iterator<Item = Option<FibHandle>> + 'a {
        let heap: &'a FibonacciHeap<T> = self.heap;
        heap.arena[self.handle.node]
            .children
            .iter()
            .map(|slot| slot.map(|node| FibHandle { node }))
    }

    /// Occupied child slots in order
    pub fn children(&self) -> impl Iterator<Item = FibHandle> + 'a {
        self.slots().flatten()
    }

    /// Roots adjacent to this one on the ring as `(left, right)`; `None` for
    /// non-roots.
    pub fn ring_neighbours(&self) -> Option<(FibHandle, FibHandle)> {
        let arena = &self.heap.arena;
        let entry = arena.root_entry(self.handle.node)?;
        let left = arena[arena[entry].prev].node;
        let right = arena[arena[entry].next].node;
        Some((FibHandle { node: left }, FibHandle { node: right }))
    }
}

impl<T: Ord> FibonacciHeap<T> {
    /// Handles of the current roots in ring order, starting at the ring head.
    pub fn roots(&self) -> impl Iterator<Item = FibHandle> + '_ {
        self.ring
            .iter(&self.arena)
            .map(|entry| FibHandle {
                node: self.arena[entry].node,
            })
    }

    /// Handle of the element `peek_min` would return.
    pub fn min_handle(&self) -> Option<FibHandle> {
        self.ring.min_node(&self.arena).map(|node| FibHandle { node })
    }

    /// Highest rank any tree has reached while the heap was non-empty.
    pub fn max_rank(&self) -> usize {
        usize::from(self.max_rank)
    }

    /// Read-only view of the node behind `handle`.
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the handle is stale or foreign.
    pub fn node(&self, handle: &FibHandle) -> Result<NodeView<'_, T>, HeapError> {
        if self.contains(handle) {
            Ok(NodeView {
                heap: self,
                handle: *handle,
            })
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Textual rendering of the whole heap, tree by tree.
    pub fn dump(&self) -> Dump<'_, T> {
        Dump { heap: self }
    }
}

/// Display adapter returned by [`FibonacciHeap::dump`]
pub struct Dump<'a, T: Ord> {
    heap: &'a FibonacciHeap<T>,
}

fn write_value<T: Ord + fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    heap: &FibonacciHeap<T>,
    handle: Option<FibHandle>,
) -> fmt::Result {
    match handle.and_then(|h| heap.get(&h).ok()) {
        Some(value) => write!(f, "{value:?}"),
        None => write!(f, "null"),
    }
}

impl<T: Ord + fmt::Debug> fmt::Display for Dump<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heap = self.heap;
        write!(f, "front: ")?;
        write_value(f, heap, heap.roots().next())?;
        write!(f, "\nmin: ")?;
        write_value(f, heap, heap.min_handle())?;
        writeln!(f, "\nlen: {}", heap.len())?;
        writeln!(f, "max rank: {}", heap.max_rank())?;

        for (number, root) in heap.roots().enumerate() {
            let Ok(view) = heap.node(&root) else { continue };
            writeln!(f)?;
            writeln!(f, "tree {}:", number + 1)?;
            write!(f, "root: {:?}", view.value())?;
            if let Some((left, right)) = view.ring_neighbours() {
                write!(f, " (left: ")?;
                write_value(f, heap, Some(left))?;
                write!(f, ", right: ")?;
                write_value(f, heap, Some(right))?;
                write!(f, ")")?;
            }
            writeln!(f)?;

            let mut queue = VecDeque::from([root]);
            while let Some(handle) = queue.pop_front() {
                let Ok(node) = heap.node(&handle) else { continue };
                write!(f, "  {:?}: marked={} parent=", node.value(), node.is_marked())?;
                write_value(f, heap, node.parent())?;
                match node.slot() {
                    Some(slot) => write!(f, " slot={slot}")?,
                    None => write!(f, " slot=root")?,
                }
                write!(f, " rank={} children=[", node.rank())?;
                for (i, slot) in node.slots().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_value(f, heap, slot)?;
                }
                writeln!(f, "]")?;
                queue.extend(node.children());
            }
        }
        Ok(())
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for FibonacciHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.peek_min().ok())
            .field("roots", &self.roots().count())
            .field("max_rank", &self.max_rank)
            .finish()
    }
}
