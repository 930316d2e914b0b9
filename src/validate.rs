//! Structural invariant checker
//!
//! [`FibonacciHeap::violations`] walks the whole heap without modifying it
//! and reports every broken invariant it finds as a [`Violation`]. It is
//! O(n) and meant for tests and debugging, never for hot paths.
//!
//! Checked:
//! - the empty state is consistent (no ring ⇔ no min ⇔ `len == 0`)
//! - ring links are symmetric and the ring closes on its head
//! - the Root Index maps each root to its own ring entry and nothing else
//! - roots have no parent, no slot and no mark
//! - every child's parent and slot back references match its position
//! - heap order holds on every edge
//! - recorded ranks match occupied slot counts and stay within `max_rank`
//! - the cached minimum is the smallest value reachable
//! - `len` matches the reachable node count and no stored node is orphaned

use crate::arena::NodeRef;
use crate::fibonacci::{FibHandle, FibonacciHeap};
use rustc_hash::FxHashSet;
use std::fmt;

/// One broken invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Ring presence, cached minimum presence and `len` disagree about emptiness
    EmptyStateMismatch {
        len: usize,
        has_ring: bool,
        has_min: bool,
    },
    /// A ring link points at an entry that does not exist
    DanglingRingLink,
    /// The entry after `root`'s entry does not link back to it
    AsymmetricRingLink { root: FibHandle },
    /// Walking the ring from its head never returned to the head
    RingNotClosed,
    /// The cached minimum entry is not on the ring
    MinNotInRing,
    /// A node holds a value smaller than the cached minimum
    MinNotSmallest { min: FibHandle, smaller: FibHandle },
    /// The Root Index does not map `root` to the ring entry that references it
    RootIndexMismatch { root: FibHandle },
    /// A non-root node is present in the Root Index
    NonRootIndexed { node: FibHandle },
    /// The Root Index size differs from the number of ring entries
    RootIndexSize { indexed: usize, roots: usize },
    /// A ring member has a parent, a slot, or a mark
    RootInvariant { root: FibHandle },
    /// A ring entry or child slot references a node that does not exist
    DanglingNode,
    /// A node is reachable along more than one path
    SharedNode { node: FibHandle },
    /// A child's parent reference does not point at the node holding it
    ParentMismatch { node: FibHandle },
    /// A child's recorded slot is not the slot it occupies
    SlotMismatch {
        node: FibHandle,
        recorded: Option<usize>,
        actual: usize,
    },
    /// A child is smaller than its parent
    HeapOrder { parent: FibHandle, child: FibHandle },
    /// A recorded rank differs from the number of occupied slots
    RankDrift {
        node: FibHandle,
        recorded: usize,
        actual: usize,
    },
    /// A node's rank exceeds the heap's recorded rank bound
    RankAboveBound {
        node: FibHandle,
        rank: usize,
        bound: usize,
    },
    /// `len` differs from the number of reachable nodes
    CountMismatch { recorded: usize, reachable: usize },
    /// The arena stores nodes that are not reachable from the ring
    OrphanedNodes { stored: usize, reachable: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyStateMismatch { len, has_ring, has_min } => write!(
                f,
                "inconsistent empty state: len {len}, ring present {has_ring}, min present {has_min}"
            ),
            Violation::DanglingRingLink => write!(f, "ring link points at a missing entry"),
            Violation::AsymmetricRingLink { root } => {
                write!(f, "ring successor of {root:?} does not link back")
            }
            Violation::RingNotClosed => write!(f, "root ring does not close on its head"),
            Violation::MinNotInRing => write!(f, "cached minimum is not on the root ring"),
            Violation::MinNotSmallest { min, smaller } => {
                write!(f, "cached minimum {min:?} is larger than {smaller:?}")
            }
            Violation::RootIndexMismatch { root } => {
                write!(f, "root index entry for {root:?} does not match its ring entry")
            }
            Violation::NonRootIndexed { node } => {
                write!(f, "non-root {node:?} is present in the root index")
            }
            Violation::RootIndexSize { indexed, roots } => {
                write!(f, "root index holds {indexed} entries for {roots} roots")
            }
            Violation::RootInvariant { root } => {
                write!(f, "root {root:?} has a parent, a slot or a mark")
            }
            Violation::DanglingNode => write!(f, "reference to a missing node"),
            Violation::SharedNode { node } => write!(f, "{node:?} is reachable more than once"),
            Violation::ParentMismatch { node } => {
                write!(f, "{node:?} does not point back at the parent holding it")
            }
            Violation::SlotMismatch { node, recorded, actual } => write!(
                f,
                "{node:?} records slot {recorded:?} but occupies slot {actual}"
            ),
            Violation::HeapOrder { parent, child } => {
                write!(f, "child {child:?} is smaller than parent {parent:?}")
            }
            Violation::RankDrift { node, recorded, actual } => write!(
                f,
                "{node:?} records rank {recorded} but has {actual} children"
            ),
            Violation::RankAboveBound { node, rank, bound } => {
                write!(f, "{node:?} has rank {rank} above the bound {bound}")
            }
            Violation::CountMismatch { recorded, reachable } => write!(
                f,
                "heap reports {recorded} elements but {reachable} are reachable"
            ),
            Violation::OrphanedNodes { stored, reachable } => write!(
                f,
                "{stored} nodes stored but only {reachable} reachable"
            ),
        }
    }
}

impl<T: Ord> FibonacciHeap<T> {
    /// Checks every structural invariant and returns the broken ones.
    /// An empty vector means the heap is well formed.
    pub fn violations(&self) -> Vec<Violation> {
        let mut found = Vec::new();
        let arena = &self.arena;

        let has_ring = !self.ring.is_empty();
        let has_min = self.ring.min().is_some();
        if has_ring != has_min || has_ring != (self.len > 0) {
            found.push(Violation::EmptyStateMismatch {
                len: self.len,
                has_ring,
                has_min,
            });
        }

        // ring walk, bounded by the number of stored entries
        let mut ring = Vec::new();
        if let Some(head) = self.ring.head() {
            let limit = arena.entry_count();
            let mut cursor = head;
            loop {
                let Some(entry) = arena.entry(cursor) else {
                    found.push(Violation::DanglingRingLink);
                    break;
                };
                if arena.entry(entry.next).map(|next| next.prev) != Some(cursor) {
                    found.push(Violation::AsymmetricRingLink {
                        root: FibHandle { node: entry.node },
                    });
                }
                ring.push((cursor, entry.node));
                cursor = entry.next;
                if cursor == head {
                    break;
                }
                if ring.len() >= limit {
                    found.push(Violation::RingNotClosed);
                    break;
                }
            }
        }

        if let Some(min) = self.ring.min() {
            if !ring.iter().any(|&(entry, _)| entry == min) {
                found.push(Violation::MinNotInRing);
            }
        }

        for &(entry, root) in &ring {
            if arena.root_entry(root) != Some(entry) {
                found.push(Violation::RootIndexMismatch {
                    root: FibHandle { node: root },
                });
            }
        }
        let indexed = arena.root_index_len();
        if indexed != ring.len() {
            found.push(Violation::RootIndexSize {
                indexed,
                roots: ring.len(),
            });
        }

        // tree walk: (node, parent, slot it should occupy)
        let mut pending: Vec<(NodeRef, Option<(NodeRef, usize)>)> =
            ring.iter().map(|&(_, root)| (root, None)).collect();
        let mut seen: FxHashSet<NodeRef> = FxHashSet::default();
        let mut smallest: Option<NodeRef> = None;

        while let Some((node_ref, position)) = pending.pop() {
            let Some(node) = arena.node(node_ref) else {
                found.push(Violation::DanglingNode);
                continue;
            };
            let handle = FibHandle { node: node_ref };
            if !seen.insert(node_ref) {
                found.push(Violation::SharedNode { node: handle });
                continue;
            }

            match position {
                None => {
                    if node.parent.is_some() || node.slot.is_some() || node.marked {
                        found.push(Violation::RootInvariant { root: handle });
                    }
                }
                Some((parent, slot)) => {
                    if node.parent != Some(parent) {
                        found.push(Violation::ParentMismatch { node: handle });
                    }
                    if node.slot != Some(slot) {
                        found.push(Violation::SlotMismatch {
                            node: handle,
                            recorded: node.slot,
                            actual: slot,
                        });
                    }
                    if arena.root_entry(node_ref).is_some() {
                        found.push(Violation::NonRootIndexed { node: handle });
                    }
                    if arena.node(parent).is_some_and(|p| node.value < p.value) {
                        found.push(Violation::HeapOrder {
                            parent: FibHandle { node: parent },
                            child: handle,
                        });
                    }
                }
            }

            let occupied = node.occupied().count();
            if usize::from(node.rank) != occupied {
                found.push(Violation::RankDrift {
                    node: handle,
                    recorded: usize::from(node.rank),
                    actual: occupied,
                });
            }
            if node.rank > self.max_rank {
                found.push(Violation::RankAboveBound {
                    node: handle,
                    rank: usize::from(node.rank),
                    bound: usize::from(self.max_rank),
                });
            }

            if smallest.map_or(true, |s| node.value < arena[s].value) {
                smallest = Some(node_ref);
            }

            for (slot, child) in node.children.iter().enumerate() {
                if let Some(child) = *child {
                    pending.push((child, Some((node_ref, slot))));
                }
            }
        }

        if let (Some(min), Some(smallest)) = (self.ring.min_node(arena), smallest) {
            if arena.node(min).is_some_and(|m| arena[smallest].value < m.value) {
                found.push(Violation::MinNotSmallest {
                    min: FibHandle { node: min },
                    smaller: FibHandle { node: smallest },
                });
            }
        }

        let reachable = seen.len();
        if reachable != self.len {
            found.push(Violation::CountMismatch {
                recorded: self.len,
                reachable,
            });
        }
        let stored = arena.node_count();
        if stored != reachable {
            found.push(Violation::OrphanedNodes { stored, reachable });
        }

        found
    }

    /// True if no structural invariant is broken.
    #[doc(alias = "valid")]
    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worked_heap() -> (FibonacciHeap<i32>, Vec<FibHandle>) {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..20).map(|v| heap.insert(v)).collect();
        heap.extract_min().unwrap();
        (heap, handles)
    }

    fn non_root(heap: &FibonacciHeap<i32>, handles: &[FibHandle]) -> FibHandle {
        handles
            .iter()
            .copied()
            .find(|h| heap.arena.node(h.node).is_some_and(|n| !n.is_root()))
            .unwrap()
    }

    #[test]
    fn test_fresh_and_worked_heaps_are_valid() {
        assert!(FibonacciHeap::<i32>::new().is_valid());
        let (heap, _) = worked_heap();
        assert_eq!(heap.violations(), vec![]);
    }

    #[test]
    fn test_detects_heap_order_breach() {
        let (mut heap, handles) = worked_heap();
        let child = non_root(&heap, &handles);
        heap.arena[child.node].value = -100;

        let found = heap.violations();
        assert!(found.iter().any(|v| matches!(v, Violation::HeapOrder { child: c, .. } if *c == child)));
        assert!(found.iter().any(|v| matches!(v, Violation::MinNotSmallest { .. })));
    }

    #[test]
    fn test_detects_rank_drift() {
        let (mut heap, handles) = worked_heap();
        let child = non_root(&heap, &handles);
        let parent = heap.arena[child.node].parent.unwrap();
        heap.arena[parent].rank += 1;

        assert!(heap
            .violations()
            .iter()
            .any(|v| matches!(v, Violation::RankDrift { .. })));
    }

    #[test]
    fn test_detects_slot_mismatch() {
        let (mut heap, handles) = worked_heap();
        let child = non_root(&heap, &handles);
        heap.arena[child.node].slot = Some(99);

        assert!(heap.violations().iter().any(|v| matches!(
            v,
            Violation::SlotMismatch { recorded: Some(99), .. }
        )));
    }

    #[test]
    fn test_detects_count_mismatch() {
        let (mut heap, _) = worked_heap();
        heap.len += 1;
        assert!(heap.violations().contains(&Violation::CountMismatch {
            recorded: 20,
            reachable: 19,
        }));
    }

    #[test]
    fn test_detects_marked_root() {
        let (mut heap, _) = worked_heap();
        let root = heap.ring.min_node(&heap.arena).unwrap();
        heap.arena[root].marked = true;
        assert!(heap
            .violations()
            .contains(&Violation::RootInvariant { root: FibHandle { node: root } }));
    }

    #[test]
    fn test_violation_messages_are_readable() {
        let message = Violation::CountMismatch {
            recorded: 3,
            reachable: 2,
        }
        .to_string();
        assert_eq!(message, "heap reports 3 elements but 2 are reachable");
    }
}
