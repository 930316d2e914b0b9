//! Segmented slot-map storage for heap nodes and root ring entries
//!
//! Every node and every ring entry of a heap lives in a `slotmap::SlotMap`.
//! Slot-map keys are generational: once a node is removed its key never
//! resolves again, even if the slot is reused, which is what lets the heap
//! reject stale handles instead of silently aliasing a newer element.
//!
//! # Segments
//!
//! An [`Arena`] is a table of *segments*, each identified by a process-unique
//! [`SegmentId`]. References carry the segment id next to the slot-map key, so
//! merging two heaps only has to move segment tables around, never individual
//! nodes:
//!
//! - new allocations go to the arena's primary segment
//! - [`Arena::absorb`] moves every segment of the donor into the recipient,
//!   iterating the smaller of the two tables
//! - a non-primary segment is dropped as soon as it holds nothing
//!
//! The Root Index (root node → ring entry) is a `slotmap::SecondaryMap` kept
//! in the segment that owns the root node, so it travels with its nodes.

use crate::node::Node;
use crate::ring::RingEntry;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    /// Slot-map key of a node within its segment
    pub(crate) struct NodeKey;

    /// Slot-map key of a root ring entry within its segment
    pub(crate) struct EntryKey;
}

static NEXT_SEGMENT: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an arena segment
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct SegmentId(u64);

impl SegmentId {
    fn fresh() -> Self {
        SegmentId(NEXT_SEGMENT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Fully qualified reference to a node
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeRef {
    pub(crate) segment: SegmentId,
    pub(crate) key: NodeKey,
}

/// Fully qualified reference to a root ring entry
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct EntryRef {
    pub(crate) segment: SegmentId,
    pub(crate) key: EntryKey,
}

struct Segment<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    entries: SlotMap<EntryKey, RingEntry>,
    roots: SecondaryMap<NodeKey, EntryRef>,
}

impl<T> Segment<T> {
    fn new() -> Self {
        Segment {
            nodes: SlotMap::with_key(),
            entries: SlotMap::with_key(),
            roots: SecondaryMap::new(),
        }
    }

    fn is_vacant(&self) -> bool {
        self.nodes.is_empty() && self.entries.is_empty()
    }
}

/// Storage owned by exactly one heap
pub(crate) struct Arena<T> {
    segments: FxHashMap<SegmentId, Segment<T>>,
    primary: SegmentId,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        let primary = SegmentId::fresh();
        let mut segments = FxHashMap::default();
        segments.insert(primary, Segment::new());
        Arena { segments, primary }
    }

    fn primary_mut(&mut self) -> &mut Segment<T> {
        self.segments.entry(self.primary).or_insert_with(Segment::new)
    }

    /// Drops `segment` if it is a secondary segment with nothing left in it.
    fn prune(&mut self, segment: SegmentId) {
        if segment == self.primary {
            return;
        }
        if self.segments.get(&segment).is_some_and(Segment::is_vacant) {
            self.segments.remove(&segment);
        }
    }

    pub(crate) fn insert_node(&mut self, node: Node<T>) -> NodeRef {
        let segment = self.primary;
        let key = self.primary_mut().nodes.insert(node);
        NodeRef { segment, key }
    }

    pub(crate) fn node(&self, node: NodeRef) -> Option<&Node<T>> {
        self.segments.get(&node.segment)?.nodes.get(node.key)
    }

    pub(crate) fn node_mut(&mut self, node: NodeRef) -> Option<&mut Node<T>> {
        self.segments.get_mut(&node.segment)?.nodes.get_mut(node.key)
    }

    pub(crate) fn contains_node(&self, node: NodeRef) -> bool {
        self.node(node).is_some()
    }

    /// Removes a node, together with its Root Index slot if it had one.
    pub(crate) fn remove_node(&mut self, node: NodeRef) -> Option<Node<T>> {
        let segment = self.segments.get_mut(&node.segment)?;
        segment.roots.remove(node.key);
        let removed = segment.nodes.remove(node.key);
        self.prune(node.segment);
        removed
    }

    /// Allocates a ring entry for `node`, linked to itself.
    pub(crate) fn insert_entry(&mut self, node: NodeRef) -> EntryRef {
        let segment = self.primary;
        let key = self.primary_mut().entries.insert_with_key(|key| {
            let this = EntryRef { segment, key };
            RingEntry {
                node,
                prev: this,
                next: this,
            }
        });
        EntryRef { segment, key }
    }

    pub(crate) fn entry(&self, entry: EntryRef) -> Option<&RingEntry> {
        self.segments.get(&entry.segment)?.entries.get(entry.key)
    }

    pub(crate) fn remove_entry(&mut self, entry: EntryRef) -> Option<RingEntry> {
        let removed = self
            .segments
            .get_mut(&entry.segment)?
            .entries
            .remove(entry.key);
        self.prune(entry.segment);
        removed
    }

    /// Root Index lookup: the ring entry of a root node.
    pub(crate) fn root_entry(&self, node: NodeRef) -> Option<EntryRef> {
        self.segments
            .get(&node.segment)?
            .roots
            .get(node.key)
            .copied()
    }

    pub(crate) fn register_root(&mut self, node: NodeRef, entry: EntryRef) {
        if let Some(segment) = self.segments.get_mut(&node.segment) {
            segment.roots.insert(node.key, entry);
        }
    }

    pub(crate) fn unregister_root(&mut self, node: NodeRef) -> Option<EntryRef> {
        self.segments.get_mut(&node.segment)?.roots.remove(node.key)
    }

    /// Number of nodes registered in the Root Index.
    pub(crate) fn root_index_len(&self) -> usize {
        self.segments.values().map(|s| s.roots.len()).sum()
    }

    /// Number of nodes stored, reachable or not.
    pub(crate) fn node_count(&self) -> usize {
        self.segments.values().map(|s| s.nodes.len()).sum()
    }

    /// Number of ring entries stored, linked or not.
    pub(crate) fn entry_count(&self) -> usize {
        self.segments.values().map(|s| s.entries.len()).sum()
    }

    #[cfg(test)]
    pub(crate) fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Takes ownership of every segment of `other`, leaving it a fresh,
    /// empty arena. References into either arena stay valid in `self`.
    pub(crate) fn absorb(&mut self, other: &mut Arena<T>) {
        let mut donor = std::mem::replace(other, Arena::new());
        if donor.segments.len() > self.segments.len() {
            std::mem::swap(&mut self.segments, &mut donor.segments);
        }
        self.segments.extend(donor.segments.drain());
        self.prune(donor.primary);
    }
}

impl<T> Index<NodeRef> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, node: NodeRef) -> &Node<T> {
        self.node(node)
            .unwrap_or_else(|| panic!("dangling node reference {node:?}"))
    }
}

impl<T> IndexMut<NodeRef> for Arena<T> {
    fn index_mut(&mut self, node: NodeRef) -> &mut Node<T> {
        self.node_mut(node)
            .unwrap_or_else(|| panic!("dangling node reference {node:?}"))
    }
}

impl<T> Index<EntryRef> for Arena<T> {
    type Output = RingEntry;

    fn index(&self, entry: EntryRef) -> &RingEntry {
        self.entry(entry)
            .unwrap_or_else(|| panic!("dangling ring entry reference {entry:?}"))
    }
}

impl<T> IndexMut<EntryRef> for Arena<T> {
    fn index_mut(&mut self, entry: EntryRef) -> &mut RingEntry {
        self.segments
            .get_mut(&entry.segment)
            .and_then(|s| s.entries.get_mut(entry.key))
            .unwrap_or_else(|| panic!("dangling ring entry reference {entry:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_round_trip() {
        let mut arena = Arena::new();
        let r = arena.insert_node(Node::new(42));
        assert_eq!(arena[r].value, 42);

        arena[r].value = 7;
        assert_eq!(arena.node(r).map(|n| n.value), Some(7));

        let removed = arena.remove_node(r);
        assert_eq!(removed.map(|n| n.value), Some(7));
        assert!(!arena.contains_node(r));
    }

    #[test]
    fn test_stale_key_does_not_resolve_after_reuse() {
        let mut arena = Arena::new();
        let old = arena.insert_node(Node::new(1));
        arena.remove_node(old);
        let new = arena.insert_node(Node::new(2));

        assert!(arena.node(old).is_none());
        assert_eq!(arena[new].value, 2);
    }

    #[test]
    fn test_entry_starts_self_linked() {
        let mut arena = Arena::new();
        let n = arena.insert_node(Node::new(0));
        let e = arena.insert_entry(n);
        assert_eq!(arena[e].prev, e);
        assert_eq!(arena[e].next, e);
        assert_eq!(arena[e].node, n);
    }

    #[test]
    fn test_root_index_follows_node_removal() {
        let mut arena = Arena::new();
        let n = arena.insert_node(Node::new(0));
        let e = arena.insert_entry(n);
        arena.register_root(n, e);
        assert_eq!(arena.root_entry(n), Some(e));
        assert_eq!(arena.root_index_len(), 1);

        arena.remove_node(n);
        assert_eq!(arena.root_index_len(), 0);
    }

    #[test]
    fn test_absorb_keeps_references_and_empties_donor() {
        let mut a = Arena::new();
        let mut b = Arena::new();
        let ra = a.insert_node(Node::new(1));
        let rb = b.insert_node(Node::new(2));

        a.absorb(&mut b);

        assert_eq!(a[ra].value, 1);
        assert_eq!(a[rb].value, 2);
        assert_eq!(a.node_count(), 2);
        assert_eq!(a.segment_count(), 2);
        assert_eq!(b.node_count(), 0);
        assert!(!b.contains_node(rb));
    }

    #[test]
    fn test_emptied_secondary_segment_is_dropped() {
        let mut a = Arena::new();
        let mut b = Arena::new();
        let rb = b.insert_node(Node::new(2));
        a.absorb(&mut b);
        assert_eq!(a.segment_count(), 2);

        a.remove_node(rb);
        assert_eq!(a.segment_count(), 1);

        // the primary segment survives even when empty
        let ra = a.insert_node(Node::new(3));
        a.remove_node(ra);
        assert_eq!(a.segment_count(), 1);
    }
}
