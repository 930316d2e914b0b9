//! Root ring: the circular doubly linked list of tree roots
//!
//! Each entry references exactly one root. The ring caches the entry holding
//! the smallest root value; by heap order in every tree, that is also the
//! smallest value in the whole heap. Entries are registered in the arena's
//! Root Index in the same step that links them, and unregistered in the same
//! step that unlinks them.

use crate::arena::{Arena, EntryRef, NodeRef};

/// One link of the root ring
#[derive(Debug)]
pub(crate) struct RingEntry {
    pub(crate) node: NodeRef,
    pub(crate) prev: EntryRef,
    pub(crate) next: EntryRef,
}

/// Head and cached minimum of a root ring.
///
/// `head` is `None` exactly when `min` is `None`, exactly when the ring is
/// empty.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RootRing {
    head: Option<EntryRef>,
    min: Option<EntryRef>,
}

impl RootRing {
    pub(crate) fn new() -> Self {
        RootRing::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub(crate) fn head(&self) -> Option<EntryRef> {
        self.head
    }

    pub(crate) fn min(&self) -> Option<EntryRef> {
        self.min
    }

    pub(crate) fn min_node<T>(&self, arena: &Arena<T>) -> Option<NodeRef> {
        self.min.map(|e| arena[e].node)
    }

    /// Points the cached minimum at `entry` without comparing.
    ///
    /// Used by delete, which promotes a node to the front before extracting it.
    pub(crate) fn force_min(&mut self, entry: EntryRef) {
        self.min = Some(entry);
    }

    /// Links the root `node` into the ring just before the current minimum,
    /// registers it in the Root Index and updates the cached minimum.
    pub(crate) fn insert_root<T: Ord>(&mut self, arena: &mut Arena<T>, node: NodeRef) -> EntryRef {
        let entry = arena.insert_entry(node);
        arena.register_root(node, entry);

        match self.min.or(self.head) {
            None => {
                self.head = Some(entry);
                self.min = Some(entry);
            }
            Some(anchor) => {
                let before = arena[anchor].prev;
                arena[entry].prev = before;
                arena[entry].next = anchor;
                arena[before].next = entry;
                arena[anchor].prev = entry;

                let smaller = match self.min {
                    Some(min) => arena[node].value < arena[arena[min].node].value,
                    None => true,
                };
                if smaller {
                    self.min = Some(entry);
                }
            }
        }
        entry
    }

    /// Unlinks `entry`, drops it from the Root Index and returns the root it
    /// referenced. The node itself is left in the arena.
    ///
    /// If `entry` was the cached minimum, the cache moves to its successor;
    /// the caller must rescan before relying on it again.
    pub(crate) fn remove_root<T>(&mut self, arena: &mut Arena<T>, entry: EntryRef) -> Option<NodeRef> {
        let RingEntry { node, prev, next } = arena.remove_entry(entry)?;
        arena.unregister_root(node);

        if next == entry {
            self.head = None;
            self.min = None;
        } else {
            arena[prev].next = next;
            arena[next].prev = prev;
            if self.head == Some(entry) {
                self.head = Some(next);
            }
            if self.min == Some(entry) {
                self.min = Some(next);
            }
        }
        Some(node)
    }

    /// Recomputes the cached minimum with one pass over the ring.
    /// Ties keep the earliest entry in ring order.
    pub(crate) fn rescan_min<T: Ord>(&mut self, arena: &Arena<T>) {
        let mut best: Option<EntryRef> = None;
        for entry in self.iter(arena) {
            let better = match best {
                None => true,
                Some(b) => arena[arena[entry].node].value < arena[arena[b].node].value,
            };
            if better {
                best = Some(entry);
            }
        }
        self.min = best;
    }

    /// Joins `other`'s ring onto this one in O(1). Both rings must already
    /// live in `arena`.
    pub(crate) fn splice<T: Ord>(&mut self, arena: &mut Arena<T>, other: RootRing) {
        let (head, other_head) = match (self.head, other.head) {
            (_, None) => return,
            (None, Some(_)) => {
                *self = other;
                return;
            }
            (Some(h), Some(o)) => (h, o),
        };

        let back = arena[head].prev;
        let other_back = arena[other_head].prev;
        arena[back].next = other_head;
        arena[other_head].prev = back;
        arena[other_back].next = head;
        arena[head].prev = other_back;

        if let (Some(min), Some(other_min)) = (self.min, other.min) {
            if arena[arena[other_min].node].value < arena[arena[min].node].value {
                self.min = Some(other_min);
            }
        }
    }

    /// Entries in ring order starting at the head.
    pub(crate) fn iter<'a, T>(&self, arena: &'a Arena<T>) -> RingIter<'a, T> {
        RingIter {
            arena,
            head: self.head,
            next: self.head,
        }
    }
}

pub(crate) struct RingIter<'a, T> {
    arena: &'a Arena<T>,
    head: Option<EntryRef>,
    next: Option<EntryRef>,
}

impl<T> Iterator for RingIter<'_, T> {
    type Item = EntryRef;

    fn next(&mut self) -> Option<EntryRef> {
        let current = self.next?;
        let following = self.arena[current].next;
        self.next = if Some(following) == self.head {
            None
        } else {
            Some(following)
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn ring_of(values: &[i32]) -> (Arena<i32>, RootRing) {
        let mut arena = Arena::new();
        let mut ring = RootRing::new();
        for &v in values {
            let n = arena.insert_node(Node::new(v));
            ring.insert_root(&mut arena, n);
        }
        (arena, ring)
    }

    fn values(arena: &Arena<i32>, ring: &RootRing) -> Vec<i32> {
        ring.iter(arena).map(|e| arena[arena[e].node].value).collect()
    }

    #[test]
    fn test_insert_tracks_min() {
        let (arena, ring) = ring_of(&[5, 3, 8, 1, 4]);
        assert_eq!(ring.min_node(&arena).map(|n| arena[n].value), Some(1));
        assert_eq!(values(&arena, &ring).len(), 5);
        assert_eq!(arena.root_index_len(), 5);
    }

    #[test]
    fn test_remove_only_entry_empties_ring() {
        let (mut arena, mut ring) = ring_of(&[9]);
        let head = ring.head().unwrap();
        let node = ring.remove_root(&mut arena, head).unwrap();

        assert!(ring.is_empty());
        assert!(ring.min().is_none());
        assert_eq!(arena.root_entry(node), None);
        assert_eq!(arena.entry_count(), 0);
    }

    #[test]
    fn test_remove_head_advances_head() {
        let (mut arena, mut ring) = ring_of(&[1, 2, 3]);
        let head = ring.head().unwrap();
        ring.remove_root(&mut arena, head);
        ring.rescan_min(&arena);

        let mut remaining = values(&arena, &ring);
        remaining.sort();
        assert_eq!(remaining, vec![2, 3]);
        assert_eq!(ring.min_node(&arena).map(|n| arena[n].value), Some(2));
    }

    #[test]
    fn test_splice_joins_rings_and_picks_smaller_min() {
        let (mut arena, mut ring) = ring_of(&[4, 6]);
        let (mut other_arena, other_ring) = ring_of(&[5, 2]);

        arena.absorb(&mut other_arena);
        ring.splice(&mut arena, other_ring);

        let mut all = values(&arena, &ring);
        all.sort();
        assert_eq!(all, vec![2, 4, 5, 6]);
        assert_eq!(ring.min_node(&arena).map(|n| arena[n].value), Some(2));
    }

    #[test]
    fn test_rescan_prefers_earliest_on_ties() {
        let (arena, mut ring) = ring_of(&[3, 3, 3]);
        ring.rescan_min(&arena);
        assert_eq!(ring.min(), ring.head());
    }
}
