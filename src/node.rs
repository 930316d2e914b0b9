//! Tree nodes and the two primitives that change tree shape
//!
//! A node's children sit in positional slots. Cutting a child vacates its slot
//! without shifting any sibling, so every child's recorded slot index stays
//! correct after a cut and a detach is O(1). Vacant slots at the tail of the
//! slot array are trimmed immediately; interior vacancies remain until the
//! slots after them empty out.
//!
//! `rank` is only ever changed by [`adopt`] and [`detach`]; the validator
//! recomputes it from the slot array to catch drift.

use crate::arena::{Arena, NodeRef};
use crate::rank::{checked_increment, saturating_decrement, Rank};
use smallvec::SmallVec;

/// Child slot array; most nodes have few children.
pub(crate) type Slots = SmallVec<[Option<NodeRef>; 4]>;

pub(crate) struct Node<T> {
    pub(crate) value: T,
    /// Lookup-only back reference; `None` for roots
    pub(crate) parent: Option<NodeRef>,
    /// Position in the parent's slot array; `None` for roots
    pub(crate) slot: Option<usize>,
    pub(crate) children: Slots,
    pub(crate) rank: Rank,
    /// Lost a child since it last became a child itself
    pub(crate) marked: bool,
}

impl<T> Node<T> {
    /// A singleton tree.
    pub(crate) fn new(value: T) -> Self {
        Node {
            value,
            parent: None,
            slot: None,
            children: SmallVec::new(),
            rank: 0,
            marked: false,
        }
    }

    pub(crate) fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Occupied child slots, in slot order.
    pub(crate) fn occupied(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.children.iter().flatten().copied()
    }
}

/// Makes the root `child` the last child of `parent`.
pub(crate) fn adopt<T>(arena: &mut Arena<T>, parent: NodeRef, child: NodeRef) {
    let p = &mut arena[parent];
    let slot = p.children.len();
    p.children.push(Some(child));
    p.rank = checked_increment(p.rank);

    let c = &mut arena[child];
    c.parent = Some(parent);
    c.slot = Some(slot);
    c.marked = false;
}

/// Cuts `node` out of its parent's slot array, leaving it parentless and
/// unmarked. Returns the former parent, or `None` if `node` was a root.
///
/// The caller is responsible for putting `node` on the root ring.
pub(crate) fn detach<T>(arena: &mut Arena<T>, node: NodeRef) -> Option<NodeRef> {
    let n = &mut arena[node];
    let parent = n.parent.take()?;
    let slot = n.slot.take();
    n.marked = false;

    let p = &mut arena[parent];
    if let Some(cell) = slot.and_then(|s| p.children.get_mut(s)) {
        if *cell == Some(node) {
            *cell = None;
            p.rank = saturating_decrement(p.rank);
        }
    }
    while p.children.last() == Some(&None) {
        p.children.pop();
    }
    Some(parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(arena: &mut Arena<i32>, n: i32) -> (NodeRef, Vec<NodeRef>) {
        let parent = arena.insert_node(Node::new(0));
        let mut kids = Vec::new();
        for v in 1..=n {
            let c = arena.insert_node(Node::new(v));
            adopt(arena, parent, c);
            kids.push(c);
        }
        (parent, kids)
    }

    #[test]
    fn test_adopt_assigns_consecutive_slots() {
        let mut arena = Arena::new();
        let (parent, kids) = family(&mut arena, 3);

        assert_eq!(arena[parent].rank, 3);
        for (i, kid) in kids.iter().enumerate() {
            assert_eq!(arena[*kid].parent, Some(parent));
            assert_eq!(arena[*kid].slot, Some(i));
            assert!(!arena[*kid].is_root());
        }
    }

    #[test]
    fn test_detach_keeps_sibling_slots_stable() {
        let mut arena = Arena::new();
        let (parent, kids) = family(&mut arena, 3);

        assert_eq!(detach(&mut arena, kids[0]), Some(parent));

        let p = &arena[parent];
        assert_eq!(p.rank, 2);
        assert_eq!(p.children.len(), 3);
        assert_eq!(p.children[0], None);
        assert_eq!(arena[kids[1]].slot, Some(1));
        assert_eq!(arena[kids[2]].slot, Some(2));
        assert!(arena[kids[0]].is_root());
        assert_eq!(arena[kids[0]].slot, None);
    }

    #[test]
    fn test_detach_trims_trailing_vacancies() {
        let mut arena = Arena::new();
        let (parent, kids) = family(&mut arena, 3);

        detach(&mut arena, kids[1]);
        assert_eq!(arena[parent].children.len(), 3);
        detach(&mut arena, kids[2]);
        assert_eq!(arena[parent].children.len(), 1);
        assert_eq!(arena[parent].occupied().collect::<Vec<_>>(), vec![kids[0]]);
    }

    #[test]
    fn test_detach_clears_mark() {
        let mut arena = Arena::new();
        let (_, kids) = family(&mut arena, 1);
        arena[kids[0]].marked = true;

        detach(&mut arena, kids[0]);
        assert!(!arena[kids[0]].marked);
    }

    #[test]
    fn test_detach_root_is_noop() {
        let mut arena = Arena::new();
        let lone = arena.insert_node(Node::new(5));
        assert_eq!(detach(&mut arena, lone), None);
    }
}
