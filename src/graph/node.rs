use super::node_arena::NodeArena;

/// Stable handle of a [`LetterNode`] inside a [`WordIndex`](super::index::WordIndex).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("node arena holds at most u32::MAX nodes"))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One letter at one position along every word sharing the prefix that leads here.
///
/// Alternatives for the same position hang off each other through `sibling`;
/// the next position starts at `child`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterNode {
    letter: char,
    terminal: bool,
    sibling: Option<NodeId>,
    child: Option<NodeId>,
}

impl LetterNode {
    /// Creates a non-terminal node with no links.
    pub(crate) fn new(letter: char) -> Self {
        LetterNode {
            letter,
            terminal: false,
            sibling: None,
            child: None,
        }
    }

    /// The letter this node stands for.
    #[inline]
    pub fn letter(&self) -> char {
        self.letter
    }

    /// True if some inserted word ends exactly at this node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Next alternative letter at the same position, if any.
    #[inline]
    pub fn sibling(&self) -> Option<NodeId> {
        self.sibling
    }

    /// First node of the following position, if any word continues past here.
    #[inline]
    pub fn child(&self) -> Option<NodeId> {
        self.child
    }

    /// Marks the node terminal. Returns true if it was not terminal before.
    pub(crate) fn set_terminal(&mut self) -> bool {
        !std::mem::replace(&mut self.terminal, true)
    }

    pub(crate) fn set_sibling(&mut self, sibling: NodeId) {
        debug_assert!(self.sibling.is_none(), "sibling link is only ever set once");
        self.sibling = Some(sibling);
    }

    pub(crate) fn set_child(&mut self, child: NodeId) {
        debug_assert!(self.child.is_none(), "child link is only ever set once");
        self.child = Some(child);
    }
}

/// An iterator over a sibling chain, in insertion order.
#[derive(Clone)]
pub struct SiblingIter<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl<'a> SiblingIter<'a> {
    pub(crate) fn new(arena: &'a NodeArena, head: Option<NodeId>) -> Self {
        SiblingIter { arena, next: head }
    }
}

impl<'a> Iterator for SiblingIter<'a> {
    type Item = (NodeId, &'a LetterNode);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = &self.arena[id];
        self.next = node.sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_node_has_no_links() {
        let n = LetterNode::new('A');
        assert_eq!(n.letter(), 'A');
        assert!(!n.is_terminal());
        assert_eq!(n.sibling(), None);
        assert_eq!(n.child(), None);
    }

    #[test]
    fn set_terminal_reports_first_transition_only() {
        let mut n = LetterNode::new('A');
        assert!(n.set_terminal());
        assert!(!n.set_terminal());
        assert!(n.is_terminal());
    }

    #[test]
    fn empty_chain() {
        let arena = NodeArena::new();
        assert_eq!(SiblingIter::new(&arena, None).next(), None);
    }

    #[test]
    fn chain_in_insertion_order() {
        let mut arena = NodeArena::new();
        let c = arena.alloc(LetterNode::new('C'));
        let a = arena.alloc(LetterNode::new('A'));
        let t = arena.alloc(LetterNode::new('T'));
        arena[c].set_sibling(a);
        arena[a].set_sibling(t);
        let letters: String = SiblingIter::new(&arena, Some(c))
            .map(|(_, node)| node.letter())
            .collect();
        assert_eq!(letters, "CAT");
    }

    #[test]
    fn chain_from_middle() {
        let mut arena = NodeArena::new();
        let x = arena.alloc(LetterNode::new('X'));
        let y = arena.alloc(LetterNode::new('Y'));
        arena[x].set_sibling(y);
        let ids: Vec<NodeId> = SiblingIter::new(&arena, Some(y)).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![y]);
    }
}
