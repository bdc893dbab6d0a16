//! Index-addressed arena for letter nodes.
//!
//! Nodes are never freed individually; the whole arena drops at once, so
//! long word chains never recurse on teardown.

use std::ops::{Index, IndexMut};

use super::node::{LetterNode, NodeId, SiblingIter};

#[derive(Clone)]
pub(crate) struct NodeArena {
    nodes: Vec<LetterNode>,
}

impl NodeArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    /// Stores `node` and returns its handle. Handles stay valid for the
    /// lifetime of the arena.
    pub fn alloc(&mut self, node: LetterNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the number of nodes allocated in this arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates the sibling chain starting at `head`.
    pub fn siblings(&self, head: Option<NodeId>) -> SiblingIter<'_> {
        SiblingIter::new(self, head)
    }
}

impl Index<NodeId> for NodeArena {
    type Output = LetterNode;

    #[inline]
    fn index(&self, id: NodeId) -> &LetterNode {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut LetterNode {
        &mut self.nodes[id.index()]
    }
}
