use crate::node::{Node, NodeArena, NodeId};

/// Turns the predecessor chain ending at `terminal` into a forward chain: every node on the way
/// back to the root gets its successor pointed at the node after it, and `terminal` itself becomes
/// the end of the chain.
pub(crate) fn link_path(arena: &mut NodeArena, terminal: NodeId) {
    arena[terminal].successor = None;
    let mut current = terminal;
    while let Some(predecessor) = arena[current].predecessor {
        arena[predecessor].successor = Some(current);
        current = predecessor;
    }
}

/// Walks successor links from a node until the chain ends.
#[derive(Clone, Debug)]
pub struct PathIter<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a> PathIter<'a> {
    pub fn new(arena: &'a NodeArena, from: Option<NodeId>) -> PathIter<'a> {
        PathIter {
            arena,
            next: from,
            remaining: arena.len(),
        }
    }
}

impl<'a> Iterator for PathIter<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        // A chain can visit each node at most once, anything longer is a cycle.
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        let node = self.arena.get(id)?;
        self.remaining -= 1;
        self.next = node.successor;
        Some((id, node))
    }
}
