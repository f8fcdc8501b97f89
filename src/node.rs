use core::ops::{Index, IndexMut};

use glam::{IVec2, Vec3};

/// Stable handle to a [Node] inside a [NodeArena]. Only valid for the search that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Search record for one visited cell. Costs are fixed when the node is created; only the links
/// change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub position: Vec3,
    pub cell: IVec2,
    /// Cost accumulated from the start node.
    pub path_cost: i32,
    /// Estimated cost to the target.
    pub heuristic_cost: i32,
    /// Next node on the path currently believed best.
    pub successor: Option<NodeId>,
    /// Node this one was discovered from.
    pub predecessor: Option<NodeId>,
}

impl Node {
    pub fn new(position: Vec3, cell: IVec2, path_cost: i32, heuristic_cost: i32) -> Node {
        Node {
            position,
            cell,
            path_cost,
            heuristic_cost,
            successor: None,
            predecessor: None,
        }
    }

    pub fn total_cost(&self) -> i32 {
        self.path_cost + self.heuristic_cost
    }
}

/// Per-cell state of the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Unvisited,
    Visited(NodeId),
}

/// Owns every node created during one search, plus a `size` x `size` table mapping cells to the
/// node materialised there. Nodes are never removed until the next [reset](Self::reset).
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    size: usize,
    slots: Vec<Slot>,
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new(size: usize) -> NodeArena {
        NodeArena {
            size,
            slots: vec![Slot::Unvisited; size * size],
            nodes: Vec::new(),
        }
    }

    /// Drops every node and resizes the cell table, leaving all cells unvisited.
    pub fn reset(&mut self, size: usize) {
        self.size = size;
        self.nodes.clear();
        self.slots.clear();
        self.slots.resize(size * size, Slot::Unvisited);
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn ix(&self, cell: IVec2) -> Option<usize> {
        let n = self.size as i32;
        (cell.x >= 0 && cell.y >= 0 && cell.x < n && cell.y < n)
            .then(|| cell.y as usize * self.size + cell.x as usize)
    }

    /// Out-of-range cells read as unvisited.
    pub fn slot(&self, cell: IVec2) -> Slot {
        self.ix(cell).map_or(Slot::Unvisited, |ix| self.slots[ix])
    }

    pub fn node_at(&self, cell: IVec2) -> Option<&Node> {
        match self.slot(cell) {
            Slot::Visited(id) => Some(&self.nodes[id.0]),
            Slot::Unvisited => None,
        }
    }

    /// Materialises `node` in its cell. The cell must be unvisited and inside the grid.
    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        debug_assert!(self.ix(node.cell).is_some(), "cell {} outside arena", node.cell);
        let ix = node.cell.y as usize * self.size + node.cell.x as usize;
        debug_assert_eq!(self.slots[ix], Slot::Unvisited);
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.slots[ix] = Slot::Visited(id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Visited cells in row-major order (y outer, x inner).
    pub fn visited(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Visited(id) => Some(*id),
            Slot::Unvisited => None,
        })
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}
