use core::fmt;

use glam::{IVec2, Vec3};
use log::{debug, warn};

use crate::constraint::{Components, ConstraintGrid};
use crate::coords::GridConfig;
use crate::cost::{CostModel, SquaredEuclidean};
use crate::endpoint::Endpoint;
use crate::error::{PathOutcome, PathResult, PathfindError};
use crate::node::{Node, NodeArena, NodeId};
use crate::path::PathIter;
use crate::pattern::NeighborPattern;
use crate::search::Search;

/// Routes one agent across a square grid. Owns the constraint grid and the nodes of the last search;
/// [pathfind](Self::pathfind) takes `&mut self`, so a single instance can never run two searches at
/// once. Keep one instance per agent.
#[derive(Clone, Debug)]
pub struct Pathfinder<M = SquaredEuclidean> {
    config: GridConfig,
    cost_model: M,
    pattern: NeighborPattern,
    constraints: ConstraintGrid,
    start: Endpoint,
    target: Endpoint,
    max_iterations: Option<usize>,
    arena: NodeArena,
    start_node: Option<NodeId>,
    target_node: Option<NodeId>,
}

impl Pathfinder {
    pub fn new(config: GridConfig) -> PathResult<Pathfinder> {
        Pathfinder::with_cost_model(config, SquaredEuclidean)
    }
}

impl<M: CostModel> Pathfinder<M> {
    pub fn with_cost_model(config: GridConfig, cost_model: M) -> PathResult<Pathfinder<M>> {
        config.validate()?;
        Ok(Pathfinder {
            config,
            cost_model,
            pattern: NeighborPattern::default(),
            constraints: ConstraintGrid::reset(config.size),
            start: Endpoint::default(),
            target: Endpoint::default(),
            max_iterations: None,
            arena: NodeArena::new(config.size),
            start_node: None,
            target_node: None,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Changes the grid side length. The constraint grid is reset to all walkable at the next
    /// search if its size no longer matches.
    pub fn set_grid_size(&mut self, size: usize) -> PathResult<()> {
        let config = GridConfig { size, ..self.config };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_cell_size(&mut self, cell_size: f32) -> PathResult<()> {
        let config = GridConfig {
            cell_size,
            ..self.config
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_origin(&mut self, origin: Vec3) {
        self.config.origin = origin;
    }

    pub fn world_to_grid(&self, position: Vec3) -> IVec2 {
        self.config.world_to_grid(position)
    }

    pub fn grid_to_world(&self, cell: IVec2) -> Vec3 {
        self.config.grid_to_world(cell)
    }

    /// Replaces the constraint grid with the AND of `sources`. On error the current grid is kept.
    pub fn set_constraints(&mut self, sources: &[ConstraintGrid]) -> PathResult<()> {
        self.constraints = ConstraintGrid::merged(self.config.size, sources)?;
        Ok(())
    }

    pub fn constraints(&self) -> &ConstraintGrid {
        &self.constraints
    }

    /// Connected components of the current constraint grid under the current pattern.
    pub fn components(&self) -> Components {
        self.constraints.components(&self.pattern)
    }

    pub fn neighbor_pattern(&self) -> &NeighborPattern {
        &self.pattern
    }

    pub fn set_neighbor_pattern(&mut self, pattern: NeighborPattern) {
        self.pattern = pattern;
    }

    pub fn start(&self) -> &Endpoint {
        &self.start
    }

    pub fn set_start(&mut self, start: impl Into<Endpoint>) {
        self.start = start.into();
    }

    pub fn target(&self) -> &Endpoint {
        &self.target
    }

    pub fn set_target(&mut self, target: impl Into<Endpoint>) {
        self.target = target.into();
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
            .unwrap_or(self.config.size * self.config.size + 1)
    }

    /// Overrides the default budget of `size² + 1` iterations. [None] restores the default.
    pub fn set_max_iterations(&mut self, max_iterations: Option<usize>) {
        self.max_iterations = max_iterations;
    }

    /// Searches from the start endpoint to the target endpoint, discarding the previous search.
    ///
    /// On success the forward chain from [start_node](Self::start_node) leads either to the target
    /// ([PathOutcome::Found]) or, if `find_nearest` is set and the target cannot be reached, to the
    /// reachable cell closest to it ([PathOutcome::Partial]).
    pub fn pathfind(&mut self, find_nearest: bool) -> PathResult<PathOutcome> {
        let size = self.config.size;
        if !self.constraints.is_square(size) {
            debug!(
                "Constraint grid is {}x{} but the grid is {}x{}, resetting it",
                self.constraints.width(),
                self.constraints.height(),
                size,
                size
            );
            self.constraints = ConstraintGrid::reset(size);
        }
        self.arena.reset(size);
        self.start_node = None;
        self.target_node = None;

        let start_cell = self.world_to_grid(self.start.position());
        let target_cell = self.world_to_grid(self.target.position());
        if start_cell == target_cell {
            warn!("Start and target are both at {}, nothing to search", start_cell);
            return Err(PathfindError::SameCell { cell: start_cell });
        }
        if self.pattern.is_empty() {
            warn!("There are no neighbours to check, the agent would stand still forever");
            return Err(PathfindError::NoNeighborPattern);
        }

        let start = self
            .arena
            .insert(Node::new(self.grid_to_world(start_cell), start_cell, 0, 0));
        let target = self
            .arena
            .insert(Node::new(self.grid_to_world(target_cell), target_cell, 0, 0));
        self.start_node = Some(start);
        self.target_node = Some(target);

        let budget = self.max_iterations();
        Search {
            config: &self.config,
            constraints: &self.constraints,
            pattern: &self.pattern,
            cost_model: &self.cost_model,
            arena: &mut self.arena,
            start,
            target,
            budget,
        }
        .run(find_nearest)
    }

    /// Every node materialised by the last search.
    pub fn nodes(&self) -> &NodeArena {
        &self.arena
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn start_node(&self) -> Option<&Node> {
        self.start_node.and_then(|id| self.arena.get(id))
    }

    pub fn target_node(&self) -> Option<&Node> {
        self.target_node.and_then(|id| self.arena.get(id))
    }

    /// The node after the start node on the current path, if there is one.
    pub fn next_step(&self) -> Option<&Node> {
        self.start_node()?.successor.and_then(|id| self.arena.get(id))
    }

    /// Nodes of the current path from the start node onwards.
    pub fn path(&self) -> PathIter<'_> {
        PathIter::new(&self.arena, self.start_node)
    }

    pub fn path_cells(&self) -> Vec<IVec2> {
        self.path().map(|(_, node)| node.cell).collect()
    }
}

/// Draws the last search: `#` blocked, `S` start, `G` target, `*` path, `o` other visited cells.
impl<M: CostModel> fmt::Display for Pathfinder<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let path = self.path_cells();
        let start = self.start_node().map(|n| n.cell);
        let target = self.target_node().map(|n| n.cell);
        for y in 0..self.constraints.height() as i32 {
            let row = (0..self.constraints.width() as i32)
                .map(|x| {
                    let cell = IVec2::new(x, y);
                    if Some(cell) == start {
                        'S'
                    } else if Some(cell) == target {
                        'G'
                    } else if !self.constraints.is_walkable(cell) {
                        '#'
                    } else if path.contains(&cell) {
                        '*'
                    } else if self.arena.node_at(cell).is_some() {
                        'o'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
