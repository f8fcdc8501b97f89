//! Best-first expansion over a lazily materialised node arena.
//!
//! Unlike textbook A* there is no closed set and no cost relaxation: a cell's node is created the
//! first time the cell is discovered and its costs stay fixed for the rest of the search, even if a
//! cheaper route to it turns up later. Paths produced this way are not always the cheapest, and
//! callers rely on them being reproduced exactly.
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::constraint::ConstraintGrid;
use crate::coords::GridConfig;
use crate::cost::CostModel;
use crate::error::{PathOutcome, PathResult, PathfindError};
use crate::node::{Node, NodeArena, NodeId, Slot};
use crate::path::link_path;
use crate::pattern::{step, NeighborPattern};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

pub(crate) struct Search<'a, M> {
    pub config: &'a GridConfig,
    pub constraints: &'a ConstraintGrid,
    pub pattern: &'a NeighborPattern,
    pub cost_model: &'a M,
    pub arena: &'a mut NodeArena,
    pub start: NodeId,
    pub target: NodeId,
    pub budget: usize,
}

impl<M: CostModel> Search<'_, M> {
    pub fn run(self, find_nearest: bool) -> PathResult<PathOutcome> {
        // Insertion ordered, so ties on total cost go to whichever node was discovered first.
        let mut open: FxIndexSet<NodeId> = FxIndexSet::default();
        open.insert(self.start);
        let target_cell = self.arena[self.target].cell;
        debug!(
            "Searching from {} to {} with {} offsets, budget {}",
            self.arena[self.start].cell,
            target_cell,
            self.pattern.len(),
            self.budget
        );

        for iteration in 0..self.budget {
            let cheapest = open
                .iter()
                .position_min_by_key(|id| self.arena[**id].total_cost());
            let Some(current) = cheapest.and_then(|ix| open.shift_remove_index(ix)) else {
                return self.exhausted(find_nearest);
            };
            // Keep the best path so far traceable from the start node.
            link_path(self.arena, current);

            let current_cell = self.arena[current].cell;
            let current_cost = self.arena[current].path_cost;
            for offset in self.pattern.iter() {
                let Some(cell) = step(current_cell, *offset) else {
                    continue;
                };
                if !self.constraints.is_walkable(cell) {
                    continue;
                }
                if cell == target_cell {
                    self.arena[current].successor = Some(self.target);
                    self.arena[self.target].predecessor = Some(current);
                    link_path(self.arena, self.target);
                    info!(
                        "Found path to {} after {} iterations, {} nodes materialised",
                        target_cell,
                        iteration + 1,
                        self.arena.len()
                    );
                    return Ok(PathOutcome::Found);
                }
                if self.arena.slot(cell) == Slot::Unvisited {
                    let mut node = Node::new(
                        self.config.grid_to_world(cell),
                        cell,
                        current_cost + self.cost_model.step_cost(*offset),
                        self.cost_model.heuristic(cell, target_cell),
                    );
                    node.predecessor = Some(current);
                    open.insert(self.arena.insert(node));
                }
            }
        }

        warn!(
            "Checked more than {} times without resolving the search, is {} unreachable?",
            self.budget, target_cell
        );
        Err(PathfindError::IterationBudgetExceeded {
            budget: self.budget,
        })
    }

    /// The open set ran dry without reaching the target.
    fn exhausted(self, find_nearest: bool) -> PathResult<PathOutcome> {
        let start_cell = self.arena[self.start].cell;
        let target_cell = self.arena[self.target].cell;
        if !find_nearest {
            warn!("{} is not reachable from {}", target_cell, start_cell);
            return Err(PathfindError::TargetUnreachable {
                start: start_cell,
                target: target_cell,
            });
        }
        let target_position = self.arena[self.target].position;
        let nearest = self
            .arena
            .visited()
            .filter(|id| *id != self.start && *id != self.target)
            .min_by(|a, b| {
                let da = self.arena[*a].position.distance_squared(target_position);
                let db = self.arena[*b].position.distance_squared(target_position);
                da.total_cmp(&db)
            })
            .unwrap_or(self.start);
        link_path(self.arena, nearest);
        info!(
            "{} is not reachable from {}, settling for nearest cell {}",
            target_cell, start_cell, self.arena[nearest].cell
        );
        Ok(PathOutcome::Partial { nearest })
    }
}
