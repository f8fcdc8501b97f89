//! # tactics_pathfinding
//!
//! Grid pathfinding for turn-based tactics agents. A [Pathfinder] routes one agent from a start
//! position to a target position across a square grid, moving by a configurable
//! [NeighborPattern] (rook, bishop, knight, king or any custom set of offsets) and honouring a
//! boolean walkability [ConstraintGrid] merged from any number of sources.
//!
//! The search is a best-first expansion with squared-distance costs over nodes that are created
//! lazily, one per discovered cell, and never re-costed. It is bounded to `size² + 1` iterations
//! and can fall back to the reachable cell nearest to the target when the target itself cannot be
//! reached. The result is a forward-linked chain of [Node]s starting at the start node.
//!
//! ```
//! use glam::{IVec2, Vec3};
//! use tactics_pathfinding::{GridConfig, NeighborPattern, PathOutcome, Pathfinder};
//!
//! let mut pathfinder = Pathfinder::new(GridConfig::new(5, 1.0, Vec3::ZERO)).unwrap();
//! pathfinder.set_neighbor_pattern(NeighborPattern::king());
//! pathfinder.set_start(pathfinder.grid_to_world(IVec2::new(0, 0)));
//! pathfinder.set_target(pathfinder.grid_to_world(IVec2::new(4, 4)));
//! assert_eq!(pathfinder.pathfind(false), Ok(PathOutcome::Found));
//! assert_eq!(pathfinder.path().count(), 5);
//! ```
pub mod constraint;
pub mod coords;
pub mod cost;
pub mod endpoint;
pub mod error;
pub mod node;
pub mod path;
pub mod pathfinder;
pub mod pattern;
mod search;

pub use constraint::{Components, ConstraintGrid};
pub use coords::GridConfig;
pub use cost::{CostModel, SquaredEuclidean, UniformHeuristic};
pub use endpoint::{Anchor, Endpoint};
pub use error::{PathOutcome, PathResult, PathfindError};
pub use node::{Node, NodeArena, NodeId, Slot};
pub use path::PathIter;
pub use pathfinder::Pathfinder;
pub use pattern::NeighborPattern;

/// Inline capacity of offset lists; covers every preset pattern.
pub(crate) const N_SMALLVEC_SIZE: usize = 8;
