use glam::IVec2;
use thiserror::Error;

use crate::node::NodeId;

/// Every way a call into the pathfinder can fail. None of these are fatal: the grid state stays
/// usable and the caller decides whether to retry, skip the turn or stay in place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathfindError {
    /// Start and target resolve to the same cell, the agent has already arrived.
    #[error("start and target both resolve to cell {cell}")]
    SameCell { cell: IVec2 },

    #[error("no neighbour offsets to check, the agent cannot move")]
    NoNeighborPattern,

    /// The open set ran dry before the target was reached and no fallback was requested.
    #[error("target cell {target} is not reachable from {start}")]
    TargetUnreachable { start: IVec2, target: IVec2 },

    #[error("search did not resolve within {budget} iterations")]
    IterationBudgetExceeded { budget: usize },

    /// A constraint source is larger than the grid along at least one axis.
    #[error("constraint source {index} is {width}x{height}, larger than the {size}x{size} grid")]
    ConstraintOverflow {
        index: usize,
        width: usize,
        height: usize,
        size: usize,
    },

    #[error("invalid grid: size {size}, cell size {cell_size}")]
    InvalidGrid { size: usize, cell_size: f32 },

    #[error("movement window of side {side} needs an odd side of at least 3 and {expected} entries, got {len}")]
    InvalidPatternWindow {
        side: usize,
        expected: usize,
        len: usize,
    },

    #[error("malformed grid text on line {line}: {reason}")]
    MalformedGrid { line: usize, reason: String },
}

pub type PathResult<T> = Result<T, PathfindError>;

/// The two successful terminal states of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    /// The forward chain from the start node ends at the target node.
    Found,
    /// The target could not be reached; the forward chain ends at the reachable node closest to it.
    Partial { nearest: NodeId },
}

impl PathOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, PathOutcome::Found)
    }
}
