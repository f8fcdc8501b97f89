use glam::IVec2;

/// Scores moves for the search. Whatever the model, a node's costs are computed once when it is
/// discovered and never lowered afterwards.
pub trait CostModel {
    /// Cost of a single step by `offset`.
    fn step_cost(&self, offset: IVec2) -> i32;

    /// Estimated remaining cost from `cell` to `target`.
    fn heuristic(&self, cell: IVec2, target: IVec2) -> i32;
}

/// The legacy scoring: a step costs `dx² + dy²` and the estimate is the squared axis distance
/// `|tx - x|² + |ty - y|²`. Diagonal steps are cheaper per unit of progress than straight ones,
/// and long jumps (knight moves) are penalised quadratically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

impl CostModel for SquaredEuclidean {
    fn step_cost(&self, offset: IVec2) -> i32 {
        offset.dot(offset)
    }

    fn heuristic(&self, cell: IVec2, target: IVec2) -> i32 {
        let delta = (target - cell).abs();
        delta.dot(delta)
    }
}

/// Squared step costs without any estimate, so nodes are expanded purely in order of accumulated
/// cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniformHeuristic;

impl CostModel for UniformHeuristic {
    fn step_cost(&self, offset: IVec2) -> i32 {
        SquaredEuclidean.step_cost(offset)
    }

    fn heuristic(&self, _: IVec2, _: IVec2) -> i32 {
        0
    }
}
