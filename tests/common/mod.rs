//! Helpers shared by the integration tests: a brute-force reference search and path checks.
#![allow(dead_code)]

use std::collections::VecDeque;

use glam::{IVec2, Vec3};
use tactics_pathfinding::{ConstraintGrid, GridConfig, NeighborPattern, Pathfinder};

/// Unit cells centred on the world origin.
pub fn pathfinder(size: usize, pattern: NeighborPattern) -> Pathfinder {
    let mut pathfinder = Pathfinder::new(GridConfig::new(size, 1.0, Vec3::ZERO)).unwrap();
    pathfinder.set_neighbor_pattern(pattern);
    pathfinder
}

pub fn route(pathfinder: &mut Pathfinder, start: IVec2, target: IVec2) {
    let start = pathfinder.grid_to_world(start);
    let target = pathfinder.grid_to_world(target);
    pathfinder.set_start(start);
    pathfinder.set_target(target);
}

/// Breadth-first distances in steps from `start` to every cell it can reach, `None` elsewhere.
pub fn bfs(grid: &ConstraintGrid, pattern: &NeighborPattern, start: IVec2) -> Vec<Option<usize>> {
    let (w, h) = (grid.width(), grid.height());
    let ix = |c: IVec2| c.y as usize * w + c.x as usize;
    let mut dist = vec![None; w * h];
    let mut queue = VecDeque::new();
    dist[ix(start)] = Some(0);
    queue.push_back(start);
    while let Some(cell) = queue.pop_front() {
        let d = dist[ix(cell)].unwrap();
        for offset in pattern.iter() {
            let next = cell + *offset;
            if grid.is_walkable(next) && dist[ix(next)].is_none() {
                dist[ix(next)] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

pub fn bfs_steps(
    grid: &ConstraintGrid,
    pattern: &NeighborPattern,
    start: IVec2,
    goal: IVec2,
) -> Option<usize> {
    bfs(grid, pattern, start)[goal.y as usize * grid.width() + goal.x as usize]
}

/// Asserts that every step of `cells` is a pattern move onto a walkable cell.
pub fn assert_valid_path(cells: &[IVec2], grid: &ConstraintGrid, pattern: &NeighborPattern) {
    for step in cells.windows(2) {
        assert!(
            pattern.contains(step[1] - step[0]),
            "{} -> {} is not a legal move",
            step[0],
            step[1]
        );
        assert!(grid.is_walkable(step[1]), "{} is blocked", step[1]);
    }
}
