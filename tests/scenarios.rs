mod common;

use common::*;
use glam::{IVec2, Vec3};
use tactics_pathfinding::{
    ConstraintGrid, GridConfig, NeighborPattern, PathOutcome, PathfindError, Pathfinder,
    UniformHeuristic,
};

fn cells(points: &[(i32, i32)]) -> Vec<IVec2> {
    points.iter().map(|&(x, y)| IVec2::new(x, y)).collect()
}

/// Diagonal steps cost 2 per cell of progress on both axes, so a king walks the diagonal.
#[test]
fn king_walks_the_diagonal() {
    let mut pathfinder = pathfinder(5, NeighborPattern::king());
    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(4, 4));
    assert_eq!(pathfinder.pathfind(false), Ok(PathOutcome::Found));
    assert_eq!(
        pathfinder.path_cells(),
        cells(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)])
    );
    assert_eq!(
        pathfinder.start_node().unwrap().successor.map(|id| pathfinder.node(id).unwrap().cell),
        Some(IVec2::new(1, 1))
    );
}

/// Routes around a single obstacle
///  ___
/// |S#G|
/// |   |
/// |   |
///  ___
#[test]
fn rook_detours_around_obstacle() {
    let mut pathfinder = pathfinder(3, NeighborPattern::rook());
    let mut obstacles = ConstraintGrid::reset(3);
    obstacles.set(1, 0, false);
    pathfinder.set_constraints(&[obstacles]).unwrap();
    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(2, 0));
    assert_eq!(pathfinder.pathfind(false), Ok(PathOutcome::Found));
    let path = pathfinder.path_cells();
    assert!(!path.contains(&IVec2::new(1, 0)));
    assert_eq!(path, cells(&[(0, 0), (0, 1), (1, 1), (2, 1), (2, 0)]));
}

/// On an open grid the rook path is as short as a brute-force search finds.
#[test]
fn rook_matches_reference_on_open_grid() {
    for n in 2..=8 {
        let mut pathfinder = pathfinder(n, NeighborPattern::rook());
        let start = IVec2::new(0, 0);
        let end = IVec2::new(n as i32 - 1, n as i32 - 1);
        route(&mut pathfinder, start, end);
        assert_eq!(pathfinder.pathfind(false), Ok(PathOutcome::Found));
        let links = pathfinder.path().count() - 1;
        let reference = bfs_steps(pathfinder.constraints(), &NeighborPattern::rook(), start, end);
        assert_eq!(Some(links), reference);
        assert_eq!(links, 2 * (n - 1));
    }
}

#[test]
fn knight_crosses_the_board() {
    let pattern = NeighborPattern::knight();
    let mut pathfinder = pathfinder(8, pattern.clone());
    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(7, 7));
    assert_eq!(pathfinder.pathfind(false), Ok(PathOutcome::Found));
    let path = pathfinder.path_cells();
    assert_eq!(path.last(), Some(&IVec2::new(7, 7)));
    assert_valid_path(&path, pathfinder.constraints(), &pattern);
}

#[test]
fn same_cell_ignores_constraints() {
    let mut pathfinder = pathfinder(4, NeighborPattern::king());
    pathfinder
        .set_constraints(&[ConstraintGrid::new(4, 4, false)])
        .unwrap();
    let centre = pathfinder.grid_to_world(IVec2::new(1, 2));
    pathfinder.set_start(centre + Vec3::new(0.2, 0.0, -0.1));
    pathfinder.set_target(centre + Vec3::new(-0.3, 4.0, 0.2));
    assert_eq!(
        pathfinder.pathfind(true),
        Err(PathfindError::SameCell {
            cell: IVec2::new(1, 2)
        })
    );
}

#[test]
fn empty_pattern_fails_without_nodes() {
    let mut pathfinder = pathfinder(4, NeighborPattern::new([]));
    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(3, 0));
    assert_eq!(pathfinder.pathfind(true), Err(PathfindError::NoNeighborPattern));
    assert!(pathfinder.nodes().is_empty());
    assert!(pathfinder.start_node().is_none());
}

/// The goal in the corner is sealed off
///  _____
/// |S    |
/// |     |
/// |     |
/// |    #|
/// |   #G|
///  _____
#[test]
fn walled_target_falls_back_to_nearest_cell() {
    let walls = "
        .....
        .....
        .....
        ....#
        ...#.
    "
    .parse::<ConstraintGrid>()
    .unwrap();
    let pattern = NeighborPattern::rook();
    let mut pathfinder = pathfinder(5, pattern.clone());
    pathfinder.set_constraints(&[walls.clone()]).unwrap();
    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(4, 4));

    assert_eq!(
        pathfinder.pathfind(false),
        Err(PathfindError::TargetUnreachable {
            start: IVec2::new(0, 0),
            target: IVec2::new(4, 4)
        })
    );

    let Ok(PathOutcome::Partial { nearest }) = pathfinder.pathfind(true) else {
        panic!("expected a partial path\n{}", pathfinder);
    };
    assert_eq!(pathfinder.node(nearest).unwrap().cell, IVec2::new(3, 3));
    let path = pathfinder.path_cells();
    assert_eq!(path.first(), Some(&IVec2::new(0, 0)));
    assert_eq!(path.last(), Some(&IVec2::new(3, 3)));
    assert_valid_path(&path, &walls, &pattern);
    assert!(pathfinder.node(nearest).unwrap().successor.is_none());
}

#[test]
fn enclosed_start_yields_single_node_path() {
    let mut pathfinder = pathfinder(4, NeighborPattern::rook());
    let walls = "
        .#..
        #...
        ....
        ....
    "
    .parse::<ConstraintGrid>()
    .unwrap();
    pathfinder.set_constraints(&[walls]).unwrap();
    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(3, 3));
    let outcome = pathfinder.pathfind(true).unwrap();
    assert!(!outcome.is_complete());
    assert_eq!(pathfinder.path_cells(), cells(&[(0, 0)]));
    assert!(pathfinder.next_step().is_none());
}

/// Bishops can never change colour, so a neighbouring goal is out of reach.
#[test]
fn bishop_cannot_reach_other_colour() {
    let mut pathfinder = pathfinder(4, NeighborPattern::bishop());
    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(1, 0));
    assert!(!pathfinder.components().connected(IVec2::new(0, 0), IVec2::new(1, 0)));
    assert!(matches!(
        pathfinder.pathfind(false),
        Err(PathfindError::TargetUnreachable { .. })
    ));
}

/// Costs are fixed when a node is created and the chain always leads back to the start.
#[test]
fn node_costs_follow_their_predecessor() {
    let pattern = NeighborPattern::knight();
    let mut pathfinder = pathfinder(6, pattern);
    pathfinder
        .set_constraints(&["......\n.#..#.\n..##..".parse::<ConstraintGrid>().unwrap()])
        .unwrap();
    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(5, 5));
    pathfinder.pathfind(false).unwrap();
    let arena = pathfinder.nodes();
    let target = pathfinder.target_node().unwrap();
    for (_, node) in arena.iter() {
        if std::ptr::eq(node, target) {
            continue;
        }
        let Some(pred) = node.predecessor else {
            assert_eq!(node.cell, IVec2::new(0, 0));
            assert_eq!(node.path_cost, 0);
            continue;
        };
        let pred = &arena[pred];
        let step = node.cell - pred.cell;
        assert_eq!(node.path_cost, pred.path_cost + step.length_squared());
        let to_goal = IVec2::new(5, 5) - node.cell;
        assert_eq!(node.heuristic_cost, to_goal.length_squared());
    }
}

#[test]
fn later_search_discards_earlier_nodes() {
    let mut pathfinder = pathfinder(6, NeighborPattern::king());
    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(5, 0));
    pathfinder.pathfind(false).unwrap();
    route(&mut pathfinder, IVec2::new(5, 5), IVec2::new(4, 4));
    pathfinder.pathfind(false).unwrap();
    assert_eq!(pathfinder.nodes().len(), 2);
    assert_eq!(pathfinder.path_cells(), cells(&[(5, 5), (4, 4)]));
}

#[test]
fn uniform_heuristic_still_reaches_the_goal() {
    let pattern = NeighborPattern::king();
    let config = GridConfig::new(6, 2.0, Vec3::new(3.0, 0.0, 3.0));
    let mut pathfinder = Pathfinder::with_cost_model(config, UniformHeuristic).unwrap();
    pathfinder.set_neighbor_pattern(pattern.clone());
    pathfinder.set_start(pathfinder.grid_to_world(IVec2::new(0, 5)));
    pathfinder.set_target(pathfinder.grid_to_world(IVec2::new(5, 0)));
    assert_eq!(pathfinder.pathfind(false), Ok(PathOutcome::Found));
    let path = pathfinder.path_cells();
    assert_eq!(path.last(), Some(&IVec2::new(5, 0)));
    assert_valid_path(&path, pathfinder.constraints(), &pattern);
}

#[test]
fn window_pattern_drives_the_search() {
    // Only straight up or right, two cells at a time.
    //  . . x . .
    //  . . . . .
    //  . . N . x
    //  . . . . .
    //  . . . . .
    let mut mask = [false; 25];
    mask[2] = true;
    mask[2 * 5 + 4] = true;
    let pattern = NeighborPattern::from_window(5, &mask).unwrap();
    let mut pathfinder = pathfinder(5, pattern.clone());
    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(4, 2));
    assert_eq!(pathfinder.pathfind(false), Ok(PathOutcome::Found));
    let path = pathfinder.path_cells();
    assert_eq!(path.len(), 4);
    assert_valid_path(&path, pathfinder.constraints(), &pattern);

    route(&mut pathfinder, IVec2::new(0, 0), IVec2::new(1, 1));
    assert!(pathfinder.pathfind(false).is_err());
}
