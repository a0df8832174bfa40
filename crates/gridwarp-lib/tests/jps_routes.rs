//! Jump point search over plain grids.

use gridwarp_lib::{
    find_path, Error, Grid, Heuristic, JumpPointSearch, JumpPolicy, Point, SearchOptions,
};

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

#[test]
fn diagonal_route_across_open_grid() {
    let grid = Grid::new(5, 5);
    let path = find_path(
        &grid,
        p(0, 0),
        p(4, 4),
        JumpPolicy::AlwaysDiagonal,
        Heuristic::Octile,
        false,
    )
    .unwrap();

    assert_eq!(
        path,
        vec![p(0, 0), p(1, 1), p(2, 2), p(3, 3), p(4, 4)]
    );
}

#[test]
fn orthogonal_route_walks_unit_steps() {
    let grid = Grid::new(5, 5);
    let path = find_path(
        &grid,
        p(0, 2),
        p(4, 2),
        JumpPolicy::NeverDiagonal,
        Heuristic::Manhattan,
        false,
    )
    .unwrap();

    assert_eq!(
        path,
        vec![p(0, 2), p(1, 2), p(2, 2), p(3, 2), p(4, 2)]
    );
}

#[test]
fn route_detours_around_a_wall() {
    let mut grid = Grid::new(5, 5);
    for y in 0..4 {
        grid.set_walkable(2, y, false).unwrap();
    }

    let path = find_path(
        &grid,
        p(0, 0),
        p(4, 0),
        JumpPolicy::NeverDiagonal,
        Heuristic::Manhattan,
        false,
    )
    .unwrap();

    assert_eq!(path.first(), Some(&p(0, 0)));
    assert_eq!(path.last(), Some(&p(4, 0)));
    // forced through the single gap at (2, 4)
    assert!(path.contains(&p(2, 4)));
    // unit steps: cost equals step count, the shortest detour is 12 moves
    assert_eq!(path.len(), 13);
    for window in path.windows(2) {
        let dx = (window[1].x - window[0].x).abs();
        let dy = (window[1].y - window[0].y).abs();
        assert_eq!(dx + dy, 1, "non-unit step {:?} -> {:?}", window[0], window[1]);
    }
}

#[test]
fn unreachable_goal_yields_empty_path() {
    let mut grid = Grid::new(5, 5);
    for y in 0..5 {
        grid.set_walkable(2, y, false).unwrap();
    }

    let path = find_path(
        &grid,
        p(0, 0),
        p(4, 4),
        JumpPolicy::AlwaysDiagonal,
        Heuristic::Octile,
        false,
    )
    .unwrap();
    assert!(path.is_empty());
}

#[test]
fn start_equals_goal_yields_empty_path() {
    let grid = Grid::new(5, 5);
    let path = find_path(
        &grid,
        p(2, 2),
        p(2, 2),
        JumpPolicy::AlwaysDiagonal,
        Heuristic::Octile,
        false,
    )
    .unwrap();
    assert!(path.is_empty());
}

#[test]
fn endpoints_outside_the_grid_are_rejected() {
    let grid = Grid::new(5, 5);
    assert!(matches!(
        find_path(
            &grid,
            p(-1, 0),
            p(4, 4),
            JumpPolicy::AlwaysDiagonal,
            Heuristic::Octile,
            false,
        ),
        Err(Error::OutOfBounds { .. })
    ));
    assert!(matches!(
        find_path(
            &grid,
            p(0, 0),
            p(5, 0),
            JumpPolicy::NeverDiagonal,
            Heuristic::Manhattan,
            false,
        ),
        Err(Error::OutOfBounds { .. })
    ));
}

#[test]
fn reused_engine_matches_fresh_engine() {
    let mut grid = Grid::new(8, 8);
    grid.set_walkable(3, 3, false).unwrap();
    grid.set_walkable(3, 4, false).unwrap();
    grid.set_walkable(4, 3, false).unwrap();

    let options = SearchOptions {
        heuristic: Heuristic::Octile,
        ..SearchOptions::default()
    };

    let mut reused = JumpPointSearch::new(JumpPolicy::AlwaysDiagonal, options);
    let first = reused.find_path(&grid, p(0, 0), p(7, 7)).unwrap();
    let second = reused.find_path(&grid, p(7, 0), p(0, 7)).unwrap();

    let mut fresh = JumpPointSearch::new(JumpPolicy::AlwaysDiagonal, options);
    let fresh_second = fresh.find_path(&grid, p(7, 0), p(0, 7)).unwrap();

    assert!(!first.is_empty());
    assert_eq!(second, fresh_second);
}

#[test]
fn track_jump_recursion_records_scanned_cells() {
    let grid = Grid::new(5, 5);
    let options = SearchOptions {
        heuristic: Heuristic::Octile,
        track_jump_recursion: true,
        ..SearchOptions::default()
    };
    let mut engine = JumpPointSearch::new(JumpPolicy::AlwaysDiagonal, options);
    let path = engine.find_path(&grid, p(0, 0), p(4, 0)).unwrap();
    assert!(!path.is_empty());

    // the straight scan toward the goal touched the cells between
    let tested = (0..25).filter(|&i| engine.state().tested(i)).count();
    assert!(tested > 0);
}
