//! Teleporter-aware routing: tunnels, chains, and wormholes.

use gridwarp_lib::{
    find_path, plan_path, Grid, Heuristic, JumpPolicy, PathRequest, Point, TunnelDirection,
};

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// A tunnel at (1,5) that drops the traveller at (8,5).
fn tunnel_express_grid() -> Grid {
    let mut grid = Grid::new(10, 10);
    grid.make_tunnel(p(1, 5), TunnelDirection::Right).unwrap();
    grid.link_tunnel(p(1, 5), p(8, 5)).unwrap();
    grid.setup_tunnels(vec![p(1, 5)]).unwrap();
    grid
}

#[test]
fn tunnel_hop_is_a_single_free_edge() {
    let grid = tunnel_express_grid();
    let path = find_path(
        &grid,
        p(0, 5),
        p(9, 5),
        JumpPolicy::TeleportOrthogonal,
        Heuristic::Manhattan,
        true,
    )
    .unwrap();

    assert_eq!(path, vec![p(0, 5), p(1, 5), p(8, 5), p(9, 5)]);
}

#[test]
fn plan_cost_counts_teleport_hops_as_free() {
    let grid = tunnel_express_grid();
    let plan = plan_path(&grid, &PathRequest::teleport(p(0, 5), p(9, 5))).unwrap();

    assert!(plan.is_reachable());
    assert_eq!(plan.step_count(), 3);
    // walk on, hop for free, walk off
    assert!((plan.cost - 2.0).abs() < 1e-9);
}

#[test]
fn multi_hop_chain_collapses_to_its_exit() {
    let mut grid = Grid::new(10, 10);
    grid.make_tunnel(p(2, 2), TunnelDirection::Down).unwrap();
    grid.make_tunnel(p(2, 6), TunnelDirection::Right).unwrap();
    grid.link_tunnel(p(2, 2), p(2, 6)).unwrap();
    grid.link_tunnel(p(2, 6), p(7, 6)).unwrap();
    grid.setup_tunnels(vec![p(2, 2), p(2, 6)]).unwrap();

    let path = find_path(
        &grid,
        p(1, 2),
        p(8, 6),
        JumpPolicy::TeleportOrthogonal,
        Heuristic::Manhattan,
        true,
    )
    .unwrap();

    // entering the chain head drops the traveller at the chain exit
    assert_eq!(path, vec![p(1, 2), p(2, 2), p(7, 6), p(8, 6)]);
}

#[test]
fn wormhole_works_in_both_directions() {
    let mut grid = Grid::new(10, 10);
    grid.setup_wormhole(p(2, 2), p(7, 7)).unwrap();

    let there = find_path(
        &grid,
        p(1, 2),
        p(8, 7),
        JumpPolicy::NeverDiagonal,
        Heuristic::Manhattan,
        true,
    )
    .unwrap();
    assert_eq!(there, vec![p(1, 2), p(2, 2), p(7, 7), p(8, 7)]);

    let back = find_path(
        &grid,
        p(8, 7),
        p(1, 2),
        JumpPolicy::NeverDiagonal,
        Heuristic::Manhattan,
        true,
    )
    .unwrap();
    assert_eq!(back, vec![p(8, 7), p(7, 7), p(2, 2), p(1, 2)]);
}

#[test]
fn chain_into_wormhole_exits_at_the_far_end() {
    let mut grid = Grid::new(10, 10);
    grid.make_tunnel(p(1, 1), TunnelDirection::Down).unwrap();
    grid.link_tunnel(p(1, 1), p(2, 2)).unwrap();
    grid.setup_wormhole(p(2, 2), p(7, 7)).unwrap();
    grid.setup_tunnels(vec![p(1, 1)]).unwrap();

    let path = find_path(
        &grid,
        p(0, 1),
        p(8, 7),
        JumpPolicy::TeleportOrthogonal,
        Heuristic::Manhattan,
        true,
    )
    .unwrap();

    assert_eq!(path, vec![p(0, 1), p(1, 1), p(7, 7), p(8, 7)]);
}

#[test]
fn teleporter_shortcut_beats_walking() {
    let mut grid = Grid::new(12, 12);
    grid.setup_wormhole(p(1, 1), p(10, 10)).unwrap();

    let walked = plan_path(&grid, &PathRequest::new(p(0, 1), p(11, 10))).unwrap();
    let mut request = PathRequest::teleport(p(0, 1), p(11, 10));
    request.heuristic = Heuristic::Manhattan;
    let hopped = plan_path(&grid, &request).unwrap();

    assert!(hopped.is_reachable());
    assert!(
        hopped.cost < walked.cost,
        "teleporting ({}) should beat walking ({})",
        hopped.cost,
        walked.cost
    );
    assert!((hopped.cost - 2.0).abs() < 1e-9);
}

#[test]
fn teleporters_are_invisible_without_the_flag() {
    let grid = tunnel_express_grid();
    let path = find_path(
        &grid,
        p(0, 5),
        p(9, 5),
        JumpPolicy::NeverDiagonal,
        Heuristic::Manhattan,
        false,
    )
    .unwrap();

    // the tunnel cell is just a walkable cell: nine unit steps straight across
    assert_eq!(path.len(), 10);
    assert_eq!(path.first(), Some(&p(0, 5)));
    assert_eq!(path.last(), Some(&p(9, 5)));
}

#[test]
fn always_diagonal_uses_direct_teleport_exits() {
    let mut grid = Grid::new(10, 10);
    grid.setup_wormhole(p(2, 2), p(7, 7)).unwrap();

    // the 8-way policy only follows a teleporter when the scan starts on
    // it, so begin the route on the wormhole itself
    let path = find_path(
        &grid,
        p(2, 2),
        p(8, 8),
        JumpPolicy::AlwaysDiagonal,
        Heuristic::Octile,
        true,
    )
    .unwrap();

    assert_eq!(path, vec![p(2, 2), p(7, 7), p(8, 8)]);
}
