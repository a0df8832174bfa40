//! High-level path planning facade over the jump point engine.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::grid::Grid;
use crate::heuristic::Heuristic;
use crate::jps::{JumpPointSearch, JumpPolicy, SearchOptions};
use crate::node::Point;

/// A path planning request.
#[derive(Debug, Clone)]
pub struct PathRequest {
    pub start: Point,
    pub goal: Point,
    pub policy: JumpPolicy,
    pub heuristic: Heuristic,
    /// Route through tunnels and wormholes. Implied by
    /// [`JumpPolicy::TeleportOrthogonal`].
    pub check_teleporter: bool,
}

impl PathRequest {
    /// 8-way search with the default heuristic and no teleporter routing.
    pub fn new(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            policy: JumpPolicy::AlwaysDiagonal,
            heuristic: Heuristic::default(),
            check_teleporter: false,
        }
    }

    /// Teleporter-aware orthogonal search, the configuration the grid
    /// editor runs.
    pub fn teleport(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            policy: JumpPolicy::TeleportOrthogonal,
            heuristic: Heuristic::default(),
            check_teleporter: true,
        }
    }
}

/// A planned path returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct PathPlan {
    pub policy: JumpPolicy,
    pub heuristic: Heuristic,
    pub start: Point,
    pub goal: Point,
    /// Unit steps including both endpoints, teleporter hops as single
    /// edges. Empty when the goal is unreachable.
    pub points: Vec<Point>,
    /// Travelled distance, with teleporter hops free.
    pub cost: f64,
}

impl PathPlan {
    pub fn is_reachable(&self) -> bool {
        !self.points.is_empty()
    }

    /// Number of edges in the path.
    pub fn step_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Plan a path with the requested policy and heuristic.
pub fn plan_path(grid: &Grid, request: &PathRequest) -> Result<PathPlan> {
    let check_teleporter = request.check_teleporter
        || matches!(request.policy, JumpPolicy::TeleportOrthogonal);
    let points = find_path(
        grid,
        request.start,
        request.goal,
        request.policy,
        request.heuristic,
        check_teleporter,
    )?;
    let cost = travelled_cost(grid, &points, check_teleporter);
    debug!(steps = points.len(), cost, "path planned");

    Ok(PathPlan {
        policy: request.policy,
        heuristic: request.heuristic,
        start: request.start,
        goal: request.goal,
        points,
        cost,
    })
}

/// Find a path between two cells. Returns the unit-step point sequence,
/// empty when the goal is unreachable.
pub fn find_path(
    grid: &Grid,
    start: Point,
    goal: Point,
    policy: JumpPolicy,
    heuristic: Heuristic,
    check_teleporter: bool,
) -> Result<Vec<Point>> {
    let options = SearchOptions {
        heuristic,
        check_teleporter: check_teleporter
            || matches!(policy, JumpPolicy::TeleportOrthogonal),
        track_jump_recursion: false,
    };
    JumpPointSearch::new(policy, options).find_path(grid, start, goal)
}

fn travelled_cost(grid: &Grid, points: &[Point], check_teleporter: bool) -> f64 {
    points
        .windows(2)
        .map(|w| {
            if check_teleporter && grid.has_teleporter(w[0], w[1]) {
                0.0
            } else {
                ((w[0].x - w[1].x) as f64).hypot((w[0].y - w[1].y) as f64)
            }
        })
        .sum()
}
