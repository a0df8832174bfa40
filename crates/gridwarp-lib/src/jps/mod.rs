//! The teleporter-aware Jump Point Search engine.
//!
//! A single best-first loop drives one of three interchangeable pruning
//! policies. Instead of expanding every cell, the active policy scans along
//! travel directions and reports only jump points: cells with a forced
//! neighbor, the goal, or a teleporter boundary.

mod policy;
mod state;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::heuristic::{self, Heuristic};
use crate::node::Point;
use crate::path;

use policy::{AlwaysDiagonal, NeverDiagonal, PrunePolicy, SearchCtx, TeleportOrthogonal};
pub use state::SearchState;

/// Which pruning policy a search runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JumpPolicy {
    /// Unrestricted 8-directional movement.
    #[serde(rename = "always")]
    AlwaysDiagonal,
    /// 4-directional movement.
    #[serde(rename = "never")]
    NeverDiagonal,
    /// 4-directional movement that routes through teleporter topology.
    #[serde(rename = "teleport")]
    TeleportOrthogonal,
}

impl fmt::Display for JumpPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            JumpPolicy::AlwaysDiagonal => "always",
            JumpPolicy::NeverDiagonal => "never",
            JumpPolicy::TeleportOrthogonal => "teleport",
        };
        f.write_str(value)
    }
}

impl FromStr for JumpPolicy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "always" => Ok(JumpPolicy::AlwaysDiagonal),
            "never" => Ok(JumpPolicy::NeverDiagonal),
            "teleport" => Ok(JumpPolicy::TeleportOrthogonal),
            other => Err(Error::UnknownPolicy {
                name: other.to_string(),
            }),
        }
    }
}

/// Tunables for one engine instance.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub heuristic: Heuristic,
    /// Route through tunnels and wormholes, with direct teleporter hops
    /// costing zero.
    pub check_teleporter: bool,
    /// Record every cell touched by a jump scan in the search state, for
    /// visualisers.
    pub track_jump_recursion: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Manhattan,
            check_teleporter: false,
            track_jump_recursion: false,
        }
    }
}

/// A reusable Jump Point Search engine.
///
/// The engine owns the transient per-query state; the grid stays read-only
/// during a query, so separate engines may share one grid. State from a
/// previous query is invalidated at the start of the next one, but a single
/// engine must not run two queries at once.
pub struct JumpPointSearch {
    policy: JumpPolicy,
    options: SearchOptions,
    state: SearchState,
}

impl JumpPointSearch {
    pub fn new(policy: JumpPolicy, options: SearchOptions) -> Self {
        Self {
            policy,
            options,
            state: SearchState::new(0),
        }
    }

    pub fn policy(&self) -> JumpPolicy {
        self.policy
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Search state of the most recent query (tested flags, scores).
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Find a path from `start` to `goal`, including both endpoints,
    /// expanded to unit steps with teleporter hops kept as single edges.
    ///
    /// Returns an empty path when the goal is unreachable, and also for a
    /// degenerate `start == goal` query. Endpoints outside the grid are a
    /// caller error.
    pub fn find_path(&mut self, grid: &Grid, start: Point, goal: Point) -> Result<Vec<Point>> {
        let start_i = grid.index_of(start).ok_or(Error::OutOfBounds {
            x: start.x,
            y: start.y,
            width: grid.width(),
            height: grid.height(),
        })?;
        let goal_i = grid.index_of(goal).ok_or(Error::OutOfBounds {
            x: goal.x,
            y: goal.y,
            width: grid.width(),
            height: grid.height(),
        })?;

        debug!(%start, %goal, policy = %self.policy, "jump point search");

        self.state.reset(grid.cell_count());
        let state = &mut self.state;
        let options = &self.options;
        let ctx = SearchCtx {
            grid,
            goal,
            options,
        };
        let policy = policy_impl(self.policy);

        let mut open = BinaryHeap::new();
        state.set_g(start_i, 0.0);
        state.set_f(start_i, 0.0);
        state.set_opened(start_i, true);
        open.push(OpenEntry::new(0.0, start_i));

        let found = loop {
            let Some(entry) = open.pop() else {
                break false;
            };
            let node_i = entry.index;
            if state.closed(node_i) {
                // stale duplicate from an earlier relaxation
                continue;
            }
            state.set_closed(node_i, true);
            if node_i == goal_i {
                break true;
            }
            identify_successors(&ctx, state, &mut open, policy, node_i);
        };

        if !found {
            return Ok(Vec::new());
        }
        let jump_points = backtrace(state, grid, goal_i);
        Ok(path::expand_path(
            &jump_points,
            grid,
            options.check_teleporter,
        ))
    }
}

fn policy_impl(policy: JumpPolicy) -> &'static dyn PrunePolicy {
    match policy {
        JumpPolicy::AlwaysDiagonal => &AlwaysDiagonal,
        JumpPolicy::NeverDiagonal => &NeverDiagonal,
        JumpPolicy::TeleportOrthogonal => &TeleportOrthogonal,
    }
}

/// Run a jump point search in the direction of each pruned neighbor and
/// relax whatever jump points come back.
fn identify_successors(
    ctx: &SearchCtx<'_>,
    state: &mut SearchState,
    open: &mut BinaryHeap<OpenEntry>,
    policy: &dyn PrunePolicy,
    node_i: usize,
) {
    let grid = ctx.grid;
    let node_p = grid.point_of(node_i);
    let parent = state.parent(node_i).map(|i| grid.point_of(i));
    let node_g = state.g(node_i);

    for neighbor in policy.find_neighbors(ctx, node_p, parent) {
        let Some(jump_point) = policy.jump(ctx, state, neighbor.x, neighbor.y, node_p.x, node_p.y)
        else {
            continue;
        };
        let Some(jump_i) = grid.index_of(jump_point) else {
            continue;
        };
        if state.closed(jump_i) {
            continue;
        }

        // the jump point is usually not adjacent, so the edge carries the
        // full octile distance; a direct teleporter hop costs nothing
        let d = if ctx.options.check_teleporter && grid.has_teleporter(node_p, jump_point) {
            0.0
        } else {
            heuristic::octile(
                (jump_point.x - node_p.x).abs(),
                (jump_point.y - node_p.y).abs(),
            )
        };
        let ng = node_g + d;

        // zero-cost relaxation ties (ng == node_g) are admitted so a
        // through-teleporter parent wins when scores are equal
        if !state.opened(jump_i) || ng < state.g(jump_i) || ng == node_g {
            state.set_g(jump_i, ng);
            if state.h(jump_i).is_none() {
                let mut h = ctx.options.heuristic.apply(
                    (jump_point.x - ctx.goal.x).abs(),
                    (jump_point.y - ctx.goal.y).abs(),
                );
                if ctx.options.check_teleporter {
                    if let Some(exit) = grid.final_exit(jump_point) {
                        if let Some(exit_i) = grid.index_of(exit) {
                            let exit_h = match state.h(exit_i) {
                                Some(cached) => cached,
                                None => {
                                    let computed = ctx.options.heuristic.apply(
                                        (exit.x - ctx.goal.x).abs(),
                                        (exit.y - ctx.goal.y).abs(),
                                    );
                                    state.set_h(exit_i, computed);
                                    computed
                                }
                            };
                            // hopping through the exit may beat the
                            // geometric estimate
                            h = h.min(exit_h);
                        }
                    }
                }
                state.set_h(jump_i, h);
            }
            let h = state.h(jump_i).unwrap_or(0.0);
            let f = state.g(jump_i) + h;
            state.set_f(jump_i, f);
            state.set_parent(jump_i, node_i);
            if !state.opened(jump_i) {
                state.set_opened(jump_i, true);
            }
            open.push(OpenEntry::new(f, jump_i));
        }
    }
}

fn backtrace(state: &SearchState, grid: &Grid, goal_i: usize) -> Vec<Point> {
    let mut points = vec![grid.point_of(goal_i)];
    let mut cur = goal_i;
    while let Some(parent) = state.parent(cur) {
        cur = parent;
        points.push(grid.point_of(cur));
    }
    points.reverse();
    points
}

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct OpenEntry {
    f: FloatOrd,
    index: usize,
}

impl OpenEntry {
    fn new(f: f64, index: usize) -> Self {
        Self {
            f: FloatOrd(f),
            index,
        }
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by f score.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
