//! The interchangeable direction-pruning policies.
//!
//! Each policy answers two questions for the driver: which neighbors of an
//! expanded node are worth scanning, and where the scan in a given direction
//! jumps to (if anywhere). The recursion depth of a scan is bounded by the
//! grid diagonal.

use crate::grid::{DiagonalMovement, Grid};
use crate::node::Point;
use crate::teleport::TeleporterType;

use super::state::SearchState;
use super::SearchOptions;

pub(crate) struct SearchCtx<'a> {
    pub grid: &'a Grid,
    pub goal: Point,
    pub options: &'a SearchOptions,
}

impl SearchCtx<'_> {
    fn mark_tested(&self, state: &mut SearchState, x: i32, y: i32) {
        if self.options.track_jump_recursion {
            if let Some(i) = self.grid.index_of(Point::new(x, y)) {
                state.set_tested(i, true);
            }
        }
    }
}

pub(crate) trait PrunePolicy {
    /// Neighbors worth scanning from `node`. With no parent this is the full
    /// neighborhood under the policy's diagonal rule; otherwise directional
    /// pruning applies where the policy allows it.
    fn find_neighbors(
        &self,
        ctx: &SearchCtx<'_>,
        node: Point,
        parent: Option<Point>,
    ) -> Vec<Point>;

    /// Scan from `(x1, y1)` through `(x0, y0)` onwards, returning the jump
    /// point in that direction or `None`.
    fn jump(
        &self,
        ctx: &SearchCtx<'_>,
        state: &mut SearchState,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Option<Point>;
}

/// Unrestricted 8-directional movement.
pub(crate) struct AlwaysDiagonal;

/// 4-directional (orthogonal) movement.
pub(crate) struct NeverDiagonal;

/// Orthogonal movement that routes through teleporter topology via the
/// 16-way classification.
pub(crate) struct TeleportOrthogonal;

impl PrunePolicy for AlwaysDiagonal {
    fn find_neighbors(
        &self,
        ctx: &SearchCtx<'_>,
        node: Point,
        parent: Option<Point>,
    ) -> Vec<Point> {
        let grid = ctx.grid;
        let Point { x, y } = node;

        // Directed pruning skips most neighbors unless they are forced.
        // Teleporter-aware runs must not prune: a teleporter exit can sit in
        // any direction.
        let (px, py) = match parent {
            Some(p) if !ctx.options.check_teleporter => (p.x, p.y),
            _ => {
                return grid.neighbors(node, DiagonalMovement::Always, ctx.options.check_teleporter)
            }
        };

        let dx = (x - px).signum();
        let dy = (y - py).signum();
        let mut neighbors = Vec::new();

        if dx != 0 && dy != 0 {
            if grid.is_walkable_at(x, y + dy) {
                neighbors.push(Point::new(x, y + dy));
            }
            if grid.is_walkable_at(x + dx, y) {
                neighbors.push(Point::new(x + dx, y));
            }
            if grid.is_walkable_at(x + dx, y + dy) {
                neighbors.push(Point::new(x + dx, y + dy));
            }
            if !grid.is_walkable_at(x - dx, y) {
                neighbors.push(Point::new(x - dx, y + dy));
            }
            if !grid.is_walkable_at(x, y - dy) {
                neighbors.push(Point::new(x + dx, y - dy));
            }
        } else if dx == 0 {
            if grid.is_walkable_at(x, y + dy) {
                neighbors.push(Point::new(x, y + dy));
            }
            if !grid.is_walkable_at(x + 1, y) {
                neighbors.push(Point::new(x + 1, y + dy));
            }
            if !grid.is_walkable_at(x - 1, y) {
                neighbors.push(Point::new(x - 1, y + dy));
            }
        } else {
            if grid.is_walkable_at(x + dx, y) {
                neighbors.push(Point::new(x + dx, y));
            }
            if !grid.is_walkable_at(x, y + 1) {
                neighbors.push(Point::new(x + dx, y + 1));
            }
            if !grid.is_walkable_at(x, y - 1) {
                neighbors.push(Point::new(x + dx, y - 1));
            }
        }
        neighbors
    }

    fn jump(
        &self,
        ctx: &SearchCtx<'_>,
        state: &mut SearchState,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Option<Point> {
        let grid = ctx.grid;
        let (dx, dy) = (x0 - x1, y0 - y1);

        if !grid.is_walkable_at(x0, y0) {
            return None;
        }
        ctx.mark_tested(state, x0, y0);
        if Point::new(x0, y0) == ctx.goal {
            return Some(ctx.goal);
        }
        if ctx.options.check_teleporter
            && grid.is_inside(x1, y1)
            && grid.has_teleporter(Point::new(x1, y1), Point::new(x0, y0))
        {
            return Some(Point::new(x0, y0));
        }

        if dx != 0 && dy != 0 {
            if (grid.is_walkable_at(x1, y0 + dy) && !grid.is_walkable_at(x1, y0))
                || (grid.is_walkable_at(x0 + dx, y1) && !grid.is_walkable_at(x0, y1))
            {
                return Some(Point::new(x0, y0));
            }
            // a diagonal move must not skip over an orthogonal jump point
            if self.jump(ctx, state, x0 + dx, y0, x0, y0).is_some()
                || self.jump(ctx, state, x0, y0 + dy, x0, y0).is_some()
            {
                return Some(Point::new(x0, y0));
            }
        } else if dx != 0 {
            if (grid.is_walkable_at(x0 + dx, y0 + 1) && !grid.is_walkable_at(x0, y0 + 1))
                || (grid.is_walkable_at(x0 + dx, y0 - 1) && !grid.is_walkable_at(x0, y0 - 1))
            {
                return Some(Point::new(x0, y0));
            }
        } else if (grid.is_walkable_at(x0 + 1, y0 + dy) && !grid.is_walkable_at(x0 + 1, y0))
            || (grid.is_walkable_at(x0 - 1, y0 + dy) && !grid.is_walkable_at(x0 - 1, y0))
        {
            return Some(Point::new(x0, y0));
        }

        self.jump(ctx, state, x0 + dx, y0 + dy, x0, y0)
    }
}

impl PrunePolicy for NeverDiagonal {
    fn find_neighbors(
        &self,
        ctx: &SearchCtx<'_>,
        node: Point,
        parent: Option<Point>,
    ) -> Vec<Point> {
        let grid = ctx.grid;
        let Point { x, y } = node;

        let (px, py) = match parent {
            Some(p) if !ctx.options.check_teleporter => (p.x, p.y),
            _ => {
                return grid.neighbors(node, DiagonalMovement::Never, ctx.options.check_teleporter)
            }
        };

        let dx = (x - px).signum();
        let dy = (y - py).signum();
        let mut neighbors = Vec::new();

        if dx != 0 {
            if grid.is_walkable_at(x, y - 1) {
                neighbors.push(Point::new(x, y - 1));
            }
            if grid.is_walkable_at(x, y + 1) {
                neighbors.push(Point::new(x, y + 1));
            }
            if grid.is_walkable_at(x + dx, y) {
                neighbors.push(Point::new(x + dx, y));
            }
        } else if dy != 0 {
            if grid.is_walkable_at(x - 1, y) {
                neighbors.push(Point::new(x - 1, y));
            }
            if grid.is_walkable_at(x + 1, y) {
                neighbors.push(Point::new(x + 1, y));
            }
            if grid.is_walkable_at(x, y + dy) {
                neighbors.push(Point::new(x, y + dy));
            }
        }
        neighbors
    }

    fn jump(
        &self,
        ctx: &SearchCtx<'_>,
        state: &mut SearchState,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Option<Point> {
        let grid = ctx.grid;
        let (dx, dy) = (x0 - x1, y0 - y1);

        if !grid.is_walkable_at(x0, y0) {
            return None;
        }
        ctx.mark_tested(state, x0, y0);
        if Point::new(x0, y0) == ctx.goal {
            return Some(ctx.goal);
        }
        if ctx.options.check_teleporter
            && (grid.has_teleporter(Point::new(x1, y1), Point::new(x0, y0))
                || grid.is_teleporter_at(x0, y0))
        {
            return Some(Point::new(x0, y0));
        }

        if dx != 0 {
            if (grid.is_walkable_at(x0, y0 - 1) && !grid.is_walkable_at(x1, y0 - 1))
                || (grid.is_walkable_at(x0, y0 + 1) && !grid.is_walkable_at(x1, y0 + 1))
            {
                return Some(Point::new(x0, y0));
            }
        } else if dy != 0 {
            if (grid.is_walkable_at(x0 - 1, y0) && !grid.is_walkable_at(x0 - 1, y1))
                || (grid.is_walkable_at(x0 + 1, y0) && !grid.is_walkable_at(x0 + 1, y1))
            {
                return Some(Point::new(x0, y0));
            }
            // vertical travel must not skip over a horizontal jump point
            if self.jump(ctx, state, x0 + 1, y0, x0, y0).is_some()
                || self.jump(ctx, state, x0 - 1, y0, x0, y0).is_some()
            {
                return Some(Point::new(x0, y0));
            }
        } else {
            // straight moves only; a zero direction never reaches here
            return None;
        }

        self.jump(ctx, state, x0 + dx, y0 + dy, x0, y0)
    }
}

impl PrunePolicy for TeleportOrthogonal {
    fn find_neighbors(
        &self,
        ctx: &SearchCtx<'_>,
        node: Point,
        _parent: Option<Point>,
    ) -> Vec<Point> {
        // never prunes by direction: teleporter exits invalidate the usual
        // reachability argument behind pruning
        ctx.grid.neighbors(node, DiagonalMovement::Never, true)
    }

    fn jump(
        &self,
        ctx: &SearchCtx<'_>,
        state: &mut SearchState,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Option<Point> {
        let grid = ctx.grid;
        let (dx, dy) = (x0 - x1, y0 - y1);

        if !grid.is_walkable_at(x0, y0) {
            return None;
        }
        if Point::new(x0, y0) == ctx.goal {
            return Some(ctx.goal);
        }

        use TeleporterType::*;
        match grid.teleporter_type(Point::new(x1, y1), Point::new(x0, y0)) {
            // crossing these boundaries is itself the jump point
            NormalTunnel | NormalWormhole | TunnelToNormal | TunnelToTunnel
            | TunnelToWormhole | WormholeNormal | WormholeToWormhole => {
                return Some(Point::new(x0, y0));
            }
            NormalNormal => {}
            // every other relationship needs an intermediate jump point
            // first; reporting none forces the driver to find it
            _ => return None,
        }

        if dx != 0 {
            if (grid.is_walkable_at(x0, y0 - 1) && !grid.is_walkable_at(x1, y0 - 1))
                || (grid.is_walkable_at(x0, y0 + 1) && !grid.is_walkable_at(x1, y0 + 1))
            {
                return Some(Point::new(x0, y0));
            }
        } else if dy != 0 {
            if (grid.is_walkable_at(x0 - 1, y0) && !grid.is_walkable_at(x0 - 1, y1))
                || (grid.is_walkable_at(x0 + 1, y0) && !grid.is_walkable_at(x0 + 1, y1))
            {
                return Some(Point::new(x0, y0));
            }
        } else {
            // straight moves only; a zero direction never reaches here
            return None;
        }

        self.jump(ctx, state, x0 + dx, y0 + dy, x0, y0)
    }
}
