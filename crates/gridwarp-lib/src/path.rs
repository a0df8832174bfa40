//! Path post-processing: interpolation, expansion, compression, smoothing.

use crate::grid::Grid;
use crate::node::Point;

/// All coordinates on the line between two cells, inclusive, following
/// Bresenham's algorithm.
pub fn interpolate(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
    let mut line = Vec::new();
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        line.push(Point::new(x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    line
}

/// Expand a compressed (jump point) path to unit steps.
///
/// Segments are interpolated, except that with `check_teleporter` a segment
/// whose first node teleports directly to its second stays a single edge.
/// Paths of fewer than two points expand to nothing.
pub fn expand_path(path: &[Point], grid: &Grid, check_teleporter: bool) -> Vec<Point> {
    let mut expanded = Vec::new();
    if path.len() < 2 {
        return expanded;
    }

    for window in path.windows(2) {
        let (a, b) = (window[0], window[1]);
        if check_teleporter && grid.has_teleporter(a, b) {
            expanded.push(a);
        } else {
            let line = interpolate(a.x, a.y, b.x, b.y);
            expanded.extend_from_slice(&line[..line.len() - 1]);
        }
    }
    expanded.push(path[path.len() - 1]);
    expanded
}

/// Remove collinear interior points without altering the path's shape.
pub fn compress_path(path: &[Point]) -> Vec<Point> {
    // nothing to compress
    if path.len() < 3 {
        return path.to_vec();
    }

    let mut compressed = Vec::new();
    let (sx, sy) = (path[0].x, path[0].y);
    let (mut px, mut py) = (path[1].x, path[1].y);
    let mut dx = (px - sx) as f64;
    let mut dy = (py - sy) as f64;

    let sq = dx.hypot(dy);
    dx /= sq;
    dy /= sq;

    compressed.push(Point::new(sx, sy));

    for point in &path[2..] {
        let (lx, ly) = (px, py);
        let (ldx, ldy) = (dx, dy);

        px = point.x;
        py = point.y;
        dx = (px - lx) as f64;
        dy = (py - ly) as f64;
        let sq = dx.hypot(dy);
        dx /= sq;
        dy /= sq;

        if dx != ldx || dy != ldy {
            compressed.push(Point::new(lx, ly));
        }
    }

    compressed.push(Point::new(px, py));
    compressed
}

/// Straighten a path by cutting segments that a direct line could replace.
/// The original path is not modified.
pub fn smoothen_path(grid: &Grid, path: &[Point]) -> Vec<Point> {
    if path.len() < 2 {
        return path.to_vec();
    }

    let (x0, y0) = (path[0].x, path[0].y);
    let last = path[path.len() - 1];
    let (mut sx, mut sy) = (x0, y0);
    let mut smoothed = vec![Point::new(sx, sy)];

    for i in 2..path.len() {
        let coord = path[i];
        let line = interpolate(sx, sy, coord.x, coord.y);

        let blocked = line[1..]
            .iter()
            .any(|p| !grid.is_walkable_at(p.x, p.y));
        if blocked {
            let last_valid = path[i - 1];
            smoothed.push(last_valid);
            sx = last_valid.x;
            sy = last_valid.y;
        }
    }
    smoothed.push(last);
    smoothed
}

/// Total Euclidean length of a path.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2)
        .map(|w| ((w[0].x - w[1].x) as f64).hypot((w[0].y - w[1].y) as f64))
        .sum()
}
