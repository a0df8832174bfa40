//! Plain uniform-cost search over the grid.
//!
//! A* with a configurable heuristic, or Dijkstra when no heuristic is given.
//! Expands every cell it visits, which makes it the reference the jump point
//! engine is checked against.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::grid::{DiagonalMovement, Grid};
use crate::heuristic::{self, Heuristic};
use crate::jps::FloatOrd;
use crate::node::Point;

/// Find the cheapest path between two cells, including both endpoints,
/// together with its cost. Steps cost 1 cardinally and √2 diagonally.
///
/// `None` when the goal is unreachable or an endpoint is outside the grid or
/// blocked. Passing no heuristic runs Dijkstra.
pub fn shortest_path(
    grid: &Grid,
    start: Point,
    goal: Point,
    diagonal: DiagonalMovement,
    heuristic: Option<Heuristic>,
) -> Option<(Vec<Point>, f64)> {
    let start_i = grid.index_of(start)?;
    let goal_i = grid.index_of(goal)?;
    if !grid.is_walkable_at(start.x, start.y) || !grid.is_walkable_at(goal.x, goal.y) {
        return None;
    }
    if start_i == goal_i {
        return Some((vec![start], 0.0));
    }

    let estimate = |p: Point| {
        heuristic.map_or(0.0, |h| {
            h.apply((p.x - goal.x).abs(), (p.y - goal.y).abs())
        })
    };

    let nodes = grid.cell_count();
    let mut g = vec![f64::INFINITY; nodes];
    let mut parents: Vec<Option<usize>> = vec![None; nodes];
    let mut queue = BinaryHeap::new();

    g[start_i] = 0.0;
    queue.push(Entry::new(start_i, 0.0, estimate(start)));

    while let Some(entry) = queue.pop() {
        if entry.cost.0 > g[entry.node] {
            // stale duplicate
            continue;
        }
        if entry.node == goal_i {
            return Some((reconstruct(grid, &parents, start_i, goal_i), g[goal_i]));
        }

        let current = grid.point_of(entry.node);
        for neighbor in grid.neighbors(current, diagonal, false) {
            let Some(ni) = grid.index_of(neighbor) else {
                continue;
            };
            let step = heuristic::octile(
                (neighbor.x - current.x).abs(),
                (neighbor.y - current.y).abs(),
            );
            let tentative = g[entry.node] + step;
            if tentative < g[ni] {
                g[ni] = tentative;
                parents[ni] = Some(entry.node);
                queue.push(Entry::new(ni, tentative, estimate(neighbor)));
            }
        }
    }

    None
}

fn reconstruct(grid: &Grid, parents: &[Option<usize>], start_i: usize, goal_i: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut cur = goal_i;
    loop {
        path.push(grid.point_of(cur));
        if cur == start_i {
            break;
        }
        match parents[cur] {
            Some(parent) => cur = parent,
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Entry {
    node: usize,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl Entry {
    fn new(node: usize, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
