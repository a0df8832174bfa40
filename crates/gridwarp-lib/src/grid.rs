//! The walkability grid: cell arena, teleporter topology, and the
//! teleporter-type classifier.

use tracing::debug;

use crate::error::{Error, Result};
use crate::node::{Node, NodeKind, Point, TunnelDirection};
use crate::teleport::TeleporterType;

/// Corner rules applied when collecting the diagonal neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagonalMovement {
    /// Cardinal moves only.
    Never,
    /// Diagonals regardless of the adjacent cardinal cells.
    Always,
    /// Diagonals only when both adjacent cardinal cells are walkable.
    OnlyWhenNoObstacles,
    /// Diagonals when at least one adjacent cardinal cell is walkable.
    IfAtMostOneObstacle,
}

/// Rectangular grid of cells with optional teleporter topology.
///
/// Dimensions are fixed at construction. Every coordinate access is
/// bounds-checked; out-of-bounds and non-walkable cells are indistinguishable
/// to search ([`Grid::is_walkable_at`] returns `false` for both).
///
/// The grid itself carries no search state, so it can be shared read-only
/// between concurrently running engines.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Node>,
    tunnels: Vec<Vec<Point>>,
}

#[derive(Clone, Copy, PartialEq)]
enum Tag {
    Plain,
    Tunnel,
    Wormhole,
}

impl Grid {
    /// Create a grid of all-walkable plain cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Node::plain(true); width * height],
            tunnels: Vec::new(),
        }
    }

    /// Create a grid from a row-major walkability matrix.
    ///
    /// The matrix must have exactly `height` rows of `width` entries each;
    /// anything else fails fast, nothing is truncated.
    pub fn from_matrix(width: usize, height: usize, matrix: Vec<Vec<bool>>) -> Result<Self> {
        if matrix.len() != height {
            return Err(Error::SizeMismatch {
                expected: height,
                found: matrix.len(),
            });
        }
        for (row, cells) in matrix.iter().enumerate() {
            if cells.len() != width {
                return Err(Error::RowSizeMismatch {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }

        let mut grid = Self::new(width, height);
        for (y, row) in matrix.into_iter().enumerate() {
            for (x, walkable) in row.into_iter().enumerate() {
                grid.cells[y * width + x].walkable = walkable;
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub(crate) fn index_of(&self, p: Point) -> Option<usize> {
        self.is_inside(p.x, p.y)
            .then(|| p.y as usize * self.width + p.x as usize)
    }

    pub(crate) fn point_of(&self, index: usize) -> Point {
        Point::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn node_at(&self, x: i32, y: i32) -> Option<&Node> {
        self.node(Point::new(x, y))
    }

    fn node(&self, p: Point) -> Option<&Node> {
        self.index_of(p).map(|i| &self.cells[i])
    }

    pub fn is_walkable_at(&self, x: i32, y: i32) -> bool {
        self.node_at(x, y).map(|n| n.walkable).unwrap_or(false)
    }

    pub fn is_teleporter_at(&self, x: i32, y: i32) -> bool {
        self.node_at(x, y).map(Node::is_teleporter).unwrap_or(false)
    }

    fn require_inside(&self, p: Point) -> Result<usize> {
        self.index_of(p).ok_or(Error::OutOfBounds {
            x: p.x,
            y: p.y,
            width: self.width,
            height: self.height,
        })
    }

    /// Toggle walkability of one cell.
    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) -> Result<()> {
        let i = self.require_inside(Point::new(x, y))?;
        self.cells[i].walkable = walkable;
        Ok(())
    }

    /// Turn a cell into an unlinked tunnel pad.
    pub fn make_tunnel(&mut self, at: Point, direction: TunnelDirection) -> Result<()> {
        let i = self.require_inside(at)?;
        self.cells[i] = Node {
            walkable: true,
            kind: NodeKind::Tunnel {
                out: None,
                ins: Vec::new(),
                direction,
            },
        };
        Ok(())
    }

    /// Point a tunnel's exit at another cell, maintaining the reverse `ins`
    /// record when the target is itself a tunnel.
    pub fn link_tunnel(&mut self, from: Point, to: Point) -> Result<()> {
        let fi = self.require_inside(from)?;
        let ti = self.require_inside(to)?;
        match &mut self.cells[fi].kind {
            NodeKind::Tunnel { out, .. } => *out = Some(to),
            _ => return Err(Error::NotATunnel { point: from }),
        }
        if let NodeKind::Tunnel { ins, .. } = &mut self.cells[ti].kind {
            if !ins.contains(&from) {
                ins.push(from);
            }
        }
        Ok(())
    }

    /// Pair two cells as a wormhole. Both cells are replaced in place.
    pub fn setup_wormhole(&mut self, a: Point, b: Point) -> Result<()> {
        if a == b {
            return Err(Error::InvalidWormholePair { a, b });
        }
        let ai = self.require_inside(a)?;
        let bi = self.require_inside(b)?;
        self.cells[ai] = Node {
            walkable: true,
            kind: NodeKind::Wormhole { peer: b },
        };
        self.cells[bi] = Node {
            walkable: true,
            kind: NodeKind::Wormhole { peer: a },
        };
        Ok(())
    }

    /// Dissolve a wormhole pairing, reverting both ends to plain cells.
    pub fn break_wormhole(&mut self, a: Point, b: Point) -> Result<()> {
        let ai = self.require_inside(a)?;
        let bi = self.require_inside(b)?;
        let pa = self
            .wormhole_peer(a)
            .ok_or(Error::NotAWormhole { point: a })?;
        let pb = self
            .wormhole_peer(b)
            .ok_or(Error::NotAWormhole { point: b })?;
        if pa != b || pb != a {
            return Err(Error::InvalidWormholePair { a, b });
        }
        self.cells[ai] = Node::plain(true);
        self.cells[bi] = Node::plain(true);
        Ok(())
    }

    /// The peer of a wormhole cell, if the cell is one.
    pub fn wormhole_peer(&self, p: Point) -> Option<Point> {
        match self.node(p)?.kind {
            NodeKind::Wormhole { peer } => Some(peer),
            _ => None,
        }
    }

    fn tunnel_out(&self, p: Point) -> Option<Point> {
        match self.node(p)?.kind {
            NodeKind::Tunnel { out, .. } => out,
            _ => None,
        }
    }

    /// The built tunnel chains, in construction order. Each chain ends with
    /// its terminal node; a chain that funnels into a wormhole ends with the
    /// wormhole and its peer.
    pub fn tunnels(&self) -> &[Vec<Point>] {
        &self.tunnels
    }

    fn chain_position(&self, p: Point) -> Option<(usize, usize)> {
        self.tunnels.iter().enumerate().find_map(|(ci, chain)| {
            chain.iter().position(|&q| q == p).map(|pos| (ci, pos))
        })
    }

    /// Build tunnel chains from a working set of tunnel cells.
    ///
    /// Every candidate ends up in exactly one chain regardless of input
    /// order. Candidates already belonging to a built chain are dropped;
    /// otherwise the chain is grown by following `out` links until it exits
    /// into a plain cell or a wormhole pair, runs out of links, or reaches a
    /// tunnel that is already chained. In the last case the chains are
    /// spliced: reaching the head of an existing chain absorbs it whole,
    /// reaching the middle shares the suffix and keeps the old chain for its
    /// own entrants (fan-in).
    ///
    /// Chains accumulate across calls, so re-feeding known tunnels is a
    /// no-op.
    pub fn setup_tunnels(&mut self, candidates: Vec<Point>) -> Result<()> {
        for &candidate in &candidates {
            let i = self.require_inside(candidate)?;
            if !self.cells[i].is_tunnel() {
                return Err(Error::NotATunnel { point: candidate });
            }
        }

        for start in candidates {
            if self.chain_position(start).is_some() {
                continue;
            }
            let mut chain = vec![start];
            let mut cur = start;
            loop {
                let Some(next) = self.tunnel_out(cur) else {
                    break;
                };
                // an exit pointing off-grid terminates the chain
                let Some(node) = self.node(next) else {
                    break;
                };
                if let Some(peer) = self.wormhole_peer(next) {
                    chain.push(next);
                    if !chain.contains(&peer) {
                        chain.push(peer);
                    }
                    break;
                }
                if !node.is_tunnel() {
                    chain.push(next);
                    break;
                }
                if let Some((ci, pos)) = self.chain_position(next) {
                    if pos == 0 {
                        let absorbed = self.tunnels.remove(ci);
                        chain.extend(absorbed);
                    } else {
                        let suffix = self.tunnels[ci][pos..].to_vec();
                        chain.extend(suffix);
                    }
                    break;
                }
                if chain.contains(&next) {
                    // a cycle ends the chain at its last new node
                    break;
                }
                chain.push(next);
                cur = next;
            }
            self.tunnels.push(chain);
        }

        debug!(chains = self.tunnels.len(), "tunnel chains rebuilt");
        Ok(())
    }

    /// The forward teleport walk from `start`: the node itself, then every
    /// node its chain passes through, ending with the chain terminal. A
    /// wormhole terminal is followed by its peer. Non-tunnels walk nowhere.
    fn forward_chain(&self, start: Point) -> Vec<Point> {
        let mut chain = vec![start];
        let mut cur = start;
        while let Some(next) = self.tunnel_out(cur) {
            if chain.contains(&next) {
                break;
            }
            match self.node(next).map(|n| &n.kind) {
                Some(NodeKind::Tunnel { .. }) => {
                    chain.push(next);
                    cur = next;
                }
                Some(NodeKind::Wormhole { peer }) => {
                    let peer = *peer;
                    chain.push(next);
                    if !chain.contains(&peer) {
                        chain.push(peer);
                    }
                    break;
                }
                Some(NodeKind::Plain) => {
                    chain.push(next);
                    break;
                }
                None => break,
            }
        }
        chain
    }

    /// Where a traveller stepping onto this cell finally comes out: the
    /// chain terminal for a tunnel, the peer for a wormhole. `None` for
    /// plain cells and for tunnels with no usable exit.
    pub fn final_exit(&self, p: Point) -> Option<Point> {
        match self.node(p)?.kind {
            NodeKind::Wormhole { peer } => Some(peer),
            NodeKind::Tunnel { .. } => {
                let chain = self.forward_chain(p);
                let last = *chain.last()?;
                (last != p).then_some(last)
            }
            NodeKind::Plain => None,
        }
    }

    /// Whether `from` teleports a traveller directly to `to`.
    pub fn has_teleporter(&self, from: Point, to: Point) -> bool {
        self.final_exit(from) == Some(to)
    }

    fn tag(&self, p: Point) -> Tag {
        match self.node(p).map(|n| &n.kind) {
            Some(NodeKind::Tunnel { .. }) => Tag::Tunnel,
            Some(NodeKind::Wormhole { .. }) => Tag::Wormhole,
            _ => Tag::Plain,
        }
    }

    /// Whether the forward walk from `from` passes through `to`.
    fn reaches(&self, from: Point, to: Point) -> bool {
        self.forward_chain(from)[1..].contains(&to)
    }

    /// Classify the directed relationship between two nodes. Pure and total;
    /// recomputed per query, never stored.
    pub fn teleporter_type(&self, start: Point, end: Point) -> TeleporterType {
        use TeleporterType::*;

        match (self.tag(start), self.tag(end)) {
            (Tag::Plain, Tag::Plain) => NormalNormal,
            (Tag::Plain, Tag::Tunnel) => {
                if self.reaches(end, start) {
                    NormalOtTunnel
                } else {
                    NormalTunnel
                }
            }
            (Tag::Plain, Tag::Wormhole) => NormalWormhole,
            (Tag::Tunnel, Tag::Plain) => {
                if self.reaches(start, end) {
                    TunnelToNormal
                } else {
                    TunnelNormal
                }
            }
            (Tag::Tunnel, Tag::Tunnel) => {
                if self.reaches(start, end) {
                    TunnelToTunnel
                } else if self.reaches(end, start) {
                    TunnelOtTunnel
                } else {
                    TunnelTunnel
                }
            }
            (Tag::Tunnel, Tag::Wormhole) => {
                if self.reaches(start, end) {
                    TunnelToWormhole
                } else {
                    TunnelWormhole
                }
            }
            (Tag::Wormhole, Tag::Plain) => WormholeNormal,
            (Tag::Wormhole, Tag::Tunnel) => {
                if self.reaches(end, start) {
                    WormholeOtTunnel
                } else {
                    WormholeTunnel
                }
            }
            (Tag::Wormhole, Tag::Wormhole) => {
                if self.wormhole_peer(start) == Some(end) {
                    WormholeToWormhole
                } else {
                    WormholeWormhole
                }
            }
        }
    }

    /// Collect the walkable neighborhood of a cell.
    ///
    /// With `check_teleporter` set, a tunnel with a usable exit yields
    /// exactly that exit (stepping onto a tunnel commits the traveller to
    /// its chain), and a wormhole yields its peer ahead of the geometric
    /// neighborhood (the traveller may take the pairing or step off).
    pub fn neighbors(
        &self,
        node: Point,
        diagonal: DiagonalMovement,
        check_teleporter: bool,
    ) -> Vec<Point> {
        let mut neighbors = Vec::new();

        if check_teleporter {
            match self.node(node).map(|n| &n.kind) {
                Some(NodeKind::Tunnel { .. }) => {
                    if let Some(exit) = self.final_exit(node) {
                        return vec![exit];
                    }
                }
                Some(NodeKind::Wormhole { peer }) => neighbors.push(*peer),
                _ => {}
            }
        }

        let Point { x, y } = node;
        let s0 = self.is_walkable_at(x, y - 1);
        let s1 = self.is_walkable_at(x + 1, y);
        let s2 = self.is_walkable_at(x, y + 1);
        let s3 = self.is_walkable_at(x - 1, y);
        if s0 {
            neighbors.push(Point::new(x, y - 1));
        }
        if s1 {
            neighbors.push(Point::new(x + 1, y));
        }
        if s2 {
            neighbors.push(Point::new(x, y + 1));
        }
        if s3 {
            neighbors.push(Point::new(x - 1, y));
        }

        let (d0, d1, d2, d3) = match diagonal {
            DiagonalMovement::Never => return neighbors,
            DiagonalMovement::Always => (true, true, true, true),
            DiagonalMovement::OnlyWhenNoObstacles => (s3 && s0, s0 && s1, s1 && s2, s2 && s3),
            DiagonalMovement::IfAtMostOneObstacle => (s3 || s0, s0 || s1, s1 || s2, s2 || s3),
        };
        if d0 && self.is_walkable_at(x - 1, y - 1) {
            neighbors.push(Point::new(x - 1, y - 1));
        }
        if d1 && self.is_walkable_at(x + 1, y - 1) {
            neighbors.push(Point::new(x + 1, y - 1));
        }
        if d2 && self.is_walkable_at(x + 1, y + 1) {
            neighbors.push(Point::new(x + 1, y + 1));
        }
        if d3 && self.is_walkable_at(x - 1, y + 1) {
            neighbors.push(Point::new(x - 1, y + 1));
        }
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_as_unwalkable() {
        let grid = Grid::new(3, 3);
        assert!(grid.is_walkable_at(0, 0));
        assert!(!grid.is_walkable_at(-1, 0));
        assert!(!grid.is_walkable_at(0, 3));
        assert!(grid.node_at(5, 5).is_none());
    }

    #[test]
    fn from_matrix_rejects_bad_shapes() {
        let short = vec![vec![true; 2]];
        assert!(matches!(
            Grid::from_matrix(2, 2, short),
            Err(Error::SizeMismatch { expected: 2, found: 1 })
        ));

        let ragged = vec![vec![true, true], vec![true]];
        assert!(matches!(
            Grid::from_matrix(2, 2, ragged),
            Err(Error::RowSizeMismatch { row: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn from_matrix_applies_walkability() {
        let grid = Grid::from_matrix(2, 2, vec![vec![true, false], vec![false, true]]).unwrap();
        assert!(grid.is_walkable_at(0, 0));
        assert!(!grid.is_walkable_at(1, 0));
        assert!(!grid.is_walkable_at(0, 1));
        assert!(grid.is_walkable_at(1, 1));
    }

    #[test]
    fn diagonal_corner_rules() {
        let mut grid = Grid::new(3, 3);
        grid.set_walkable(1, 0, false).unwrap();
        grid.set_walkable(0, 1, false).unwrap();
        let center = Point::new(1, 1);

        let never = grid.neighbors(center, DiagonalMovement::Never, false);
        assert_eq!(never, vec![Point::new(2, 1), Point::new(1, 2)]);

        let strict = grid.neighbors(center, DiagonalMovement::OnlyWhenNoObstacles, false);
        assert!(!strict.contains(&Point::new(0, 0)));
        assert!(!strict.contains(&Point::new(2, 0)));
        assert!(!strict.contains(&Point::new(0, 2)));
        assert!(strict.contains(&Point::new(2, 2)));

        let relaxed = grid.neighbors(center, DiagonalMovement::IfAtMostOneObstacle, false);
        assert!(!relaxed.contains(&Point::new(0, 0)));
        assert!(relaxed.contains(&Point::new(2, 0)));
        assert!(relaxed.contains(&Point::new(0, 2)));
        assert!(relaxed.contains(&Point::new(2, 2)));

        let always = grid.neighbors(center, DiagonalMovement::Always, false);
        assert!(always.contains(&Point::new(0, 0)));
    }

    #[test]
    fn teleporter_neighborhoods() {
        let mut grid = Grid::new(5, 5);
        grid.make_tunnel(Point::new(1, 1), TunnelDirection::Right).unwrap();
        grid.link_tunnel(Point::new(1, 1), Point::new(3, 3)).unwrap();
        grid.setup_wormhole(Point::new(0, 4), Point::new(4, 0)).unwrap();

        let tunnel = grid.neighbors(Point::new(1, 1), DiagonalMovement::Never, true);
        assert_eq!(tunnel, vec![Point::new(3, 3)]);

        let wormhole = grid.neighbors(Point::new(0, 4), DiagonalMovement::Never, true);
        assert_eq!(wormhole[0], Point::new(4, 0));
        assert!(wormhole.contains(&Point::new(0, 3)));
        assert!(wormhole.contains(&Point::new(1, 4)));

        // without teleporter-awareness both are ordinary cells
        let plainly = grid.neighbors(Point::new(1, 1), DiagonalMovement::Never, false);
        assert_eq!(plainly.len(), 4);
    }
}
