//! Grid cell model: coordinates, walkability, and the teleporter variants.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = Error;

    /// Parse a `X,Y` coordinate, as used by the CLI.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidCoordinate {
            value: value.to_string(),
        };
        let (x, y) = value.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Point::new(x, y))
    }
}

/// Authoring metadata recorded on tunnel nodes. Not consulted by search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TunnelDirection {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

/// The teleporter variant of a cell.
///
/// Every cross-node reference is a coordinate into the owning grid, so the
/// topology stays free of shared mutable references.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An ordinary cell.
    Plain,
    /// A one-way teleport pad. Stepping onto it sends the traveller to
    /// `out`, which may itself be another tunnel (chaining), a wormhole, or
    /// a plain cell. `ins` records the tunnels that exit onto this one.
    Tunnel {
        out: Option<Point>,
        ins: Vec<Point>,
        direction: TunnelDirection,
    },
    /// One end of a bidirectional teleport pairing.
    Wormhole { peer: Point },
}

/// One grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub walkable: bool,
    pub kind: NodeKind,
}

impl Node {
    pub fn plain(walkable: bool) -> Self {
        Self {
            walkable,
            kind: NodeKind::Plain,
        }
    }

    pub fn is_teleporter(&self) -> bool {
        !matches!(self.kind, NodeKind::Plain)
    }

    pub fn is_tunnel(&self) -> bool {
        matches!(self.kind, NodeKind::Tunnel { .. })
    }

    pub fn is_wormhole(&self) -> bool {
        matches!(self.kind, NodeKind::Wormhole { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_parses_with_optional_whitespace() {
        assert_eq!("3,4".parse::<Point>().unwrap(), Point::new(3, 4));
        assert_eq!(" 10 , 2 ".parse::<Point>().unwrap(), Point::new(10, 2));
    }

    #[test]
    fn point_rejects_malformed_input() {
        for bad in ["", "3", "3;4", "a,b", "3,4,5"] {
            assert!(bad.parse::<Point>().is_err(), "{bad:?} should not parse");
        }
    }
}
