use thiserror::Error;

use crate::node::Point;

/// Convenient result alias for the gridwarp library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a walkability matrix does not have the declared number of rows.
    #[error("walkability matrix has {found} rows, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },

    /// Raised when one row of a walkability matrix has the wrong width.
    #[error("walkability matrix row {row} has {found} cells, expected {expected}")]
    RowSizeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when an editing operation targets a coordinate outside the grid.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Raised when a tunnel operation targets a node that is not a tunnel.
    #[error("node at {point} is not a tunnel")]
    NotATunnel { point: Point },

    /// Raised when a wormhole operation targets a node that is not a wormhole.
    #[error("node at {point} is not a wormhole")]
    NotAWormhole { point: Point },

    /// Raised when two nodes cannot be paired or unpaired as a wormhole.
    #[error("invalid wormhole pairing between {a} and {b}")]
    InvalidWormholePair { a: Point, b: Point },

    /// Raised when a search policy selector does not name a known policy.
    #[error("unknown search policy: {name}")]
    UnknownPolicy { name: String },

    /// Raised when a heuristic selector does not name a known heuristic.
    #[error("unknown heuristic: {name}")]
    UnknownHeuristic { name: String },

    /// Raised when a textual coordinate is not of the form `X,Y`.
    #[error("invalid coordinate {value:?}: expected X,Y")]
    InvalidCoordinate { value: String },

    /// Raised when a `.map` file does not follow the expected layout.
    #[error("malformed map file: {message}")]
    MapFormat { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
