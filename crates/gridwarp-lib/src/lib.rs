//! Gridwarp library entry points.
//!
//! This crate finds shortest paths on a 2-D walkability grid that can also
//! contain non-Euclidean shortcuts: one-way tunnels (directed teleport
//! links, possibly chained) and bidirectional wormholes (paired teleport
//! cells). The core is a teleporter-aware Jump Point Search engine driven by
//! interchangeable direction-pruning policies; a plain A*/Dijkstra search, a
//! `.map` file loader, and path post-processing round out the crate.
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here.

pub mod astar;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod jps;
pub mod mapfile;
pub mod node;
pub mod path;
pub mod planner;
pub mod teleport;

pub use error::{Error, Result};
pub use grid::{DiagonalMovement, Grid};
pub use heuristic::Heuristic;
pub use jps::{JumpPointSearch, JumpPolicy, SearchOptions, SearchState};
pub use mapfile::{load_grid, load_map};
pub use node::{Node, NodeKind, Point, TunnelDirection};
pub use planner::{find_path, plan_path, PathPlan, PathRequest};
pub use teleport::TeleporterType;
