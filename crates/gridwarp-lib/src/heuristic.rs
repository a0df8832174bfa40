//! Distance estimators used by the search algorithms.
//!
//! All functions take absolute coordinate deltas and return the estimated
//! distance between the two cells.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

const F: f64 = std::f64::consts::SQRT_2 - 1.0;

/// Manhattan distance: `dx + dy`.
pub fn manhattan(dx: i32, dy: i32) -> f64 {
    (dx + dy) as f64
}

/// Euclidean distance: `sqrt(dx * dx + dy * dy)`.
pub fn euclidean(dx: i32, dy: i32) -> f64 {
    (dx as f64).hypot(dy as f64)
}

/// Octile distance: straight-line distance under 8-way movement with
/// diagonal cost √2.
pub fn octile(dx: i32, dy: i32) -> f64 {
    if dx < dy {
        F * dx as f64 + dy as f64
    } else {
        F * dy as f64 + dx as f64
    }
}

/// Chebyshev distance: `max(dx, dy)`.
pub fn chebyshev(dx: i32, dy: i32) -> f64 {
    dx.max(dy) as f64
}

/// Heuristic selector accepted at the search boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    Manhattan,
    Euclidean,
    Octile,
    Chebyshev,
}

impl Heuristic {
    /// Evaluate the selected heuristic for the given absolute deltas.
    pub fn apply(self, dx: i32, dy: i32) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(dx, dy),
            Heuristic::Euclidean => euclidean(dx, dy),
            Heuristic::Octile => octile(dx, dy),
            Heuristic::Chebyshev => chebyshev(dx, dy),
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Manhattan
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Octile => "octile",
            Heuristic::Chebyshev => "chebyshev",
        };
        f.write_str(value)
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            "octile" => Ok(Heuristic::Octile),
            "chebyshev" => Ok(Heuristic::Chebyshev),
            other => Err(Error::UnknownHeuristic {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octile_mixes_straight_and_diagonal_cost() {
        assert!((octile(3, 0) - 3.0).abs() < 1e-9);
        assert!((octile(0, 2) - 2.0).abs() < 1e-9);
        assert!((octile(2, 2) - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
        assert!((octile(4, 1) - (4.0 + F)).abs() < 1e-9);
    }

    #[test]
    fn selector_round_trips_through_display() {
        for heuristic in [
            Heuristic::Manhattan,
            Heuristic::Euclidean,
            Heuristic::Octile,
            Heuristic::Chebyshev,
        ] {
            assert_eq!(heuristic.to_string().parse::<Heuristic>().unwrap(), heuristic);
        }
    }

    #[test]
    fn unknown_selector_is_rejected() {
        assert!("taxicab".parse::<Heuristic>().is_err());
    }
}
