//! Loader for `.map` text files.
//!
//! The format is a type line, a `height N` line, a `width N` line, a `map`
//! marker line, then `N` rows of cell characters. `.` marks a walkable
//! cell; every other character is an obstacle.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Read a `.map` file into a row-major walkability matrix.
pub fn load_map(path: &Path) -> Result<Vec<Vec<bool>>> {
    let text = fs::read_to_string(path)?;
    parse_map(&text)
}

/// Read a `.map` file straight into a [`Grid`].
pub fn load_grid(path: &Path) -> Result<Grid> {
    let matrix = load_map(path)?;
    let height = matrix.len();
    let width = matrix.first().map(Vec::len).unwrap_or(0);
    debug!(width, height, path = %path.display(), "map loaded");
    Grid::from_matrix(width, height, matrix)
}

fn parse_map(text: &str) -> Result<Vec<Vec<bool>>> {
    let format = |message: &str| Error::MapFormat {
        message: message.to_string(),
    };

    let mut lines = text.lines();
    lines
        .next()
        .ok_or_else(|| format("missing type line"))?;
    let height = dimension_line(lines.next(), "height")?;
    let width = dimension_line(lines.next(), "width")?;
    match lines.next() {
        Some(line) if line.trim() == "map" => {}
        _ => return Err(format("missing map marker line")),
    }

    let mut matrix = Vec::with_capacity(height);
    for row in 0..height {
        let line = lines
            .next()
            .ok_or_else(|| format(&format!("expected {height} rows, found {row}")))?;
        let cells: Vec<bool> = line.chars().map(|c| c == '.').collect();
        if cells.len() != width {
            return Err(format(&format!(
                "row {row} has {} cells, expected {width}",
                cells.len()
            )));
        }
        matrix.push(cells);
    }
    Ok(matrix)
}

fn dimension_line(line: Option<&str>, name: &str) -> Result<usize> {
    let line = line.ok_or_else(|| Error::MapFormat {
        message: format!("missing {name} line"),
    })?;
    line.strip_prefix(name)
        .map(str::trim)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| Error::MapFormat {
            message: format!("invalid {name} line: {line:?}"),
        })
}
