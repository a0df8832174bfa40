//! `.map` file loading end to end.

use std::fs;

use gridwarp_lib::{load_grid, load_map, Error};
use tempfile::TempDir;

const SAMPLE: &str = "\
type octile
height 4
width 5
map
.....
.@@@.
.@...
.....
";

#[test]
fn loads_a_map_into_a_grid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rooms.map");
    fs::write(&path, SAMPLE).unwrap();

    let grid = load_grid(&path).unwrap();
    assert_eq!(grid.width(), 5);
    assert_eq!(grid.height(), 4);
    assert!(grid.is_walkable_at(0, 0));
    assert!(!grid.is_walkable_at(1, 1));
    assert!(!grid.is_walkable_at(1, 2));
    assert!(grid.is_walkable_at(2, 2));
}

#[test]
fn matrix_matches_the_file_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rooms.map");
    fs::write(&path, SAMPLE).unwrap();

    let matrix = load_map(&path).unwrap();
    assert_eq!(matrix.len(), 4);
    assert_eq!(matrix[1], vec![true, false, false, false, true]);
}

#[test]
fn malformed_headers_are_rejected() {
    let dir = TempDir::new().unwrap();

    for (name, content) in [
        ("empty.map", ""),
        ("height.map", "type octile\nheight many\nwidth 5\nmap\n"),
        ("marker.map", "type octile\nheight 1\nwidth 5\n.....\n"),
        ("rows.map", "type octile\nheight 2\nwidth 5\nmap\n.....\n"),
        ("ragged.map", "type octile\nheight 2\nwidth 5\nmap\n.....\n...\n"),
    ] {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        assert!(
            matches!(load_map(&path), Err(Error::MapFormat { .. })),
            "{name} should be rejected"
        );
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.map");
    assert!(matches!(load_map(&path), Err(Error::Io(_))));
}
