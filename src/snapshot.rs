//! Board snapshot I/O for presentation layers.
//!
//! The core engine assumes structurally valid boards; anything arriving from
//! outside (files, user-edited grids) goes through this module first. A
//! snapshot is a plain JSON 4x4 array of tile values, e.g.
//! `[[0,2,0,0],[0,0,4,0],[0,0,0,0],[0,0,0,2]]`.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{Board, SIZE};

/// Snapshot payload exactly as it appears on disk.
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
struct RawGrid(Vec<Vec<u32>>);

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected {SIZE} rows, found {0}")]
    RowCount(usize),
    #[error("row {row} has {len} cells, expected {SIZE}")]
    RowLength { row: usize, len: usize },
    #[error("cell ({row}, {col}) holds {value}, which is not 0 or a power of two >= 2")]
    TileValue { row: usize, col: usize, value: u32 },
}

/// Validate a raw grid of tile values into a [`Board`].
///
/// Accepts exactly 4 rows of 4 cells, each holding 0 or a power of two >= 2.
pub fn board_from_rows(rows: &[Vec<u32>]) -> Result<Board, SnapshotError> {
    if rows.len() != SIZE {
        return Err(SnapshotError::RowCount(rows.len()));
    }
    let mut grid = [[0u32; SIZE]; SIZE];
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != SIZE {
            return Err(SnapshotError::RowLength {
                row,
                len: cells.len(),
            });
        }
        for (col, &value) in cells.iter().enumerate() {
            if value != 0 && !(value >= 2 && value.is_power_of_two()) {
                return Err(SnapshotError::TileValue { row, col, value });
            }
            grid[row][col] = value;
        }
    }
    Ok(Board::from_grid(grid))
}

/// Parse a board from a JSON snapshot string.
pub fn board_from_json(json: &str) -> Result<Board, SnapshotError> {
    let raw: RawGrid = serde_json::from_str(json)?;
    board_from_rows(&raw.0)
}

/// Serialize a board to its JSON snapshot form.
pub fn board_to_json(board: &Board) -> String {
    let raw = RawGrid(board.grid().iter().map(|row| row.to_vec()).collect());
    serde_json::to_string(&raw).expect("grid of u32 always serializes")
}

/// Load and validate a board snapshot from a file.
pub fn load_board<P: AsRef<Path>>(path: P) -> Result<Board, SnapshotError> {
    let data = fs::read_to_string(path)?;
    board_from_json(&data)
}

/// Write a board snapshot to a file.
pub fn save_board<P: AsRef<Path>>(path: P, board: &Board) -> Result<(), SnapshotError> {
    fs::write(path, board_to_json(board))?;
    Ok(())
}
