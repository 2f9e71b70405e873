//! Read-only copies of engine state for collaborators
//!
//! Snapshots are owned copies, never aliases into the live grid, so a
//! renderer can hold one across frames without blocking engine mutation.

use crate::types::{Color, Status};

/// One visible cell as seen by a collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSnapshot {
    pub color: Color,
    pub status: Status,
}

/// Copy of the visible grid plus the derived board flags
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSnapshot {
    pub rows: u8,
    pub columns: u8,
    /// Visible cells, row-major from the bottom (y * columns + x)
    pub cells: Vec<Option<CellSnapshot>>,
    pub settled: bool,
    pub pending_matches: bool,
    pub game_over: bool,
}

impl FieldSnapshot {
    /// Cell at (x, y); None when empty or out of bounds
    pub fn get(&self, x: u8, y: u8) -> Option<CellSnapshot> {
        if x >= self.columns || y >= self.rows {
            return None;
        }
        self.cells[y as usize * self.columns as usize + x as usize]
    }

    /// Number of occupied visible cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Render one visible row as symbols (space = empty), bottom row is y = 0
    pub fn row_symbols(&self, y: u8) -> String {
        (0..self.columns)
            .map(|x| self.get(x, y).map_or(' ', |cell| cell.color.as_symbol()))
            .collect()
    }
}
