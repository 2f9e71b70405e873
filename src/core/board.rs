//! Board module - grid storage for the visible field and the hidden buffer
//!
//! The visible field is a dense row-major array of optional pieces with row 0
//! at the bottom. Above it sit two staging rows where freshly spawned faller
//! cells materialize; occupancy there is capped at `2 x columns`, so the
//! hidden buffer is a bounded index addressed by coordinate rather than a map.
//! Every piece lives in exactly one slot; movement is take-then-put.

use crate::core::Piece;
use crate::types::{Coord, HIDDEN_ROWS};

/// A single grid slot (None = empty)
pub type Cell = Option<Piece>;

/// Grid store: dense visible array plus the bounded hidden index
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: u8,
    columns: u8,
    /// Visible cells, row-major from the bottom (y * columns + x)
    visible: Vec<Cell>,
    /// Hidden rows `rows` and `rows + 1`, same layout
    hidden: Vec<Cell>,
}

impl Board {
    /// Create an empty board of the given visible dimensions
    pub fn new(rows: u8, columns: u8) -> Self {
        Self {
            rows,
            columns,
            visible: vec![None; rows as usize * columns as usize],
            hidden: vec![None; HIDDEN_ROWS as usize * columns as usize],
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Check whether a coordinate lies in the visible field
    pub fn in_visible(&self, loc: Coord) -> bool {
        loc.x >= 0 && loc.x < self.columns as i8 && loc.y >= 0 && loc.y < self.rows as i8
    }

    /// Check whether a coordinate lies in the visible field or hidden buffer
    pub fn in_extended(&self, loc: Coord) -> bool {
        loc.x >= 0
            && loc.x < self.columns as i8
            && loc.y >= 0
            && loc.y < (self.rows + HIDDEN_ROWS) as i8
    }

    /// Flat index into the visible array
    #[inline(always)]
    fn visible_index(&self, loc: Coord) -> Option<usize> {
        if !self.in_visible(loc) {
            return None;
        }
        Some(loc.y as usize * self.columns as usize + loc.x as usize)
    }

    /// Flat index into the hidden buffer
    #[inline(always)]
    fn hidden_index(&self, loc: Coord) -> Option<usize> {
        if !self.in_extended(loc) || loc.y < self.rows as i8 {
            return None;
        }
        Some((loc.y as usize - self.rows as usize) * self.columns as usize + loc.x as usize)
    }

    /// Get the cell at a coordinate, routing to the visible array or the
    /// hidden buffer by row. Returns None when out of bounds.
    pub fn get(&self, loc: Coord) -> Option<Cell> {
        if let Some(idx) = self.visible_index(loc) {
            Some(self.visible[idx])
        } else {
            self.hidden_index(loc).map(|idx| self.hidden[idx])
        }
    }

    /// Get the piece at a coordinate (None for empty or out of bounds)
    pub fn piece(&self, loc: Coord) -> Option<Piece> {
        self.get(loc).flatten()
    }

    /// Mutable access to the piece at a coordinate
    pub fn piece_mut(&mut self, loc: Coord) -> Option<&mut Piece> {
        if let Some(idx) = self.visible_index(loc) {
            self.visible[idx].as_mut()
        } else if let Some(idx) = self.hidden_index(loc) {
            self.hidden[idx].as_mut()
        } else {
            None
        }
    }

    /// Write a cell at a coordinate
    /// Returns false if out of bounds
    pub fn put(&mut self, loc: Coord, cell: Cell) -> bool {
        if let Some(idx) = self.visible_index(loc) {
            self.visible[idx] = cell;
            true
        } else if let Some(idx) = self.hidden_index(loc) {
            self.hidden[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Take the cell at a coordinate, leaving it empty
    pub fn take(&mut self, loc: Coord) -> Cell {
        if let Some(idx) = self.visible_index(loc) {
            self.visible[idx].take()
        } else if let Some(idx) = self.hidden_index(loc) {
            self.hidden[idx].take()
        } else {
            None
        }
    }

    /// Occupied hidden coordinates, row-ascending then column-ascending
    ///
    /// Drops through the hidden buffer must be processed bottom-up so a piece
    /// is never moved twice in one pass; this order guarantees that.
    pub fn hidden_locations(&self) -> Vec<Coord> {
        let columns = self.columns as usize;
        self.hidden
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_some())
            .map(|(idx, _)| {
                Coord::new(
                    (idx % columns) as i8,
                    (idx / columns) as i8 + self.rows as i8,
                )
            })
            .collect()
    }

    /// Count of occupied cells across the visible field and hidden buffer
    pub fn occupied_cells(&self) -> usize {
        self.visible.iter().chain(self.hidden.iter()).flatten().count()
    }

    /// Iterate over the visible cells row-major from the bottom
    pub fn visible_cells(&self) -> impl Iterator<Item = &Cell> {
        self.visible.iter()
    }
}
