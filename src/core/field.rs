//! Field module - the tick-driven simulation engine
//!
//! The field owns all grid mutation. External drivers spawn a three-cell
//! faller, shift and rotate it, and advance the simulation one discrete step
//! at a time with [`Field::tick`]; everything else (pacing, input, rendering,
//! color selection) lives outside and observes through read-only snapshots.
//!
//! A tick interleaves three concerns in a fixed order: clear pending matches
//! and re-settle, scan for new color runs once the board is quiet enough,
//! then run one gravity pass for the active faller. Gravity walks the
//! visible grid bottom-up and the hidden buffer in sorted order so no piece
//! moves twice in a single pass.

use arrayvec::ArrayVec;

use crate::core::snapshot::{CellSnapshot, FieldSnapshot};
use crate::core::{Board, Piece};
use crate::types::{
    Color, Coord, Direction, FieldError, Status, HIDDEN_ROWS, MATCH_RUN, MAX_COLUMNS, MAX_ROWS,
    MIN_COLUMNS, MIN_ROWS,
};

/// Number of cells in a faller unit
const FALLER_CELLS: usize = 3;

/// The simulation engine for one game
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    board: Board,
    /// True iff no piece anywhere has status below Frozen
    all_frozen: bool,
    /// True iff any matched piece is still awaiting removal
    matches: bool,
    /// Lowest cell of the active faller; None when no faller is live
    column_base: Option<Coord>,
    /// Latched once the hidden buffer overflows; the engine is then terminal
    game_over: bool,
}

impl Field {
    /// Create a field from a bottom-up layout of rows
    ///
    /// Each row string holds one character per column: a space for an empty
    /// cell, otherwise a symbol from the color alphabet. The layout is
    /// copied; the engine never aliases caller memory. Construction runs
    /// gravity to full settlement and one initial match scan, so a layout
    /// with floating pieces or ready-made runs is observable immediately
    /// through `is_settled` / `has_pending_matches`.
    pub fn new(rows: u8, columns: u8, layout: &[&str]) -> Result<Self, FieldError> {
        if !(MIN_ROWS..=MAX_ROWS).contains(&rows) || !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns)
        {
            return Err(FieldError::InvalidAction);
        }
        if layout.len() != rows as usize {
            return Err(FieldError::InvalidAction);
        }

        let mut board = Board::new(rows, columns);
        for (y, line) in layout.iter().enumerate() {
            if line.chars().count() != columns as usize {
                return Err(FieldError::InvalidAction);
            }
            for (x, symbol) in line.chars().enumerate() {
                if symbol != ' ' {
                    let piece = Piece::from_symbol(symbol)?;
                    board.put(Coord::new(x as i8, y as i8), Some(piece));
                }
            }
        }

        let mut field = Self {
            board,
            all_frozen: false,
            matches: false,
            column_base: None,
            game_over: false,
        };

        while !field.all_frozen {
            field.drop_all()?;
        }
        field.label_all_matches()?;

        Ok(field)
    }

    pub fn rows(&self) -> u8 {
        self.board.rows()
    }

    pub fn columns(&self) -> u8 {
        self.board.columns()
    }

    /// True iff the simulation is fully settled (no piece below Frozen)
    pub fn is_settled(&self) -> bool {
        self.all_frozen
    }

    /// True iff matched pieces remain on the board awaiting removal
    pub fn has_pending_matches(&self) -> bool {
        self.matches
    }

    /// True while a spawned faller is still under player control
    pub fn has_active_faller(&self) -> bool {
        self.column_base.is_some()
    }

    /// True once the engine has hit the fatal overflow condition
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Read-only copy of the visible grid plus the derived flags
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            rows: self.board.rows(),
            columns: self.board.columns(),
            cells: self
                .board
                .visible_cells()
                .map(|cell| {
                    cell.map(|piece| CellSnapshot {
                        color: piece.color(),
                        status: piece.status(),
                    })
                })
                .collect(),
            settled: self.all_frozen,
            pending_matches: self.matches,
            game_over: self.game_over,
        }
    }

    /// Spawn a new faller of the given colors into a column
    ///
    /// The bottom cell lands on the top visible row and the other two are
    /// staged in the hidden buffer directly above. When the cell one row
    /// below the visible top is already occupied, all three pieces start one
    /// status step ahead (Landed) to compress the drop on a tall stack.
    pub fn spawn_column(&mut self, colors: &[char], column: u8) -> Result<(), FieldError> {
        if self.game_over {
            return Err(FieldError::GameOver);
        }
        if column >= self.board.columns()
            || !self.all_frozen
            || self.matches
            || colors.len() != FALLER_CELLS
        {
            return Err(FieldError::InvalidAction);
        }

        let mut pieces: ArrayVec<Piece, FALLER_CELLS> = ArrayVec::new();
        for &symbol in colors {
            pieces.push(Piece::from_symbol(symbol)?);
        }

        let top = self.board.rows() as i8 - 1;
        let x = column as i8;
        if self.board.piece(Coord::new(x, top - 1)).is_some() {
            for piece in pieces.iter_mut() {
                piece.advance();
            }
        }

        self.column_base = Some(Coord::new(x, top));
        self.all_frozen = false;
        self.board.put(Coord::new(x, top), Some(pieces[0]));
        self.board.put(Coord::new(x, top + 1), Some(pieces[1]));
        self.board.put(Coord::new(x, top + 2), Some(pieces[2]));
        Ok(())
    }

    /// Advance the simulation one discrete step
    pub fn tick(&mut self) -> Result<(), FieldError> {
        if self.game_over {
            return Err(FieldError::GameOver);
        }

        if self.matches {
            self.clear_matches()?;
            while !self.all_frozen {
                self.drop_all()?;
            }
        }

        let base_landed = self.column_base.map_or(false, |base| {
            self.board
                .piece(base)
                .map_or(false, |piece| piece.status() == Status::Landed)
        });
        if self.all_frozen || base_landed {
            self.label_all_matches()?;
        }

        if self.column_base.is_some() {
            self.drop_all()?;
        }
        Ok(())
    }

    /// Shift the active faller one column left or right
    ///
    /// The move is gated on the base cell: if the base cannot move, nothing
    /// moves. A successful shift may bump the faller's status to reconcile
    /// the support change a lateral move creates (off a ledge: two bumps back
    /// toward falling; onto a stack: one bump toward settling).
    pub fn shift(&mut self, direction: Direction) -> Result<(), FieldError> {
        if self.game_over {
            return Err(FieldError::GameOver);
        }
        let base = self.column_base.ok_or(FieldError::InvalidAction)?;
        if self.matches {
            return Err(FieldError::InvalidAction);
        }

        let step = direction.vector();
        if self.move_piece(base, step) {
            self.move_piece(base + Coord::UP, step);
            self.move_piece(base + Coord::UP + Coord::UP, step);
            let base = base + step;
            self.column_base = Some(base);

            let below = base + Coord::DOWN;
            if below.y > -1 {
                let supported = self.board.piece(below).is_some();
                let base_status = self.board.piece(base).map(|piece| piece.status());
                if !supported && base_status == Some(Status::Landed) {
                    self.bump_faller(2);
                } else if supported && base_status == Some(Status::Faller) {
                    self.bump_faller(1);
                }
            }
        }
        Ok(())
    }

    /// Conveyor-rotate the active faller
    ///
    /// The middle and top cells each move down one slot and the previous base
    /// piece reappears in the top slot (staged in the hidden buffer when that
    /// slot is above the visible top). Statuses are untouched.
    pub fn rotate(&mut self) -> Result<(), FieldError> {
        if self.game_over {
            return Err(FieldError::GameOver);
        }
        let base = self.column_base.ok_or(FieldError::InvalidAction)?;
        if self.matches {
            return Err(FieldError::InvalidAction);
        }

        let lifted = self.board.take(base);
        self.move_piece(base + Coord::UP, Coord::DOWN);
        self.move_piece(base + Coord::UP + Coord::UP, Coord::DOWN);
        self.board.put(Coord::new(base.x, base.y + 2), lifted);
        Ok(())
    }

    /// One gravity step over the whole grid, then re-anchor the faller
    fn drop_all(&mut self) -> Result<(), FieldError> {
        self.all_frozen = true;
        self.drop_visible();
        self.drop_hidden()?;
        self.update_faller_base();
        Ok(())
    }

    /// Gravity pass over the visible grid, bottom row first
    fn drop_visible(&mut self) {
        for y in 0..self.board.rows() as i8 {
            for x in 0..self.board.columns() as i8 {
                let loc = Coord::new(x, y);
                let Some(piece) = self.board.piece(loc) else {
                    continue;
                };
                if piece.status() >= Status::Frozen {
                    continue;
                }

                if self.move_piece(loc, Coord::DOWN) {
                    self.all_frozen = false;
                    // Pre-emptive landing: if the cell below the new position
                    // is the floor or a settled piece, the moved piece lands
                    // now instead of waiting one more tick.
                    let two_below = loc + Coord::DOWN + Coord::DOWN;
                    let grounded = two_below.y == -1
                        || self
                            .board
                            .piece(two_below)
                            .map_or(false, |below| below.status() > Status::Faller);
                    if grounded {
                        self.advance_at(loc + Coord::DOWN);
                    }
                } else {
                    self.advance_at(loc);
                    if self.board.piece(loc).map(|p| p.status()) != Some(Status::Frozen) {
                        self.all_frozen = false;
                    }
                }
            }
        }
    }

    /// Gravity pass over the hidden buffer, bottom row first
    ///
    /// A blocked hidden piece that is still a faller lands in place; one that
    /// has already landed with no pending matches to open space below means
    /// the stack has overflowed for good.
    fn drop_hidden(&mut self) -> Result<(), FieldError> {
        for loc in self.board.hidden_locations() {
            let Some(piece) = self.board.piece(loc) else {
                continue;
            };
            let new_loc = loc + Coord::DOWN;

            let into_visible =
                self.board.in_visible(new_loc) && self.board.piece(new_loc).is_none();
            let within_hidden =
                !self.board.in_visible(new_loc) && self.board.piece(new_loc).is_none();

            if into_visible || within_hidden {
                let cell = self.board.take(loc);
                self.board.put(new_loc, cell);

                let below = new_loc + Coord::DOWN;
                match self.board.piece(below) {
                    None => {
                        // Nothing underneath yet: double advance mirrors the
                        // compressed drop used for spawns onto a tall stack.
                        self.advance_at(new_loc);
                        self.advance_at(new_loc);
                        self.all_frozen = false;
                    }
                    Some(support) if support.status() != Status::Faller => {
                        self.advance_at(new_loc);
                        self.all_frozen = false;
                    }
                    _ => {}
                }
            } else if piece.status() == Status::Faller {
                self.advance_at(loc);
            } else if !self.matches {
                self.game_over = true;
                return Err(FieldError::GameOver);
            }
        }
        Ok(())
    }

    /// Re-anchor (or retire) the faller after a gravity step
    fn update_faller_base(&mut self) {
        if let Some(base) = self.column_base {
            match self.board.piece(base) {
                None => self.column_base = None,
                Some(piece) if piece.status() == Status::Frozen => self.column_base = None,
                _ => self.column_base = Some(base + Coord::DOWN),
            }
        }
    }

    /// Scan the whole board (hidden buffer included) for color runs
    ///
    /// Six (start, shift, scan) triples cover every maximal straight line
    /// exactly once: columns, rows, and both diagonal families, each diagonal
    /// family anchored along two edges.
    fn label_all_matches(&mut self) -> Result<(), FieldError> {
        if !self.all_frozen {
            let base = self.column_base.ok_or(FieldError::InvalidAction)?;
            let landed = self
                .board
                .piece(base)
                .map_or(false, |piece| piece.status() == Status::Landed);
            if !landed {
                return Err(FieldError::InvalidAction);
            }
        }

        let rows = self.board.rows() as i8;
        let columns = self.board.columns() as i8;
        let lanes = [
            // columns, scanned bottom to top
            (Coord::new(0, 0), Coord::RIGHT, Coord::UP),
            // rows, scanned left to right
            (Coord::new(0, 0), Coord::UP, Coord::RIGHT),
            // up-right diagonals anchored along the bottom edge, then the left
            (Coord::new(columns - 3, 0), Coord::LEFT, Coord::new(1, 1)),
            (Coord::new(0, rows - 3), Coord::DOWN, Coord::new(1, 1)),
            // up-left diagonals anchored along the bottom edge, then the right
            (Coord::new(2, 0), Coord::RIGHT, Coord::new(-1, 1)),
            (Coord::new(columns - 1, rows - 3), Coord::DOWN, Coord::new(-1, 1)),
        ];

        for (start, shift, scan) in lanes {
            self.label_sequences(start, shift, scan)?;
        }
        Ok(())
    }

    /// Walk one family of parallel lines, marking runs along each
    fn label_sequences(
        &mut self,
        mut start: Coord,
        shift: Coord,
        scan: Coord,
    ) -> Result<(), FieldError> {
        let mut lane: Vec<Option<Coord>> = Vec::new();

        while self.board.in_visible(start) {
            lane.clear();
            let mut pos = start;
            while self.board.in_extended(pos) {
                if self.board.in_visible(pos) {
                    // Visible empties break runs; absent hidden slots are
                    // simply not part of the line.
                    lane.push(self.board.piece(pos).map(|_| pos));
                } else if self.board.piece(pos).is_some() {
                    lane.push(Some(pos));
                }
                pos = pos + scan;
            }
            self.label_sequence(&lane)?;
            start = start + shift;
        }
        Ok(())
    }

    /// Mark color runs of three or more along a single line
    fn label_sequence(&mut self, lane: &[Option<Coord>]) -> Result<(), FieldError> {
        let mut previous: Option<Color> = None;
        let mut run = 1usize;

        for i in 0..lane.len() {
            let Some(loc) = lane[i] else {
                previous = None;
                continue;
            };
            let Some(piece) = self.board.piece(loc) else {
                previous = None;
                continue;
            };
            let color = piece.color();

            if previous == Some(color) {
                run += 1;
                if run == MATCH_RUN {
                    self.matches = true;
                    for entry in &lane[i - 2..=i] {
                        if let Some(member) = *entry {
                            self.mark_matched_at(member)?;
                        }
                    }
                } else if run > MATCH_RUN {
                    self.mark_matched_at(loc)?;
                }
            } else {
                run = 1;
            }
            previous = Some(color);
        }
        Ok(())
    }

    /// Remove every matched piece and release the pieces stacked above
    fn clear_matches(&mut self) -> Result<(), FieldError> {
        if !self.all_frozen {
            return Err(FieldError::InvalidAction);
        }
        self.matches = false;

        let rows = self.board.rows() as i8;
        let columns = self.board.columns() as i8;

        for y in 0..rows {
            for x in 0..columns {
                let loc = Coord::new(x, y);
                if self.board.piece(loc).map(|p| p.status()) != Some(Status::Matched) {
                    continue;
                }

                self.board.take(loc);
                self.all_frozen = false;

                // Frozen pieces above the gap resume falling.
                for above_y in y + 1..rows {
                    let above = Coord::new(x, above_y);
                    if let Some(piece) = self.board.piece_mut(above) {
                        if piece.status() == Status::Frozen {
                            piece.advance();
                        }
                    }
                }

                // Hidden pieces in the column get bumped too; a piece that
                // would land mid-air right at the gap is bumped twice more so
                // it keeps falling instead of stalling.
                for hidden_y in rows..rows + HIDDEN_ROWS as i8 {
                    let staged = Coord::new(x, hidden_y);
                    if let Some(piece) = self.board.piece_mut(staged) {
                        if piece.status() < Status::Matched {
                            piece.advance();
                            if piece.status() == Status::Landed {
                                piece.advance();
                                piece.advance();
                            }
                        }
                    }
                }
            }
        }

        for loc in self.board.hidden_locations() {
            if self.board.piece(loc).map(|p| p.status()) == Some(Status::Matched) {
                self.board.take(loc);
            }
        }
        Ok(())
    }

    /// Move the piece at `start` one step in `direction` if the target slot
    /// is free, transferring ownership. Returns false when blocked.
    fn move_piece(&mut self, start: Coord, direction: Coord) -> bool {
        let target = start + direction;
        if !self.valid_move(start, target) {
            return false;
        }
        let cell = self.board.take(start);
        self.board.put(target, cell);
        true
    }

    /// A move is valid into an empty visible cell from anywhere on the
    /// extended grid, or between hidden slots when the target slot is free
    fn valid_move(&self, start: Coord, target: Coord) -> bool {
        let rows = self.board.rows() as i8;
        (self.board.in_visible(target)
            && self.board.in_extended(start)
            && self.board.piece(target).is_none())
            || (target.y >= rows
                && start.y >= rows
                && self.board.in_extended(target)
                && self.board.in_extended(start)
                && self.board.piece(target).is_none())
    }

    /// Advance the status of all three faller cells `bumps` times each
    fn bump_faller(&mut self, bumps: u8) {
        let Some(base) = self.column_base else {
            return;
        };
        for dy in 0..FALLER_CELLS as i8 {
            let loc = Coord::new(base.x, base.y + dy);
            if let Some(piece) = self.board.piece_mut(loc) {
                for _ in 0..bumps {
                    piece.advance();
                }
            }
        }
    }

    /// Advance the status of the piece at a location, if any
    fn advance_at(&mut self, loc: Coord) {
        if let Some(piece) = self.board.piece_mut(loc) {
            piece.advance();
        }
    }

    /// Mark the piece at a location as matched
    fn mark_matched_at(&mut self, loc: Coord) -> Result<(), FieldError> {
        match self.board.piece_mut(loc) {
            Some(piece) => piece.mark_matched(),
            None => Err(FieldError::InvalidMatch),
        }
    }

    #[cfg(test)]
    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn column_base(&self) -> Option<Coord> {
        self.column_base
    }
}
