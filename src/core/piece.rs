//! Piece module - a colored unit with a four-state lifecycle
//!
//! Pieces advance Faller -> Landed -> Frozen on gravity ticks and wrap back
//! to Faller when a clear releases them. Matching is only legal once a piece
//! has at least landed.

use crate::types::{Color, FieldError, Status};

/// A single colored game piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    status: Status,
}

impl Piece {
    /// Create a new falling piece of the given color
    pub fn new(color: Color) -> Self {
        Self {
            color,
            status: Status::Faller,
        }
    }

    /// Create a piece from its alphabet symbol
    ///
    /// Fails with `InvalidColor` for anything outside the fixed alphabet.
    pub fn from_symbol(symbol: char) -> Result<Self, FieldError> {
        Color::from_symbol(symbol)
            .map(Self::new)
            .ok_or(FieldError::InvalidColor)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Advance the lifecycle counter one step (modulo-3 wraparound)
    pub fn advance(&mut self) {
        self.status = self.status.advanced();
    }

    /// Flag the piece for removal after a qualifying color run
    ///
    /// Idempotent for already-matched pieces; fails with `InvalidMatch` when
    /// the piece is still falling.
    pub fn mark_matched(&mut self) -> Result<(), FieldError> {
        if self.status > Status::Faller {
            self.status = Status::Matched;
            Ok(())
        } else {
            Err(FieldError::InvalidMatch)
        }
    }
}
