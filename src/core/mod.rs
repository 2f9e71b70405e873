//! Core module - pure simulation logic with no external I/O
//!
//! This module contains the whole game-mechanics engine. It has zero
//! dependencies on UI, timing, or randomness; drivers supply those.

pub mod board;
pub mod field;
pub mod piece;
pub mod snapshot;

// Re-export commonly used types
pub use board::{Board, Cell};
pub use field::Field;
pub use piece::Piece;
pub use snapshot::{CellSnapshot, FieldSnapshot};
