//! Deterministic simulation core for a falling-block color-matching puzzle.
//!
//! The engine models a Columns-style game: a visible grid topped by a
//! two-row hidden staging buffer, jewels with a four-state lifecycle
//! (faller, landed, frozen, matched), a player-controlled three-cell faller,
//! a discrete gravity stepper, a six-direction match scanner, and a cascade
//! clearer. It is:
//!
//! - **Deterministic**: no clock, no randomness; callers drive every step
//! - **Synchronous**: each operation completes atomically before returning
//! - **Headless**: rendering, input, pacing, and color selection are the
//!   driver's job and happen through read-only snapshots
//!
//! # Module Structure
//!
//! - [`core::piece`]: one jewel and its status state machine
//! - [`core::board`]: dense visible grid plus the bounded hidden buffer
//! - [`core::field`]: spawn/shift/rotate/tick engine with gravity, match
//!   scanning, and cascade clearing
//! - [`core::snapshot`]: owned copies of visible state for collaborators
//! - [`types`]: colors, statuses, coordinates, and the error taxonomy
//!
//! # Example
//!
//! ```
//! use columns_engine::core::Field;
//! use columns_engine::types::Direction;
//!
//! // 13 x 6 board, empty to start; rows are given bottom-up.
//! let mut field = Field::new(13, 6, &["      "; 13]).unwrap();
//! assert!(field.is_settled());
//!
//! // Drop a faller into column 3 and steer it.
//! field.spawn_column(&['S', 'X', 'Y'], 3).unwrap();
//! field.tick().unwrap();
//! field.shift(Direction::Left).unwrap();
//! field.rotate().unwrap();
//!
//! // Drive it down until the unit freezes into the stack.
//! while !field.is_settled() {
//!     field.tick().unwrap();
//! }
//! assert!(!field.has_active_faller());
//! ```

pub mod core;
pub mod types;

pub use crate::core::{Field, FieldSnapshot};
pub use crate::types::{Color, Direction, FieldError, Status};
