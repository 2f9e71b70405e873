//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

use std::fmt;
use std::ops::Add;

/// Fixed 7-symbol color alphabet
pub const COLOR_SYMBOLS: [char; 7] = ['S', 'T', 'V', 'W', 'X', 'Y', 'Z'];

/// Depth of the hidden staging area above the visible grid
pub const HIDDEN_ROWS: u8 = 2;

/// Minimum run length that counts as a match
pub const MATCH_RUN: usize = 3;

/// Dimension limits keeping every coordinate (hidden rows included) in `i8` range
pub const MIN_ROWS: u8 = 2;
pub const MAX_ROWS: u8 = i8::MAX as u8 - HIDDEN_ROWS;
pub const MIN_COLUMNS: u8 = 1;
pub const MAX_COLUMNS: u8 = i8::MAX as u8;

/// Jewel colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    S,
    T,
    V,
    W,
    X,
    Y,
    Z,
}

impl Color {
    /// Parse a color from its symbol (case-sensitive)
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'S' => Some(Color::S),
            'T' => Some(Color::T),
            'V' => Some(Color::V),
            'W' => Some(Color::W),
            'X' => Some(Color::X),
            'Y' => Some(Color::Y),
            'Z' => Some(Color::Z),
            _ => None,
        }
    }

    /// Convert to the display symbol
    pub fn as_symbol(&self) -> char {
        match self {
            Color::S => 'S',
            Color::T => 'T',
            Color::V => 'V',
            Color::W => 'W',
            Color::X => 'X',
            Color::Y => 'Y',
            Color::Z => 'Z',
        }
    }
}

/// Piece lifecycle status
///
/// Non-matched advancement is a modulo-3 counter over the first three
/// states: Faller -> Landed -> Frozen -> Faller. The Frozen -> Faller leg is
/// how a clear releases settled pieces back into the gravity pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Faller,
    Landed,
    Frozen,
    Matched,
}

impl Status {
    /// Next state on the modulo-3 counter
    pub fn advanced(self) -> Self {
        match self {
            Status::Faller => Status::Landed,
            Status::Landed => Status::Frozen,
            Status::Frozen => Status::Faller,
            // (3 + 1) % 3 on the original counter; unreachable in practice
            // because matched pieces are cleared before they advance again.
            Status::Matched => Status::Landed,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Faller => "faller",
            Status::Landed => "landed",
            Status::Frozen => "frozen",
            Status::Matched => "matched",
        }
    }
}

/// Lateral shift direction for the active faller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Unit translation vector for this direction
    pub fn vector(self) -> Coord {
        match self {
            Direction::Left => Coord::LEFT,
            Direction::Right => Coord::RIGHT,
        }
    }
}

/// Grid coordinate: `x` is the column, `y` the row; row 0 is the bottom
/// visible row and rows grow upward into the hidden area
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const DOWN: Coord = Coord { x: 0, y: -1 };
    pub const UP: Coord = Coord { x: 0, y: 1 };
    pub const LEFT: Coord = Coord { x: -1, y: 0 };
    pub const RIGHT: Coord = Coord { x: 1, y: 0 };

    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Engine error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Requested color is outside the fixed alphabet (recoverable)
    InvalidColor,
    /// Attempt to mark a still-falling piece as matched (invariant breach)
    InvalidMatch,
    /// Operation preconditions violated (recoverable)
    InvalidAction,
    /// Hidden buffer irrecoverably blocked; the engine is terminal (fatal)
    GameOver,
}

impl FieldError {
    pub fn code(self) -> &'static str {
        match self {
            FieldError::InvalidColor => "invalid_color",
            FieldError::InvalidMatch => "invalid_match",
            FieldError::InvalidAction => "invalid_action",
            FieldError::GameOver => "game_over",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FieldError::InvalidColor => "color is not part of the fixed alphabet",
            FieldError::InvalidMatch => "cannot mark a falling piece as matched",
            FieldError::InvalidAction => "operation preconditions not met",
            FieldError::GameOver => "stack overflowed above the visible field",
        }
    }

    /// True for the single fatal variant
    pub fn is_fatal(self) -> bool {
        matches!(self, FieldError::GameOver)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FieldError {}
