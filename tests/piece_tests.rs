//! Piece tests - status state machine through the public API

use columns_engine::core::Piece;
use columns_engine::types::{Color, FieldError, Status, COLOR_SYMBOLS};

#[test]
fn test_every_alphabet_symbol_spawns_a_faller() {
    for &symbol in &COLOR_SYMBOLS {
        let piece = Piece::from_symbol(symbol).unwrap();
        assert_eq!(piece.status(), Status::Faller);
        assert_eq!(piece.color().as_symbol(), symbol);
    }
}

#[test]
fn test_unknown_symbols_are_invalid_colors() {
    for symbol in ['A', 'B', 's', 'z', '1', ' ', '?'] {
        assert_eq!(Piece::from_symbol(symbol), Err(FieldError::InvalidColor));
    }
}

#[test]
fn test_status_only_leaves_faller_via_advance() {
    let mut piece = Piece::new(Color::S);
    assert_eq!(piece.status(), Status::Faller);

    piece.advance();
    assert_eq!(piece.status(), Status::Landed);
    piece.advance();
    assert_eq!(piece.status(), Status::Frozen);

    // Third advance wraps the counter back to falling.
    piece.advance();
    assert_eq!(piece.status(), Status::Faller);
}

#[test]
fn test_mark_matched_contract() {
    // Never from Faller.
    let mut faller = Piece::new(Color::T);
    assert_eq!(faller.mark_matched(), Err(FieldError::InvalidMatch));

    // Always from Landed, Frozen, and Matched (idempotent).
    let mut piece = Piece::new(Color::T);
    piece.advance();
    assert!(piece.mark_matched().is_ok());
    assert!(piece.mark_matched().is_ok());
    assert_eq!(piece.status(), Status::Matched);
}
