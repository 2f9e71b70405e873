//! Board tests - grid store routing and hidden-buffer ordering

use columns_engine::core::{Board, Piece};
use columns_engine::types::{Color, Coord, HIDDEN_ROWS};

#[test]
fn test_new_board_is_empty() {
    let board = Board::new(13, 6);
    assert_eq!(board.rows(), 13);
    assert_eq!(board.columns(), 6);
    assert_eq!(board.occupied_cells(), 0);

    for y in 0..(13 + HIDDEN_ROWS) as i8 {
        for x in 0..6 {
            assert_eq!(board.get(Coord::new(x, y)), Some(None));
        }
    }
}

#[test]
fn test_visible_and_hidden_extents() {
    let board = Board::new(13, 6);

    assert!(board.in_visible(Coord::new(0, 0)));
    assert!(board.in_visible(Coord::new(5, 12)));
    assert!(!board.in_visible(Coord::new(0, 13)));

    // Exactly two staging rows above the visible top.
    assert!(board.in_extended(Coord::new(0, 13)));
    assert!(board.in_extended(Coord::new(0, 14)));
    assert!(!board.in_extended(Coord::new(0, 15)));

    assert_eq!(board.get(Coord::new(-1, 0)), None);
    assert_eq!(board.get(Coord::new(0, 15)), None);
}

#[test]
fn test_cells_route_by_row() {
    let mut board = Board::new(13, 6);

    assert!(board.put(Coord::new(2, 12), Some(Piece::new(Color::S))));
    assert!(board.put(Coord::new(2, 13), Some(Piece::new(Color::X))));
    assert!(!board.put(Coord::new(2, 15), Some(Piece::new(Color::Y))));

    assert_eq!(
        board.piece(Coord::new(2, 12)).map(|p| p.color()),
        Some(Color::S)
    );
    assert_eq!(
        board.piece(Coord::new(2, 13)).map(|p| p.color()),
        Some(Color::X)
    );
    assert_eq!(board.occupied_cells(), 2);
}

#[test]
fn test_take_leaves_slot_empty() {
    let mut board = Board::new(5, 4);
    board.put(Coord::new(3, 2), Some(Piece::new(Color::W)));

    let piece = board.take(Coord::new(3, 2));
    assert_eq!(piece.map(|p| p.color()), Some(Color::W));
    assert_eq!(board.get(Coord::new(3, 2)), Some(None));
    assert_eq!(board.take(Coord::new(3, 2)), None);
}

#[test]
fn test_hidden_iteration_is_bottom_up_deterministic() {
    let mut board = Board::new(5, 4);
    // Insert out of order; iteration must still be row- then column-sorted.
    board.put(Coord::new(1, 6), Some(Piece::new(Color::S)));
    board.put(Coord::new(3, 5), Some(Piece::new(Color::T)));
    board.put(Coord::new(0, 5), Some(Piece::new(Color::V)));
    board.put(Coord::new(2, 6), Some(Piece::new(Color::W)));

    assert_eq!(
        board.hidden_locations(),
        vec![
            Coord::new(0, 5),
            Coord::new(3, 5),
            Coord::new(1, 6),
            Coord::new(2, 6),
        ]
    );
}
