//! Board utilities and helper functions
//!
//! Provides fundamental board operations used throughout the engine:
//! - Square validation and indexing
//! - Piece queries
//! - Square naming in algebraic form

use crate::constants::*;
use crate::types::*;

/// Convert column and row to linear position (0-63)
#[inline]
pub fn square_to_pos(col: i8, row: i8) -> i8 {
    row * 8 + col
}

/// Convert position to (col, row)
#[inline]
pub fn pos_to_square(pos: i8) -> (i8, i8) {
    (pos % 8, pos / 8)
}

/// Check if square coordinates are valid
#[inline]
pub fn is_valid_square(col: i8, row: i8) -> bool {
    (0..8).contains(&col) && (0..8).contains(&row)
}

/// Step from `pos` by a `(file, rank)` offset, returning `None` off the board.
#[inline]
pub fn offset(pos: i8, (df, dr): (i8, i8)) -> Option<i8> {
    let (col, row) = pos_to_square(pos);
    let (col, row) = (col + df, row + dr);
    is_valid_square(col, row).then(|| square_to_pos(col, row))
}

/// Get piece at position
#[inline]
pub fn get_piece_at(board: &Board, pos: i8) -> i8 {
    board[pos as usize]
}

/// Check if square is empty
#[inline]
pub fn is_empty(board: &Board, pos: i8) -> bool {
    board[pos as usize] == EMPTY
}

/// Check if piece belongs to color (1 = white, -1 = black)
#[inline]
pub fn piece_belongs_to(piece: i8, color: Color) -> bool {
    if piece == EMPTY {
        false
    } else if color > 0 {
        piece > 0
    } else {
        piece < 0
    }
}

/// Initial piece placement
pub fn init_board() -> Board {
    const BACK_RANK: [i8; 8] = [
        ROOK_ID, KNIGHT_ID, BISHOP_ID, QUEEN_ID, KING_ID, BISHOP_ID, KNIGHT_ID, ROOK_ID,
    ];
    let mut board = [EMPTY; 64];
    for col in 0..8 {
        board[col] = BACK_RANK[col];
        board[8 + col] = W_PAWN;
        board[48 + col] = B_PAWN;
        board[56 + col] = -BACK_RANK[col];
    }
    board
}

/// Algebraic name of a square, e.g. `e4`.
pub fn square_name(pos: i8) -> String {
    let (col, row) = pos_to_square(pos);
    let file = (b'a' + col as u8) as char;
    let rank = (b'1' + row as u8) as char;
    format!("{file}{rank}")
}

/// Parse an algebraic square name such as `e4`.
pub fn parse_square(text: &str) -> Option<i8> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let col = bytes[0].wrapping_sub(b'a') as i8;
    let row = bytes[1].wrapping_sub(b'1') as i8;
    is_valid_square(col, row).then(|| square_to_pos(col, row))
}
