//! King move generation
//!
//! Generates the eight single-step king moves plus castling. Castling is emitted only when
//! the right is still held, the rook stands on its corner, the squares between are empty,
//! and the king does not start in, pass through or land on an attacked square.

use super::attack::is_square_attacked;
use crate::board::*;
use crate::constants::*;
use crate::types::*;

/// Generate king moves from a given square
pub fn generate_king_moves(game: &Game, from: i8, color: Color, moves: &mut Vec<KK>) {
    for to in KING_OFFSETS.iter().filter_map(|&d| offset(from, d)) {
        if !piece_belongs_to(game.board[to as usize], color) {
            moves.push(KK::new(from, to, 0, FLAG_NORMAL));
        }
    }
    generate_castling_moves(game, from, color, moves);
}

fn generate_castling_moves(game: &Game, from: i8, color: Color, moves: &mut Vec<KK>) {
    let (home, kingside_bit, queenside_bit) = if color > 0 {
        (4, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE)
    } else {
        (60, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE)
    };
    if from != home || game.castling & (kingside_bit | queenside_bit) == 0 {
        return;
    }
    if is_square_attacked(game, home, -color) {
        return;
    }

    let rook = if color > 0 { W_ROOK } else { B_ROOK };
    let board = &game.board;

    if game.castling & kingside_bit != 0
        && board[(home + 3) as usize] == rook
        && is_empty(board, home + 1)
        && is_empty(board, home + 2)
        && !is_square_attacked(game, home + 1, -color)
        && !is_square_attacked(game, home + 2, -color)
    {
        moves.push(KK::new(home, home + 2, 0, FLAG_CASTLE_KINGSIDE));
    }

    if game.castling & queenside_bit != 0
        && board[(home - 4) as usize] == rook
        && is_empty(board, home - 1)
        && is_empty(board, home - 2)
        && is_empty(board, home - 3)
        && !is_square_attacked(game, home - 1, -color)
        && !is_square_attacked(game, home - 2, -color)
    {
        moves.push(KK::new(home, home - 2, 0, FLAG_CASTLE_QUEENSIDE));
    }
}
