//! Knight move generation
//!
//! Knights jump in an L-shape, so no blocking checks are needed: a destination is valid
//! when it is on the board and not occupied by a friendly piece.

use crate::board::*;
use crate::constants::*;
use crate::types::*;

/// Generate knight moves from a given square
pub fn generate_knight_moves(game: &Game, from: i8, color: Color, moves: &mut Vec<KK>) {
    for to in KNIGHT_OFFSETS.iter().filter_map(|&d| offset(from, d)) {
        if !piece_belongs_to(game.board[to as usize], color) {
            moves.push(KK::new(from, to, 0, FLAG_NORMAL));
        }
    }
}
