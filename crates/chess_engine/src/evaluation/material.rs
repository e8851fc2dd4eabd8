//! Material evaluation
//!
//! Evaluates the material balance of a position by counting piece values.

use crate::constants::*;
use crate::types::*;

/// Evaluate material balance (positive favours white)
pub fn evaluate_material(game: &Game) -> i16 {
    let mut score = 0i16;

    for square in 0..64 {
        let piece = game.board[square];
        if piece != EMPTY && piece.abs() != KING_ID {
            let piece_value = FIGURE_VALUE[piece.abs() as usize];
            score += if piece > 0 { piece_value } else { -piece_value };
        }
    }

    score
}
