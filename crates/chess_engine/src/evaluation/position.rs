//! Full position evaluation
//!
//! Evaluates positions using material, piece-square tables, and mobility.

use super::material::evaluate_material;
use super::pst::get_pst_value;
use crate::constants::*;
use crate::move_gen::*;
use crate::types::*;

/// Evaluate full position (material + positional), positive favours white
pub fn evaluate_position(game: &Game) -> i16 {
    let mut score = evaluate_material(game);

    for square in 0..64 {
        let piece = game.board[square];
        if piece != EMPTY {
            score += get_pst_value(piece, square as i8);
        }
    }

    // Mobility bonus (simplified)
    let white_moves = generate_pseudo_legal_moves(game, COLOR_WHITE).len() as i16;
    let black_moves = generate_pseudo_legal_moves(game, COLOR_BLACK).len() as i16;
    score += (white_moves - black_moves) * 5;

    score
}

/// Evaluation from the point of view of `color`
pub fn evaluate_for(game: &Game, color: Color) -> i16 {
    let score = evaluate_position(game);
    if color > 0 {
        score
    } else {
        -score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{game_from_fen, new_game};

    #[test]
    fn test_start_position_balanced() {
        let game = new_game();
        assert_eq!(evaluate_position(&game), 0);
    }

    #[test]
    fn test_extra_rook_dominates() {
        let game = game_from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert!(evaluate_position(&game) > ROOK_VALUE / 2);
        assert!(evaluate_for(&game, COLOR_BLACK) < 0);
    }
}
