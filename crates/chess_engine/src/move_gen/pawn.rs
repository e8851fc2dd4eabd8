//! Pawn move generation
//!
//! Handles pawn-specific move generation including:
//! - Single and double forward pushes
//! - Diagonal captures
//! - En passant onto the current target square
//! - Promotion, expanded into one move per promotion piece
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: Pawns move one square forward (toward opponent)
//! - **Double push**: From the starting rank (rank 2 for white, rank 7 for black),
//!   pawns can move two squares forward through an empty square
//! - **Captures**: Pawns capture diagonally forward (one square)
//! - **En passant**: If an opponent pawn double-pushed past, it can be captured on the
//!   square it skipped
//! - **Promotion**: On reaching the last rank, pawns promote to queen/rook/bishop/knight

use crate::board::*;
use crate::constants::*;
use crate::types::*;

fn push_with_promotion(from: i8, to: i8, flag: u8, color: Color, moves: &mut Vec<KK>) {
    let (_, to_row) = pos_to_square(to);
    let last_row = if color > 0 { 7 } else { 0 };
    if to_row == last_row {
        for id in PROMOTION_IDS {
            moves.push(KK::promoting(from, to, id));
        }
    } else {
        moves.push(KK::new(from, to, 0, flag));
    }
}

/// Generate pawn moves from a given square
///
/// # Arguments
///
/// * `game` - The current game state
/// * `from` - Source square index (0-63)
/// * `color` - Color of the pawn (1 for White, -1 for Black)
/// * `moves` - Output vector to append valid moves to
///
/// # Examples
///
/// ```rust,ignore
/// let mut moves = Vec::new();
/// generate_pawn_moves(&game, 12, COLOR_WHITE, &mut moves);
/// // Moves now contains e2-e3, e2-e4, and any diagonal captures
/// ```
pub fn generate_pawn_moves(game: &Game, from: i8, color: Color, moves: &mut Vec<KK>) {
    let forward: i8 = if color > 0 { 1 } else { -1 };
    let start_row = if color > 0 { 1 } else { 6 };
    let (_, from_row) = pos_to_square(from);

    if let Some(one) = offset(from, (0, forward)) {
        if is_empty(&game.board, one) {
            push_with_promotion(from, one, FLAG_NORMAL, color, moves);
            if from_row == start_row {
                if let Some(two) = offset(one, (0, forward)) {
                    if is_empty(&game.board, two) {
                        moves.push(KK::new(from, two, 0, FLAG_DOUBLE_PUSH));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = offset(from, (df, forward)) else {
            continue;
        };
        let target = game.board[to as usize];
        if target != EMPTY && !piece_belongs_to(target, color) {
            push_with_promotion(from, to, FLAG_NORMAL, color, moves);
        } else if target == EMPTY && game.en_passant == Some(to) {
            moves.push(KK::new(from, to, 0, FLAG_EN_PASSANT));
        }
    }
}
