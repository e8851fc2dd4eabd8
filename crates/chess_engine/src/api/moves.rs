//! Move validation
//!
//! Checks a single move against the legal move list and classifies it.

use crate::move_gen::*;
use crate::types::*;

fn find_legal(game: &mut Game, src: i8, dst: i8, promotion: i8) -> Option<KK> {
    if !(0..64).contains(&src) || !(0..64).contains(&dst) {
        return None;
    }
    generate_legal_moves(game)
        .into_iter()
        .find(|mv| mv.src == src && mv.dst == dst && mv.promotion == promotion.abs())
}

/// Check if a move is legal for the side to move and classify it
///
/// Validates that:
/// - Source square contains a piece of the side to move
/// - Move is pseudo-legal (piece can move to destination)
/// - Move doesn't leave the king in check
/// - A promotion piece is given exactly when a pawn reaches the last rank
///
/// # Examples
///
/// ```rust,ignore
/// // Check if e2-e4 is legal for White
/// let check = is_legal_move(&mut game, 12, 28, 0);
/// assert!(check.legal);
/// ```
pub fn is_legal_move(game: &mut Game, src: i8, dst: i8, promotion: i8) -> MoveCheck {
    match find_legal(game, src, dst, promotion) {
        Some(mv) => MoveCheck {
            legal: true,
            special: SpecialKind::from(&mv),
        },
        None => MoveCheck::ILLEGAL,
    }
}
