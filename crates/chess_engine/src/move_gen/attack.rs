//! Attack detection and square checking
//!
//! Provides functions to check if squares are under attack and if kings are in check.
//! This module is critical for move legality validation and check detection.
//!
//! ## Algorithm
//!
//! Instead of generating every opponent move, attacks are traced outward from the target
//! square: knight and king offsets are checked directly, sliding rays stop at the first
//! occupied square, and pawn attacks are checked on the two diagonals behind the target.

use crate::board::*;
use crate::constants::*;
use crate::types::*;

/// Check if a square is under attack by pieces of the specified color
///
/// # Arguments
///
/// * `game` - The current game state
/// * `square` - Target square index (0-63) to check
/// * `by_color` - Color of pieces that might attack (1 for White, -1 for Black)
///
/// # Returns
///
/// `true` if the square is attacked by any piece of the specified color
///
/// # Examples
///
/// ```rust,ignore
/// // Check if square e4 is attacked by black pieces
/// let attacked = is_square_attacked(&game, 28, COLOR_BLACK);
/// ```
pub fn is_square_attacked(game: &Game, square: i8, by_color: Color) -> bool {
    let sign: i8 = if by_color > 0 { 1 } else { -1 };
    let board = &game.board;

    // A white pawn attacks upward, so it sits one rank below the target.
    let pawn_rank = -sign;
    for df in [-1, 1] {
        if let Some(from) = offset(square, (df, pawn_rank)) {
            if board[from as usize] == PAWN_ID * sign {
                return true;
            }
        }
    }

    if KNIGHT_OFFSETS
        .iter()
        .filter_map(|&d| offset(square, d))
        .any(|from| board[from as usize] == KNIGHT_ID * sign)
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .filter_map(|&d| offset(square, d))
        .any(|from| board[from as usize] == KING_ID * sign)
    {
        return true;
    }

    let ray_hits = |directions: &[(i8, i8)], kinds: [i8; 2]| {
        directions.iter().any(|&dir| {
            let mut current = square;
            while let Some(next) = offset(current, dir) {
                let piece = board[next as usize];
                if piece != EMPTY {
                    return kinds.iter().any(|&k| piece == k * sign);
                }
                current = next;
            }
            false
        })
    };

    ray_hits(&BISHOP_DIRECTIONS, [BISHOP_ID, QUEEN_ID])
        || ray_hits(&ROOK_DIRECTIONS, [ROOK_ID, QUEEN_ID])
}

/// Locate the king of `color`, if present.
pub fn find_king(game: &Game, color: Color) -> Option<i8> {
    let king = if color > 0 { W_KING } else { B_KING };
    game.board
        .iter()
        .position(|&p| p == king)
        .map(|pos| pos as i8)
}

/// Check if the king of `color` is in check
///
/// A missing king is reported as not in check; positions without a king never reach the
/// search because FEN loading rejects them.
pub fn is_in_check(game: &Game, color: Color) -> bool {
    find_king(game, color).is_some_and(|king| is_square_attacked(game, king, -color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{game_from_fen, new_game};

    #[test]
    fn test_start_position_no_check() {
        let game = new_game();
        assert!(!is_in_check(&game, COLOR_WHITE));
        assert!(!is_in_check(&game, COLOR_BLACK));
    }

    #[test]
    fn test_pawn_attacks_diagonally_forward() {
        let game = new_game();
        // e2 pawn covers d3 and f3
        assert!(is_square_attacked(&game, parse_square("d3").unwrap(), COLOR_WHITE));
        assert!(is_square_attacked(&game, parse_square("f3").unwrap(), COLOR_WHITE));
        assert!(!is_square_attacked(&game, parse_square("e4").unwrap(), COLOR_WHITE));
    }

    #[test]
    fn test_slider_blocked() {
        let game = game_from_fen("4k3/8/8/8/8/8/4P3/4R1K1 w - - 0 1").unwrap();
        // rook on e1 blocked by pawn on e2
        assert!(!is_square_attacked(&game, parse_square("e5").unwrap(), COLOR_WHITE));
    }

    #[test]
    fn test_queen_gives_check() {
        let game = game_from_fen("4k3/8/8/8/8/8/8/4QK2 b - - 0 1").unwrap();
        assert!(is_in_check(&game, COLOR_BLACK));
    }
}
