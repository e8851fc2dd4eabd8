//! Sliding piece move generation
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//! These pieces can move multiple squares in a direction until blocked.
//!
//! ## Algorithm
//!
//! For each direction, step square by square:
//! 1. Empty squares are added and the walk continues
//! 2. An opponent piece is added as a capture and the walk stops
//! 3. A friendly piece stops the walk without being added

use crate::board::*;
use crate::constants::*;
use crate::types::*;

/// Walk each direction from `from` and collect destinations.
pub fn generate_sliding_moves(
    game: &Game,
    from: i8,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<KK>,
) {
    for &dir in directions {
        let mut current = from;
        while let Some(to) = offset(current, dir) {
            let piece = game.board[to as usize];
            if piece_belongs_to(piece, color) {
                break;
            }
            moves.push(KK::new(from, to, 0, FLAG_NORMAL));
            if piece != EMPTY {
                break;
            }
            current = to;
        }
    }
}

pub fn generate_bishop_moves(game: &Game, from: i8, color: Color, moves: &mut Vec<KK>) {
    generate_sliding_moves(game, from, color, &BISHOP_DIRECTIONS, moves);
}

pub fn generate_rook_moves(game: &Game, from: i8, color: Color, moves: &mut Vec<KK>) {
    generate_sliding_moves(game, from, color, &ROOK_DIRECTIONS, moves);
}

pub fn generate_queen_moves(game: &Game, from: i8, color: Color, moves: &mut Vec<KK>) {
    generate_sliding_moves(game, from, color, &BISHOP_DIRECTIONS, moves);
    generate_sliding_moves(game, from, color, &ROOK_DIRECTIONS, moves);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{game_from_fen, new_game};

    #[test]
    fn test_blocked_at_start() {
        let game = new_game();
        let mut moves = Vec::new();
        generate_queen_moves(&game, 3, COLOR_WHITE, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_rook_open_board() {
        let game = game_from_fen("4k3/8/8/8/3R4/8/8/4K3 w - - 0 1").unwrap();
        let mut moves = Vec::new();
        generate_rook_moves(&game, parse_square("d4").unwrap(), COLOR_WHITE, &mut moves);
        assert_eq!(moves.len(), 14);
    }

    #[test]
    fn test_bishop_stops_on_capture() {
        let game = game_from_fen("4k3/8/8/2p5/8/B7/8/4K3 w - - 0 1").unwrap();
        let mut moves = Vec::new();
        generate_bishop_moves(&game, parse_square("a3").unwrap(), COLOR_WHITE, &mut moves);
        // b4, c5 (capture) going up; b2, c1 going down
        assert_eq!(moves.len(), 4);
    }
}
