//! Move generation
//!
//! Pseudo-legal generation per piece kind, plus a legal filter that makes each move and
//! rejects those leaving the mover's king attacked.
//!
//! ## Module Organization
//!
//! - `attack` - Square attack and check detection
//! - `pawn` - Pushes, captures, en passant and promotion
//! - `knight` - Knight jumps
//! - `sliding` - Bishop, rook and queen rays
//! - `king` - King steps and castling

mod attack;
mod king;
mod knight;
mod pawn;
mod sliding;

pub use attack::{find_king, is_in_check, is_square_attacked};
pub use king::generate_king_moves;
pub use knight::generate_knight_moves;
pub use pawn::generate_pawn_moves;
pub use sliding::{generate_bishop_moves, generate_queen_moves, generate_rook_moves};

use crate::board::piece_belongs_to;
use crate::constants::*;
use crate::search::make_unmake::{make_move, unmake_move};
use crate::types::*;

/// Generate all pseudo-legal moves for `color`
///
/// Moves may leave the mover's king in check; castling is already filtered for attacked
/// transit squares.
pub fn generate_pseudo_legal_moves(game: &Game, color: Color) -> Vec<KK> {
    let mut moves = Vec::with_capacity(48);
    for from in 0..64i8 {
        let piece = game.board[from as usize];
        if !piece_belongs_to(piece, color) {
            continue;
        }
        match piece.abs() {
            PAWN_ID => generate_pawn_moves(game, from, color, &mut moves),
            KNIGHT_ID => generate_knight_moves(game, from, color, &mut moves),
            BISHOP_ID => generate_bishop_moves(game, from, color, &mut moves),
            ROOK_ID => generate_rook_moves(game, from, color, &mut moves),
            QUEEN_ID => generate_queen_moves(game, from, color, &mut moves),
            KING_ID => generate_king_moves(game, from, color, &mut moves),
            _ => {}
        }
    }
    moves
}

/// Generate the legal moves for the side to move
pub fn generate_legal_moves(game: &mut Game) -> Vec<KK> {
    let color = game.side_to_move;
    generate_pseudo_legal_moves(game, color)
        .into_iter()
        .filter(|&mv| {
            let undo = make_move(game, mv);
            let legal = !is_in_check(game, color);
            unmake_move(game, mv, undo);
            legal
        })
        .collect()
}

/// Count leaf nodes to `depth` plies. Used to verify the generator.
pub fn perft(game: &mut Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal_moves(game);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        let undo = make_move(game, mv);
        nodes += perft(game, depth - 1);
        unmake_move(game, mv, undo);
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{game_from_fen, new_game};

    #[test]
    fn test_start_position_twenty_moves() {
        let game = new_game();
        assert_eq!(generate_pseudo_legal_moves(&game, COLOR_WHITE).len(), 20);
        assert_eq!(generate_pseudo_legal_moves(&game, COLOR_BLACK).len(), 20);
    }

    #[test]
    fn test_perft_start_position() {
        let mut game = new_game();
        assert_eq!(perft(&mut game, 1), 20);
        assert_eq!(perft(&mut game, 2), 400);
        assert_eq!(perft(&mut game, 3), 8902);
    }

    #[test]
    fn test_perft_kiwipete() {
        let mut game =
            game_from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        assert_eq!(perft(&mut game, 1), 48);
        assert_eq!(perft(&mut game, 2), 2039);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // knight on e2 pinned by rook on e8
        let mut game = game_from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let moves = generate_legal_moves(&mut game);
        assert!(moves.iter().all(|m| m.src != 12));
    }
}
