//! Move ordering for alpha-beta pruning
//!
//! Orders moves to maximize alpha-beta pruning efficiency by trying
//! the best moves first (captures, promotions, center control).

use crate::board::*;
use crate::constants::*;
use crate::types::*;

/// Order moves for better alpha-beta pruning
pub(crate) fn order_moves(game: &Game, moves: &mut [KK]) {
    for mv in moves.iter_mut() {
        let mut score = 0i32;

        // Captures are good
        let captured = if mv.flag == FLAG_EN_PASSANT {
            PAWN_ID
        } else {
            game.board[mv.dst as usize]
        };
        if captured != EMPTY {
            let attacker_value = FIGURE_VALUE[game.board[mv.src as usize].unsigned_abs() as usize] as i32;
            let victim_value = FIGURE_VALUE[captured.unsigned_abs() as usize] as i32;
            // MVV-LVA: Most Valuable Victim - Least Valuable Attacker
            score += victim_value * 10 - attacker_value;
        }

        if mv.promotion != EMPTY {
            score += FIGURE_VALUE[mv.promotion as usize] as i32 * 10;
        }

        // Center control bonus
        let (col, row) = pos_to_square(mv.dst);
        let center_dist = ((col - 3).abs() + (row - 3).abs()) as i32;
        score += (8 - center_dist) * 5;

        mv.score = score.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    }

    // Sort moves by score (descending)
    moves.sort_by(|a, b| b.score.cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game_from_fen;

    #[test]
    fn test_order_moves_prioritizes_captures() {
        // White pawn on e4 can take the black queen on d5
        let game = game_from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();

        let mut moves = vec![
            KK::new(28, 36, 0, FLAG_NORMAL), // Non-capture e4-e5
            KK::new(28, 35, 0, FLAG_NORMAL), // Capture e4xd5
        ];

        order_moves(&game, &mut moves);

        assert_eq!(moves[0].dst, 35, "Capture should be ordered first");
    }

    #[test]
    fn test_order_moves_prefers_cheaper_attacker() {
        // Both the pawn on c4 and the queen on d1 can take the knight on d5
        let game = game_from_fen("4k3/8/8/3n4/2P5/8/8/3QK3 w - - 0 1").unwrap();

        let mut moves = vec![
            KK::new(3, 35, 0, FLAG_NORMAL),  // Qxd5
            KK::new(26, 35, 0, FLAG_NORMAL), // cxd5
        ];

        order_moves(&game, &mut moves);

        assert_eq!(moves[0].src, 26, "Pawn capture should come first");
    }
}
