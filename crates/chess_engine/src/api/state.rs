//! Position scoring and AI move generation

use crate::error::{ChessEngineError, ChessEngineResult};
use crate::evaluation::evaluate_for;
use crate::search::*;
use crate::types::*;

/// Best move for the side to move in coordinate notation (`e2e4`, `e7e8q`)
///
/// Uses `game.secs_per_move` as the time budget and `game.abs_max_depth` as the depth cap.
///
/// # Errors
///
/// Returns [`ChessEngineError::NoLegalMoves`] when the side to move is mated or stalemated.
pub async fn reply_uci(game: &mut Game) -> ChessEngineResult<String> {
    let think_time = game.secs_per_move;
    find_best_move(game, think_time)
        .await
        .to_uci()
        .ok_or(ChessEngineError::NoLegalMoves)
}

/// Static evaluation in centipawns from the side to move's point of view
pub fn evaluate(game: &Game) -> i16 {
    evaluate_for(game, game.side_to_move)
}

/// Map a 0-20 strength level onto a search depth of 1-5 plies.
pub fn depth_for_strength(strength: u8) -> i64 {
    1 + i64::from(strength.min(20)) / 5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{game_from_fen, new_game};

    #[test]
    fn test_evaluate_is_from_side_to_move() {
        let white = game_from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let black = game_from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
        assert!(evaluate(&white) > 0);
        assert_eq!(evaluate(&black), -evaluate(&white));
        assert_eq!(evaluate(&new_game()), 0);
    }

    #[test]
    fn test_reply_uci_format() {
        let mut game = game_from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        game.abs_max_depth = 2;
        let uci = futures_lite::future::block_on(reply_uci(&mut game)).unwrap();
        assert!(uci.len() == 4 || uci.len() == 5, "unexpected move text {uci}");
    }

    #[test]
    fn test_reply_uci_no_moves() {
        let mut game = game_from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let result = futures_lite::future::block_on(reply_uci(&mut game));
        assert!(matches!(result, Err(ChessEngineError::NoLegalMoves)));
    }

    #[test]
    fn test_strength_depth_mapping() {
        assert_eq!(depth_for_strength(0), 1);
        assert_eq!(depth_for_strength(8), 2);
        assert_eq!(depth_for_strength(20), 5);
        assert_eq!(depth_for_strength(200), 5);
    }
}
