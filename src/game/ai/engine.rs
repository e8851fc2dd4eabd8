//! Built-in opponent backed by the `chess_engine` crate
//!
//! The engine search is `async` so it can yield on single-threaded targets; here it is
//! driven to completion with `futures_lite::future::block_on` on the calling thread,
//! which is normally the [`super::AiWorker`] thread.

use super::{bounded_think_time, AiError, MoveSuggester};
use chess_engine::api::{depth_for_strength, game_from_fen, reply_uci};
use chess_engine::ChessEngineError;
use futures_lite::future::block_on;
use std::time::Instant;
use tracing::info;

/// Alpha-beta searcher with a per-move time budget
#[derive(Debug, Clone)]
pub struct EngineOpponent {
    think_time_secs: f32,
}

impl EngineOpponent {
    pub fn new(think_time_secs: f32) -> Self {
        Self {
            think_time_secs: bounded_think_time(think_time_secs),
        }
    }
}

impl MoveSuggester for EngineOpponent {
    fn name(&self) -> &str {
        "builtin"
    }

    fn request_move(&mut self, position: &str, strength: u8) -> Result<String, AiError> {
        let mut game = game_from_fen(position).map_err(|e| AiError::InvalidPosition {
            message: e.to_string(),
        })?;
        game.secs_per_move = self.think_time_secs;
        game.abs_max_depth = depth_for_strength(strength);

        let start = Instant::now();
        let reply = block_on(reply_uci(&mut game)).map_err(|e| match e {
            ChessEngineError::NoLegalMoves => AiError::NoLegalMoves,
            other => AiError::InvalidPosition {
                message: other.to_string(),
            },
        })?;

        info!(
            "[AI] Engine chose {} | Depth={} | Nodes={} | Time={:.2}s",
            reply,
            game.max_depth_so_far,
            game.calls,
            start.elapsed().as_secs_f32()
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::notation::resolve_text;
    use crate::game::rules::BoardState;

    #[test]
    fn test_engine_reply_is_legal() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let mut engine = EngineOpponent::new(0.5);
        let reply = engine.request_move(fen, 0).unwrap();
        let state = BoardState::from_fen(fen).unwrap();
        assert!(resolve_text(&state, &reply).is_ok(), "engine played {reply}");
    }

    #[test]
    fn test_engine_finds_mate_in_one() {
        let mut engine = EngineOpponent::new(1.0);
        let reply = engine
            .request_move("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 5)
            .unwrap();
        assert_eq!(reply, "a1a8");
    }

    #[test]
    fn test_engine_reports_no_moves() {
        let mut engine = EngineOpponent::new(0.1);
        let result = engine.request_move("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3);
        assert!(matches!(result, Err(AiError::NoLegalMoves)));
    }

    #[test]
    fn test_engine_rejects_bad_position() {
        let mut engine = EngineOpponent::new(0.1);
        let result = engine.request_move("not a position", 3);
        assert!(matches!(result, Err(AiError::InvalidPosition { .. })));
    }
}
