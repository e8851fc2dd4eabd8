//! Random legal mover
//!
//! Picks uniformly among the legal moves of the core resolver. Used when no engine is
//! available and as the console's fallback when an engine fails.

use super::{AiError, MoveSuggester};
use crate::game::notation::to_coordinate;
use crate::game::resolver::legal_moves;
use crate::game::rules::BoardState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence for tests and reproducible games
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSuggester for RandomOpponent {
    fn name(&self) -> &str {
        "random"
    }

    fn request_move(&mut self, position: &str, _strength: u8) -> Result<String, AiError> {
        let invalid = |e: crate::game::error::GameError| AiError::InvalidPosition {
            message: e.to_string(),
        };
        let state = BoardState::from_fen(position).map_err(invalid)?;
        let moves = legal_moves(&state).map_err(invalid)?;
        if moves.is_empty() {
            return Err(AiError::NoLegalMoves);
        }
        let pick = self.rng.random_range(0..moves.len());
        Ok(to_coordinate(&moves[pick]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::START_FEN;

    #[test]
    fn test_random_move_is_legal() {
        let mut opponent = RandomOpponent::seeded(7);
        let state = BoardState::initial();
        let legal: Vec<String> = legal_moves(&state)
            .unwrap()
            .iter()
            .map(to_coordinate)
            .collect();
        for _ in 0..10 {
            let reply = opponent.request_move(START_FEN, 0).unwrap();
            assert!(legal.contains(&reply), "{reply} is not legal");
        }
    }

    #[test]
    fn test_seeded_opponents_agree() {
        let mut a = RandomOpponent::seeded(42);
        let mut b = RandomOpponent::seeded(42);
        assert_eq!(
            a.request_move(START_FEN, 0).unwrap(),
            b.request_move(START_FEN, 0).unwrap()
        );
    }

    #[test]
    fn test_no_moves_when_mated() {
        let mut opponent = RandomOpponent::seeded(1);
        let result = opponent.request_move(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            0,
        );
        assert!(matches!(result, Err(AiError::NoLegalMoves)));
    }
}
