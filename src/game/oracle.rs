//! Independent legality check
//!
//! A [`RuleOracle`] classifies a move from its own rules implementation. The session can
//! ask one about every move it accepts and log a warning when the two disagree; the core
//! resolver always has the final word.

use crate::game::error::{GameError, GameResult};
use crate::game::types::{PieceType, ResolvedMove, SpecialMove, Square};
use chess_engine::api::{game_from_fen, is_legal_move};
use chess_engine::constants::{BISHOP_ID, EMPTY, KNIGHT_ID, QUEEN_ID, ROOK_ID};
use chess_engine::SpecialKind;
use tracing::warn;

/// An oracle's opinion of one move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub legal: bool,
    pub special: SpecialMove,
}

pub trait RuleOracle {
    /// Classify the move `from`-`to` in `position` (a FEN string)
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPosition`] when the oracle cannot load the position.
    fn classify(
        &self,
        position: &str,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> GameResult<Verdict>;
}

/// Oracle backed by the `chess_engine` move generator
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOracle;

fn engine_piece_id(kind: Option<PieceType>) -> i8 {
    match kind {
        Some(PieceType::Queen) => QUEEN_ID,
        Some(PieceType::Rook) => ROOK_ID,
        Some(PieceType::Bishop) => BISHOP_ID,
        Some(PieceType::Knight) => KNIGHT_ID,
        _ => EMPTY,
    }
}

impl RuleOracle for EngineOracle {
    fn classify(
        &self,
        position: &str,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> GameResult<Verdict> {
        let mut game = game_from_fen(position).map_err(|e| GameError::InvalidPosition {
            message: e.to_string(),
        })?;
        let check = is_legal_move(
            &mut game,
            from.index() as i8,
            to.index() as i8,
            engine_piece_id(promotion),
        );
        let special = match check.special {
            SpecialKind::None => SpecialMove::None,
            SpecialKind::KingsideCastle => SpecialMove::KingsideCastle,
            SpecialKind::QueensideCastle => SpecialMove::QueensideCastle,
            SpecialKind::EnPassant => SpecialMove::EnPassant,
            SpecialKind::Promotion => SpecialMove::Promotion,
        };
        Ok(Verdict {
            legal: check.legal,
            special,
        })
    }
}

/// Ask `oracle` about a move the resolver accepted; returns whether they agree
///
/// Disagreements and oracle failures are logged, never returned.
pub fn cross_check(oracle: &dyn RuleOracle, position: &str, mv: &ResolvedMove) -> bool {
    match oracle.classify(position, mv.from, mv.to, mv.promotion) {
        Ok(verdict) if verdict.legal && verdict.special == mv.special => true,
        Ok(verdict) => {
            warn!(
                "[ORACLE] Disagreement on {}{} in '{}': oracle says legal={} special={:?}, resolver says {:?}",
                mv.from, mv.to, position, verdict.legal, verdict.special, mv.special
            );
            false
        }
        Err(e) => {
            warn!("[ORACLE] Could not classify {}{}: {}", mv.from, mv.to, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resolver::legal_moves;
    use crate::game::rules::BoardState;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_oracle_agrees_on_special_moves() {
        let fen = "r3k2r/1P6/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1";
        let oracle = EngineOracle;
        let verdict = oracle.classify(fen, sq("e1"), sq("g1"), None).unwrap();
        assert_eq!(verdict, Verdict { legal: true, special: SpecialMove::KingsideCastle });

        let verdict = oracle.classify(fen, sq("e5"), sq("d6"), None).unwrap();
        assert_eq!(verdict.special, SpecialMove::EnPassant);

        let verdict = oracle
            .classify(fen, sq("b7"), sq("a8"), Some(PieceType::Queen))
            .unwrap();
        assert_eq!(verdict, Verdict { legal: true, special: SpecialMove::Promotion });

        assert!(!oracle.classify(fen, sq("e1"), sq("e3"), None).unwrap().legal);
    }

    #[test]
    fn test_oracle_agrees_with_resolver() {
        for fen in [
            crate::game::rules::START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        ] {
            let state = BoardState::from_fen(fen).unwrap();
            for mv in legal_moves(&state).unwrap() {
                assert!(cross_check(&EngineOracle, fen, &mv), "{fen}: {mv:?}");
            }
        }
    }

    #[test]
    fn test_bad_position_is_an_error() {
        let result = EngineOracle.classify("8/8/8/8/8/8/8/8 w - - 0 1", sq("a1"), sq("a2"), None);
        assert!(matches!(result, Err(GameError::InvalidPosition { .. })));
    }
}
