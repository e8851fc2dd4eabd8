//! Move and position analysis
//!
//! - [`MoveAnalysis`] - flags describing what an accepted move did, for front ends that
//!   react differently to captures, checks or castling
//! - [`evaluate_position`] - static score of a position from the `chess_engine` evaluator

use crate::game::error::{GameError, GameResult};
use crate::game::resources::GameStatus;
use crate::game::rules::BoardState;
use crate::game::types::{PieceColor, ResolvedMove, SpecialMove};
use chess_engine::api::{evaluate, game_from_fen};
use std::fmt;

/// Scores within this many centipawns of zero read as equal
const EQUAL_MARGIN: i32 = 50;
const CLEAR_MARGIN: i32 = 150;
const WINNING_MARGIN: i32 = 300;

/// What kind of move was just played
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnalysis {
    pub is_capture: bool,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_castle: bool,
    pub is_promotion: bool,
    pub is_en_passant: bool,
}

impl MoveAnalysis {
    /// Classify `mv` given the status of the position it produced
    pub fn new(mv: &ResolvedMove, status_after: GameStatus) -> Self {
        let is_checkmate = matches!(status_after, GameStatus::Checkmate { .. });
        Self {
            is_capture: mv.is_capture(),
            is_check: is_checkmate || status_after == GameStatus::Check,
            is_checkmate,
            is_castle: mv.is_castle(),
            is_promotion: mv.special == SpecialMove::Promotion,
            is_en_passant: mv.special == SpecialMove::EnPassant,
        }
    }
}

/// Static evaluation of one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Centipawns from white's point of view
    Score(i32),
    /// The side to move is checkmated
    Mate { winner: PieceColor },
    /// Stalemate or any other finished draw
    Draw,
}

impl Evaluation {
    /// Score in centipawns from white's side; mates count as the largest possible edge
    pub fn white_centipawns(self) -> i32 {
        match self {
            Evaluation::Score(cp) => cp,
            Evaluation::Mate {
                winner: PieceColor::White,
            } => i32::MAX,
            Evaluation::Mate {
                winner: PieceColor::Black,
            } => i32::MIN,
            Evaluation::Draw => 0,
        }
    }

    /// Plain-language reading of the score
    pub fn advantage(self) -> String {
        let cp = match self {
            Evaluation::Mate { winner } => return format!("{winner} has delivered mate"),
            Evaluation::Draw => return "The game is drawn".to_string(),
            Evaluation::Score(cp) => cp,
        };
        let leader = if cp > 0 {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        match cp.unsigned_abs() {
            m if m <= EQUAL_MARGIN as u32 => "The position is roughly equal".to_string(),
            m if m <= CLEAR_MARGIN as u32 => format!("{leader} is slightly better"),
            m if m <= WINNING_MARGIN as u32 => format!("{leader} is clearly better"),
            _ => format!("{leader} is winning"),
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Score(cp) => {
                write!(f, "{:+.2} ({})", f64::from(*cp) / 100.0, self.advantage())
            }
            _ => write!(f, "{}", self.advantage()),
        }
    }
}

/// Evaluate `state` given its already derived `status`
///
/// Finished games are reported from the status; live positions are scored by the engine.
///
/// # Errors
///
/// [`GameError::InvalidPosition`] when the engine cannot load the position.
pub fn evaluate_position(state: &BoardState, status: GameStatus) -> GameResult<Evaluation> {
    match status {
        GameStatus::Checkmate { winner } => return Ok(Evaluation::Mate { winner }),
        s if s.is_draw() => return Ok(Evaluation::Draw),
        _ => {}
    }

    let game = game_from_fen(&state.to_fen()).map_err(|e| GameError::InvalidPosition {
        message: e.to_string(),
    })?;
    let for_mover = i32::from(evaluate(&game));
    let white = match state.side_to_move() {
        PieceColor::White => for_mover,
        PieceColor::Black => -for_mover,
    };
    Ok(Evaluation::Score(white))
}
