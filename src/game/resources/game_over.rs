//! Game status derivation
//!
//! The status of a game is never stored; it is recomputed from the history after every
//! applied move, undo and redo.
//!
//! # Precedence
//!
//! 1. No legal moves, king attacked: **checkmate**
//! 2. No legal moves, king safe: **stalemate**
//! 3. Current position seen for the third time along the played line: **draw by repetition**
//! 4. Halfmove clock at or above the inactivity threshold: **draw by inactivity**
//! 5. Neither side can mate: **draw by insufficient material**
//! 6. King attacked: **check**
//! 7. Otherwise **in progress**
//!
//! # Reference
//!
//! FIDE Laws of Chess: https://www.fide.com/FIDE/handbook/LawsOfChess.pdf
//! - Article 5: Checkmate, stalemate, draws
//! - Article 9: Repetition and the fifty-move rule

use super::history::MoveHistory;
use crate::game::error::GameResult;
use crate::game::resolver::legal_moves;
use crate::game::rules::BoardState;
use crate::game::types::{PieceColor, PieceType};
use std::fmt;

/// Fifty moves by each side
pub const DEFAULT_INACTIVITY_THRESHOLD: u32 = 100;

/// Times a position must occur for a repetition draw
pub const REPETITION_LIMIT: usize = 3;

/// Derived status of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    InProgress,
    Check,
    /// The side to move is mated; `winner` delivered it
    Checkmate { winner: PieceColor },
    Stalemate,
    DrawByRepetition,
    DrawByInactivity,
    DrawByInsufficientMaterial,
}

impl GameStatus {
    /// Whether no further moves are accepted
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress | GameStatus::Check)
    }

    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawByRepetition
                | GameStatus::DrawByInactivity
                | GameStatus::DrawByInsufficientMaterial
        )
    }

    pub fn winner(&self) -> Option<PieceColor> {
        match self {
            GameStatus::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            GameStatus::InProgress => "Game in progress".to_string(),
            GameStatus::Check => "Check".to_string(),
            GameStatus::Checkmate { winner } => format!("{winner} wins by checkmate!"),
            GameStatus::Stalemate => "Draw by stalemate".to_string(),
            GameStatus::DrawByRepetition => "Draw by threefold repetition".to_string(),
            GameStatus::DrawByInactivity => "Draw by the fifty-move rule".to_string(),
            GameStatus::DrawByInsufficientMaterial => "Draw by insufficient material".to_string(),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Derive the status of the current position of a history
///
/// # Arguments
///
/// * `history` - Played line; its current state is the position judged
/// * `inactivity_threshold` - Halfmove clock value that ends the game as a draw
///
/// # Errors
///
/// Only [`crate::game::error::GameError::InternalInvariant`] from move generation.
pub fn derive_status(history: &MoveHistory, inactivity_threshold: u32) -> GameResult<GameStatus> {
    let state = history.current_state();
    let mover = state.side_to_move();
    let in_check = state.is_in_check(mover)?;
    let no_moves = legal_moves(state)?.is_empty();

    let status = if no_moves && in_check {
        GameStatus::Checkmate {
            winner: mover.opposite(),
        }
    } else if no_moves {
        GameStatus::Stalemate
    } else if history.occurrences_of_current() >= REPETITION_LIMIT {
        GameStatus::DrawByRepetition
    } else if state.halfmove_clock() >= inactivity_threshold {
        GameStatus::DrawByInactivity
    } else if insufficient_material(state) {
        GameStatus::DrawByInsufficientMaterial
    } else if in_check {
        GameStatus::Check
    } else {
        GameStatus::InProgress
    };
    Ok(status)
}

/// K v K, K + minor v K, and K + B v K + B with bishops on the same square colour
pub fn insufficient_material(state: &BoardState) -> bool {
    let mut minors = Vec::new();
    for (square, piece) in state.pieces() {
        match piece.kind {
            PieceType::King => {}
            PieceType::Bishop | PieceType::Knight => minors.push((square, piece)),
            _ => return false,
        }
    }
    match minors.as_slice() {
        [] | [_] => true,
        [(sq_a, a), (sq_b, b)] => {
            a.kind == PieceType::Bishop
                && b.kind == PieceType::Bishop
                && a.color != b.color
                && sq_a.is_light() == sq_b.is_light()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::notation::resolve_text;

    fn history_from(fen: &str, moves: &[&str]) -> MoveHistory {
        let mut history = MoveHistory::new(BoardState::from_fen(fen).unwrap());
        for text in moves {
            let mv = resolve_text(history.current_state(), text).unwrap();
            history.record_move(mv, text.to_string()).unwrap();
        }
        history
    }

    fn status_of(fen: &str) -> GameStatus {
        derive_status(&history_from(fen, &[]), DEFAULT_INACTIVITY_THRESHOLD).unwrap()
    }

    #[test]
    fn test_game_status_default() {
        //! Verifies GameStatus defaults to InProgress
        let status = GameStatus::default();
        assert_eq!(status, GameStatus::InProgress);
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_check_is_not_terminal() {
        assert!(!GameStatus::Check.is_terminal());
        assert!(GameStatus::Stalemate.is_terminal());
        assert!(GameStatus::DrawByRepetition.is_draw());
    }

    #[test]
    fn test_fools_mate() {
        let history = history_from(
            crate::game::rules::START_FEN,
            &["f3", "e5", "g4", "Qh4"],
        );
        let status = derive_status(&history, DEFAULT_INACTIVITY_THRESHOLD).unwrap();
        assert_eq!(
            status,
            GameStatus::Checkmate {
                winner: PieceColor::Black
            }
        );
        assert_eq!(status.winner(), Some(PieceColor::Black));
        assert_eq!(status.message(), "Black wins by checkmate!");
    }

    #[test]
    fn test_stalemate() {
        assert_eq!(status_of("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
    }

    #[test]
    fn test_check() {
        assert_eq!(status_of("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1"), GameStatus::Check);
    }

    #[test]
    fn test_inactivity_threshold() {
        let fen = "4k3/8/8/8/8/8/4R3/4K3 w - - 99 80";
        let history = history_from(fen, &["Ra2"]);
        assert_eq!(
            derive_status(&history, DEFAULT_INACTIVITY_THRESHOLD).unwrap(),
            GameStatus::DrawByInactivity
        );
        assert_eq!(derive_status(&history, 150).unwrap(), GameStatus::InProgress);
    }

    #[test]
    fn test_repetition_by_knight_shuffle() {
        let shuffle = ["Nf3", "Nf6", "Ng1", "Ng8"];
        let once = history_from(crate::game::rules::START_FEN, &shuffle);
        assert_eq!(
            derive_status(&once, DEFAULT_INACTIVITY_THRESHOLD).unwrap(),
            GameStatus::InProgress
        );

        let twice: Vec<&str> = shuffle.iter().chain(shuffle.iter()).copied().collect();
        let history = history_from(crate::game::rules::START_FEN, &twice);
        assert_eq!(
            derive_status(&history, DEFAULT_INACTIVITY_THRESHOLD).unwrap(),
            GameStatus::DrawByRepetition
        );
    }

    #[test]
    fn test_insufficient_material() {
        assert!(insufficient_material(&BoardState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap()));
        assert!(insufficient_material(&BoardState::from_fen("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").unwrap()));
        // c1 and f8 are both dark
        assert!(insufficient_material(&BoardState::from_fen("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap()));
        // c1 dark, c8 light
        assert!(!insufficient_material(&BoardState::from_fen("2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap()));
        assert!(!insufficient_material(&BoardState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap()));
        assert_eq!(
            status_of("4k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            GameStatus::DrawByInsufficientMaterial
        );
    }
}
