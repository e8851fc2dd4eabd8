//! Chess AI opponents
//!
//! Every opponent implements [`MoveSuggester`]: given a position string and a strength
//! level it returns a move as text. The session resolves that text exactly like human
//! input, so an opponent can never slip an illegal move past the rules.
//!
//! # Architecture
//!
//! - [`EngineOpponent`] - built-in alpha-beta search from the `chess_engine` crate
//! - [`UciProcessOpponent`] - external UCI engine (e.g. Stockfish) over stdin/stdout
//! - [`RandomOpponent`] - uniformly random legal move, used as a fallback
//! - [`AiWorker`] - runs any of the above on a background thread so front ends can poll
//!
//! A request that is abandoned (its [`PendingMove`] dropped) changes nothing: the session
//! only moves when a reply is explicitly submitted.

use crate::game::error::GameError;
use thiserror::Error;

pub mod config;
pub mod engine;
pub mod random;
pub mod uci;
pub mod worker;

pub use config::{
    bounded_think_time, AiConfig, AiDifficulty, EngineKind, DEFAULT_STRENGTH, MAX_STRENGTH,
    MAX_THINK_TIME_SECS,
};
pub use engine::EngineOpponent;
pub use random::RandomOpponent;
pub use uci::UciProcessOpponent;
pub use worker::{AiWorker, PendingMove};

/// Errors an opponent can report
#[derive(Error, Debug)]
pub enum AiError {
    /// The engine binary could not be launched
    #[error("Failed to start engine '{path}': {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to the engine failed
    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine went quiet or closed its output
    #[error("Engine stopped answering: {message}")]
    NoReply { message: String },

    /// The position string could not be loaded
    #[error("Position rejected: {message}")]
    InvalidPosition { message: String },

    /// The side to move has no legal move
    #[error("No legal moves in this position")]
    NoLegalMoves,

    /// The background worker is gone
    #[error("AI worker disconnected")]
    Disconnected,
}

impl From<AiError> for GameError {
    fn from(err: AiError) -> Self {
        GameError::AiUnavailable {
            message: err.to_string(),
        }
    }
}

/// A source of moves for one side
///
/// Implementations may block for as long as they think. `strength` runs from 0 (weakest)
/// to [`MAX_STRENGTH`]; implementations clamp larger values.
pub trait MoveSuggester: Send {
    /// Short name for logs and the console
    fn name(&self) -> &str;

    /// Suggest a move for the side to move in `position` (a FEN string)
    ///
    /// # Errors
    ///
    /// Any [`AiError`]; the caller decides whether to fall back to another opponent.
    fn request_move(&mut self, position: &str, strength: u8) -> Result<String, AiError>;
}

impl<T: MoveSuggester + ?Sized> MoveSuggester for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn request_move(&mut self, position: &str, strength: u8) -> Result<String, AiError> {
        (**self).request_move(position, strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::error::ErrorKind;

    #[test]
    fn test_ai_error_becomes_unavailable() {
        let err: GameError = AiError::NoReply {
            message: "timed out".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::AiUnavailable);
        assert!(err.to_string().contains("timed out"));
    }
}
