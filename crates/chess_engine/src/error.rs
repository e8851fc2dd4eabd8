//! Error types for chess engine
//!
//! Provides custom error types for chess engine operations including
//! position loading and search.

use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug)]
pub enum ChessEngineError {
    /// Position string could not be loaded
    #[error("Invalid FEN: {message}")]
    InvalidFen { message: String },

    /// The side to move has no legal move to search
    #[error("No legal moves available in this position")]
    NoLegalMoves,
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
