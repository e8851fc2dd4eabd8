//! Error types for game module
//!
//! Provides custom error types for game logic including notation parsing, move
//! resolution, history navigation and AI orchestration. Front ends match on
//! [`GameError::kind`] to decide how to present a rejection.

use super::types::Square;
use std::fmt;

/// Why no piece could make the requested move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoPieceReason {
    /// The side to move has no piece of the requested kind
    NoSuchPiece,
    /// Pieces of that kind exist but none moves that way
    Unreachable,
    /// A piece could make the move but the path or destination is obstructed
    Blocked,
    /// Castling right lost or king/rook not on their original squares
    CastlingUnavailable,
}

impl fmt::Display for NoPieceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoPieceReason::NoSuchPiece => "no such piece",
            NoPieceReason::Unreachable => "no piece can reach that square",
            NoPieceReason::Blocked => "the path is blocked",
            NoPieceReason::CastlingUnavailable => "castling is not available",
        })
    }
}

/// Coarse error category for front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Format,
    InvalidPosition,
    NoMatchingPiece,
    Ambiguous,
    PromotionRequired,
    PromotionNotApplicable,
    LeavesKingInCheck,
    NothingToUndo,
    NothingToRedo,
    GameOver,
    AiUnavailable,
    InternalInvariant,
}

fn join_squares(squares: &[Square]) -> String {
    squares
        .iter()
        .map(|s| s.to_algebraic())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    /// Text does not match the move grammar
    #[error("Syntax error at '{token}': {message}")]
    Syntax { token: String, message: String },

    /// Text is grammatical but describes an impossible move shape
    #[error("Malformed move: {message}")]
    Format { message: String },

    /// Position string could not be loaded
    #[error("Invalid position: {message}")]
    InvalidPosition { message: String },

    /// No piece of the side to move can make the move
    #[error("No matching piece: {reason}")]
    NoMatchingPiece { reason: NoPieceReason },

    /// More than one piece can make the move
    #[error("Ambiguous move: pieces on {} can all move there", join_squares(.candidates))]
    AmbiguousMove { candidates: Vec<Square> },

    /// A pawn reached the last rank without a promotion piece
    #[error("Promotion piece required")]
    PromotionRequired,

    /// A promotion piece was given for a move that does not promote
    #[error("Promotion is not possible on this move")]
    PromotionNotApplicable,

    /// The move would leave or put the mover's own king in check
    #[error("Move leaves the king in check")]
    LeavesKingInCheck,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    /// The game has reached a terminal status
    #[error("Game is over: {status}")]
    GameOver { status: String },

    /// The AI collaborator could not produce a move
    #[error("AI unavailable: {message}")]
    AiUnavailable { message: String },

    /// A programming contract was violated
    #[error("Internal invariant violated: {message}")]
    InternalInvariant { message: String },
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::Syntax { .. } => ErrorKind::Syntax,
            GameError::Format { .. } => ErrorKind::Format,
            GameError::InvalidPosition { .. } => ErrorKind::InvalidPosition,
            GameError::NoMatchingPiece { .. } => ErrorKind::NoMatchingPiece,
            GameError::AmbiguousMove { .. } => ErrorKind::Ambiguous,
            GameError::PromotionRequired => ErrorKind::PromotionRequired,
            GameError::PromotionNotApplicable => ErrorKind::PromotionNotApplicable,
            GameError::LeavesKingInCheck => ErrorKind::LeavesKingInCheck,
            GameError::NothingToUndo => ErrorKind::NothingToUndo,
            GameError::NothingToRedo => ErrorKind::NothingToRedo,
            GameError::GameOver { .. } => ErrorKind::GameOver,
            GameError::AiUnavailable { .. } => ErrorKind::AiUnavailable,
            GameError::InternalInvariant { .. } => ErrorKind::InternalInvariant,
        }
    }

    /// Everything except a broken invariant leaves the session usable
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::InternalInvariant { .. })
    }

    pub(crate) fn syntax(token: impl Into<String>, message: impl Into<String>) -> Self {
        GameError::Syntax {
            token: token.into(),
            message: message.into(),
        }
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        GameError::Format {
            message: message.into(),
        }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        GameError::InternalInvariant {
            message: message.into(),
        }
    }

    pub(crate) fn no_piece(reason: NoPieceReason) -> Self {
        GameError::NoMatchingPiece { reason }
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
