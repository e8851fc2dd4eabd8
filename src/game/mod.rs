//! Chess game logic
//!
//! Everything needed to play a game from text input: position representation, move
//! notation, move resolution, history and the AI opponents.
//!
//! # Module Organization
//!
//! - `types` - Squares, pieces, move intents and resolved moves
//! - `rules` - Immutable [`BoardState`], piece movement patterns, FEN
//! - `notation` - SAN-like parser, coordinate notation, canonical SAN writer
//! - `resolver` - Intent + position to exactly one legal move, or a typed rejection
//! - `resources` - Undo/redo history and derived game status
//! - `session` - [`GameSession`], the game loop used by front ends
//! - `ai` - Opponents and the background worker that runs them
//! - `oracle` - Independent legality cross-check
//! - `analysis` - Per-move flags and engine evaluation
//!
//! # Data Flow
//!
//! ```text
//! text --parse--> MoveIntent --resolve--> ResolvedMove --record--> MoveHistory
//!                                                                 |
//!                                                  derive_status <-+
//! ```
//!
//! Only `session` and `ai` have side effects (logging, threads, processes); the rest is
//! pure functions over `Copy` values.

pub mod ai;
pub mod analysis;
pub mod error;
pub mod notation;
pub mod oracle;
pub mod resolver;
pub mod resources;
pub mod rules;
pub mod session;
pub mod types;

pub use analysis::{Evaluation, MoveAnalysis};
pub use error::{ErrorKind, GameError, GameResult, NoPieceReason};
pub use resources::{GameStatus, HistoryEntry, MoveHistory};
pub use rules::BoardState;
pub use session::{GameSession, MoveOutcome, SessionConfig};
