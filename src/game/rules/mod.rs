//! Chess rules module - pure game logic
//!
//! Implements board state management and piece movement using pure functions,
//! allowing easy testing and reuse by the resolver, the SAN writer and the session.
//!
//! # Architecture
//!
//! - **Pure functions** for movement patterns (easy to unit test)
//! - **Immutable `BoardState`** snapshots; `apply` returns a new state
//! - **No I/O** and no logging below the resolver
//!
//! # Module Structure
//!
//! - `piece_moves` - Movement rules for each piece type (pawn, knight, bishop, rook, queen, king)
//! - `board_state` - Board representation, attack queries and move application
//! - `fen` - Position string import and export

pub mod board_state;
pub mod fen;
pub mod piece_moves;


// Re-export commonly used items
pub use board_state::{BoardState, RepetitionKey};
pub use fen::START_FEN;
pub use piece_moves::{get_possible_moves, Reach};
