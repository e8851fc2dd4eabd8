//! Public API for the chess engine
//!
//! Provides high-level functions for game management and AI move generation.
//! All functions include proper error handling and validation.
//!
//! ## Module Organization
//!
//! - `game` - Game creation (new_game, game_from_fen)
//! - `moves` - Move validation (is_legal_move)
//! - `state` - Evaluation and AI replies (evaluate, reply_uci)

mod game;
mod moves;
mod state;

pub use game::{game_from_fen, new_game, DEFAULT_SECS_PER_MOVE};
pub use moves::is_legal_move;
pub use state::{depth_for_strength, evaluate, reply_uci};
