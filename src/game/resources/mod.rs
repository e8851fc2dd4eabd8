//! Game history and status
//!
//! # Module Structure
//!
//! - `history` - [`MoveHistory`]: done/undone stacks of [`HistoryEntry`]
//! - `game_over` - [`GameStatus`] and its derivation from a history

pub mod game_over;
pub mod history;

pub use game_over::{
    derive_status, insufficient_material, GameStatus, DEFAULT_INACTIVITY_THRESHOLD,
    REPETITION_LIMIT,
};
pub use history::{HistoryEntry, MoveHistory};
