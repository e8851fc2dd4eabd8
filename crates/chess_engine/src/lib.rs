//! # chess_engine
//!
//! A self-contained chess engine: mailbox board, legal move generation, FEN support and an
//! alpha-beta searcher with quiescence and iterative deepening.
//!
//! The crate knows nothing about notation or game history. Callers hand it a FEN position
//! and receive coordinate moves back, which keeps it usable both as an AI opponent and as an
//! independent legality check.
//!
//! # Example
//!
//! ```rust,ignore
//! use chess_engine::api::{game_from_fen, reply_uci};
//!
//! let mut game = game_from_fen(fen)?;
//! game.abs_max_depth = 3;
//! let mv = futures_lite::future::block_on(reply_uci(&mut game))?; // e.g. "g1f3"
//! ```

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod fen;
pub mod move_gen;
pub mod search;
pub mod types;

pub use error::{ChessEngineError, ChessEngineResult};
pub use types::{Game, Move, MoveCheck, SpecialKind};
