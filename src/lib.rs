//! # chessbot
//!
//! Human-versus-AI chess driven by typed moves. A SAN-like parser turns text into move
//! intents, a resolver picks the one legal move an intent describes (or says exactly why
//! there is none), immutable board states record each position, and a session keeps an
//! undo/redo history and derives the game status after every move.
//!
//! # Crate Layout
//!
//! - [`game`] - rules, notation, resolver, history, session and AI opponents
//! - [`core`] - settings persistence, logging and core errors
//! - [`ui`] - console front end
//!
//! The search engine used by the built-in opponent and the legality cross-check lives in
//! the `chess_engine` workspace crate.

pub mod core;
pub mod game;
pub mod ui;
