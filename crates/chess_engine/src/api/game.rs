//! Game lifecycle management
//!
//! Functions for creating and loading games.

use crate::board::*;
use crate::constants::*;
use crate::error::ChessEngineResult;
use crate::fen::parse_fen;
use crate::types::*;

/// Default think time per move in seconds
pub const DEFAULT_SECS_PER_MOVE: f32 = 1.5;

/// Create a new game with initial position
pub fn new_game() -> Game {
    Game {
        board: init_board(),
        side_to_move: COLOR_WHITE,
        castling: CASTLE_ALL,
        en_passant: None,
        halfmove_clock: 0,
        fullmove_number: 1,
        move_counter: 0,
        secs_per_move: DEFAULT_SECS_PER_MOVE,

        abs_max_depth: MAX_DEPTH as i64,
        max_depth_so_far: 0,
        calls: 0,
        cut: 0,
    }
}

/// Create a game from a FEN position
///
/// # Errors
///
/// Returns [`crate::ChessEngineError::InvalidFen`] when the string is malformed or the
/// position does not have exactly one king per side.
pub fn game_from_fen(fen: &str) -> ChessEngineResult<Game> {
    let (board, side_to_move, castling, en_passant, halfmove_clock, fullmove_number) =
        parse_fen(fen)?;
    Ok(Game {
        board,
        side_to_move,
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
        ..new_game()
    })
}
