//! Move notation: parsing and writing
//!
//! # Module Structure
//!
//! - `parser` - SAN-like text to [`MoveIntent`](crate::game::types::MoveIntent)
//! - `coordinate` - long algebraic `e2e4` form used by UCI engines
//! - `san` - canonical SAN writer for resolved moves

pub mod coordinate;
pub mod parser;
pub mod san;

pub use coordinate::{looks_like_coordinate, parse_coordinate, to_coordinate, CoordinateMove};
pub use parser::parse;
pub use san::to_san;

use crate::game::error::GameResult;
use crate::game::resolver::{resolve, resolve_squares};
use crate::game::rules::BoardState;
use crate::game::types::ResolvedMove;

/// Resolve move text in either coordinate or SAN form
///
/// Coordinate form is tried first when the text has its shape, so engine replies such as
/// `g1f3` work alongside human input such as `Nf3`.
///
/// # Errors
///
/// Any parser or resolver rejection.
pub fn resolve_text(state: &BoardState, text: &str) -> GameResult<ResolvedMove> {
    if looks_like_coordinate(text) {
        let mv = parse_coordinate(text)?;
        return resolve_squares(state, mv.from, mv.to, mv.promotion);
    }
    resolve(state, &parse(text)?)
}
