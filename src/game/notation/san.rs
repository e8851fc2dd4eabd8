//! Canonical SAN writer
//!
//! The inverse of [`super::parse`] + [`crate::game::resolver::resolve`]: for any legal
//! move, the text written here resolves back to the same move from the same position.

use crate::game::error::GameResult;
use crate::game::resolver::{candidates, legal_moves};
use crate::game::rules::BoardState;
use crate::game::types::{PieceType, ResolvedMove};

/// Write a resolved move in canonical short notation
///
/// Disambiguates with the origin file when that is enough, else the rank, else both.
/// The `+` / `#` suffix comes from the position after the move.
///
/// # Errors
///
/// Only [`crate::game::error::GameError::InternalInvariant`], when the move does not fit
/// the position.
///
/// # Example
///
/// ```rust,ignore
/// let mv = resolve(&state, &parse("Ngf3")?)?;
/// assert_eq!(to_san(&state, &mv)?, "Nf3");
/// ```
pub fn to_san(state: &BoardState, mv: &ResolvedMove) -> GameResult<String> {
    let mut text = match mv.special.castle_side() {
        Some(side) => side.notation().to_string(),
        None => body(state, mv),
    };

    let after = state.apply(mv)?;
    let opponent = after.side_to_move();
    if after.is_in_check(opponent)? {
        let mated = legal_moves(&after)?.is_empty();
        text.push(if mated { '#' } else { '+' });
    }
    Ok(text)
}

fn body(state: &BoardState, mv: &ResolvedMove) -> String {
    let mut text = String::new();

    match mv.piece.kind.letter() {
        None => {
            if mv.is_capture() {
                text.push(mv.from.file.to_char());
            }
        }
        Some(letter) => {
            text.push(letter);
            text.push_str(&disambiguation(state, mv));
        }
    }

    if mv.is_capture() {
        text.push('x');
    }
    text.push_str(&mv.to.to_algebraic());

    if let Some(letter) = mv.promotion.and_then(PieceType::letter) {
        text.push('=');
        text.push(letter);
    }
    text
}

/// Shortest origin hint that singles out `mv.from` among the pattern candidates
fn disambiguation(state: &BoardState, mv: &ResolvedMove) -> String {
    let all = candidates(state, mv.piece.kind, mv.to, mv.is_capture(), None, None).reachable;
    let rivals: Vec<_> = all.iter().filter(|&&sq| sq != mv.from).collect();
    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.file != mv.from.file) {
        return mv.from.file.to_char().to_string();
    }
    if rivals.iter().all(|sq| sq.rank != mv.from.rank) {
        return mv.from.rank.to_char().to_string();
    }
    mv.from.to_algebraic()
}
