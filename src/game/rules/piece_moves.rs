//! Chess piece movement rules
//!
//! Contains the movement pattern of each piece kind. Pure functions with no side
//! effects - easy to test. King safety and castling are layered on top by the resolver;
//! nothing here looks beyond a single piece's geometry and the squares it crosses.

use super::board_state::BoardState;
use crate::game::types::{Piece, PieceColor, PieceType, Square};

/// Outcome of testing one piece against one destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    Reachable,
    /// The movement pattern never connects the two squares
    Unreachable,
    /// The pattern fits but a piece is in the way or the destination is friendly
    Blocked,
}

fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.file.index() as i8 - from.file.index() as i8,
        to.rank.index() as i8 - from.rank.index() as i8,
    )
}

/// Whether the pattern of `kind` connects the squares, ignoring other pieces
fn fits_pattern(kind: PieceType, dx: i8, dy: i8) -> bool {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax == 0 && ay == 0 {
        return false;
    }
    match kind {
        PieceType::King => ax <= 1 && ay <= 1,
        PieceType::Knight => (ax == 2 && ay == 1) || (ax == 1 && ay == 2),
        PieceType::Bishop => ax == ay,
        PieceType::Rook => ax == 0 || ay == 0,
        PieceType::Queen => ax == ay || ax == 0 || ay == 0,
        PieceType::Pawn => false,
    }
}

/// Whether every square strictly between `from` and `to` is empty.
///
/// Only meaningful for squares on a shared line or diagonal.
pub fn path_clear(state: &BoardState, from: Square, to: Square) -> bool {
    let (dx, dy) = deltas(from, to);
    let (sx, sy) = (dx.signum(), dy.signum());
    let mut current = from;
    loop {
        match current.offset(sx, sy) {
            Some(next) if next == to => return true,
            Some(next) => {
                if state.piece_at(next).is_some() {
                    return false;
                }
                current = next;
            }
            None => return false,
        }
    }
}

/// Movement check for every piece except pawns
///
/// # Arguments
///
/// * `state` - Position being queried
/// * `piece` - The moving piece (its colour decides what counts as friendly)
/// * `from` - Origin square
/// * `to` - Destination square
pub fn piece_reach(state: &BoardState, piece: Piece, from: Square, to: Square) -> Reach {
    let (dx, dy) = deltas(from, to);
    if !fits_pattern(piece.kind, dx, dy) {
        return Reach::Unreachable;
    }
    if piece.kind.is_slider() && !path_clear(state, from, to) {
        return Reach::Blocked;
    }
    match state.piece_at(to) {
        Some(target) if target.color == piece.color => Reach::Blocked,
        _ => Reach::Reachable,
    }
}

/// Straight pawn advance: one square, or two from the starting rank
pub fn pawn_push_reach(state: &BoardState, color: PieceColor, from: Square, to: Square) -> Reach {
    let (dx, dy) = deltas(from, to);
    let dir = color.pawn_direction();
    if dx != 0 {
        return Reach::Unreachable;
    }
    if dy == dir {
        return if state.piece_at(to).is_none() {
            Reach::Reachable
        } else {
            Reach::Blocked
        };
    }
    if dy == 2 * dir && from.rank.index() == color.pawn_rank() {
        let between = from.offset(0, dir);
        let clear = between.is_some_and(|sq| state.piece_at(sq).is_none())
            && state.piece_at(to).is_none();
        return if clear { Reach::Reachable } else { Reach::Blocked };
    }
    Reach::Unreachable
}

/// Diagonal pawn capture, including en passant onto the current target square
pub fn pawn_capture_reach(
    state: &BoardState,
    color: PieceColor,
    from: Square,
    to: Square,
) -> Reach {
    let (dx, dy) = deltas(from, to);
    if dx.abs() != 1 || dy != color.pawn_direction() {
        return Reach::Unreachable;
    }
    match state.piece_at(to) {
        Some(target) if target.color != color => Reach::Reachable,
        Some(_) => Reach::Blocked,
        None if state.en_passant_target() == Some(to) => Reach::Reachable,
        // nothing to capture on that diagonal
        None => Reach::Unreachable,
    }
}

/// Whether `piece` on `from` attacks `to`, regardless of what stands on `to`
pub fn attacks(state: &BoardState, piece: Piece, from: Square, to: Square) -> bool {
    let (dx, dy) = deltas(from, to);
    match piece.kind {
        PieceType::Pawn => dx.abs() == 1 && dy == piece.color.pawn_direction(),
        kind => {
            fits_pattern(kind, dx, dy) && (!kind.is_slider() || path_clear(state, from, to))
        }
    }
}

/// Get all destinations a piece can reach by pattern (castling excluded)
///
/// Pawns contribute both pushes and captures. The list ignores king safety.
pub fn get_possible_moves(state: &BoardState, from: Square) -> Vec<Square> {
    let Some(piece) = state.piece_at(from) else {
        return Vec::new();
    };
    Square::all()
        .filter(|&to| {
            let reach = match piece.kind {
                PieceType::Pawn => {
                    if pawn_push_reach(state, piece.color, from, to) == Reach::Reachable {
                        Reach::Reachable
                    } else {
                        pawn_capture_reach(state, piece.color, from, to)
                    }
                }
                _ => piece_reach(state, piece, from, to),
            };
            reach == Reach::Reachable
        })
        .collect()
}
