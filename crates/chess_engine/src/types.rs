//! # Chess Engine Core Types
//!
//! ## The `Game` Structure
//!
//! `Game` is the complete state of one engine instance:
//! 1. **Current position** (`board: [i8; 64]`) plus side to move
//! 2. **Rules state** (castling bits, en-passant square, clocks)
//! 3. **Search settings** (`secs_per_move`, `abs_max_depth`)
//! 4. **Search statistics** (`calls`, `cut`, `max_depth_so_far`)
//!
//! A `Game` is cheap to clone (no heap allocations), which lets callers hand a copy to a
//! background search while keeping their own.
//!
//! ## The `Move` Structure
//!
//! `Move` is what the search returns: source and destination squares, an optional promotion
//! piece, the minimax score from the mover's point of view, the game state and the mate
//! distance in plies when a forced mate was found.
//!
//! ## The `KK` Structure
//!
//! `KK` is the compact move used inside generation and search. It carries a flag byte so
//! that make/unmake can handle castling, en passant and double pushes without re-deriving
//! them from the board.

use crate::board::square_name;
use crate::constants::*;

pub type Position = i8;
pub type Color = i64;
pub type Board = [i8; 64];
pub type KKS = Vec<KK>;

/// Central game state structure for the chess engine
#[derive(Clone, Debug)]
pub struct Game {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: u8,
    pub en_passant: Option<Position>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub move_counter: i32,
    pub secs_per_move: f32,

    pub abs_max_depth: i64,
    pub max_depth_so_far: i64,
    pub calls: i64,
    pub cut: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub src: i64,
    pub dst: i64,
    pub promotion: i8,
    pub score: i64,
    pub state: i32,
    pub checkmate_in: i64,
}

impl Default for Move {
    fn default() -> Self {
        Move {
            src: -1,
            dst: -1,
            promotion: EMPTY,
            score: LOWEST_SCORE,
            state: STATE_PLAYING,
            checkmate_in: 0,
        }
    }
}

impl Move {
    /// Whether the search produced a playable move.
    pub fn is_valid(&self) -> bool {
        (0..64).contains(&self.src) && (0..64).contains(&self.dst)
    }

    /// Coordinate notation such as `e2e4` or `e7e8q`.
    ///
    /// Returns `None` when the move is not valid.
    pub fn to_uci(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        let mut text = String::with_capacity(5);
        text.push_str(&square_name(self.src as i8));
        text.push_str(&square_name(self.dst as i8));
        if let Some(letter) = promotion_letter(self.promotion) {
            text.push(letter);
        }
        Some(text)
    }
}

/// Lowercase letter for a promotion piece id, as used in coordinate notation.
pub fn promotion_letter(id: i8) -> Option<char> {
    match id.abs() {
        QUEEN_ID => Some('q'),
        ROOK_ID => Some('r'),
        BISHOP_ID => Some('b'),
        KNIGHT_ID => Some('n'),
        _ => None,
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KK {
    pub score: i16,
    pub src: i8,
    pub dst: i8,
    /// Absolute id of the promotion piece, 0 when none.
    pub promotion: i8,
    pub flag: u8,
}

impl KK {
    pub fn new(src: i8, dst: i8, score: i16, flag: u8) -> Self {
        KK {
            score,
            src,
            dst,
            promotion: EMPTY,
            flag,
        }
    }

    pub fn promoting(src: i8, dst: i8, promotion: i8) -> Self {
        KK {
            score: 0,
            src,
            dst,
            promotion,
            flag: FLAG_NORMAL,
        }
    }

    pub fn is_castle(&self) -> bool {
        self.flag == FLAG_CASTLE_KINGSIDE || self.flag == FLAG_CASTLE_QUEENSIDE
    }
}

/// Special-move classification reported by [`crate::api::is_legal_move`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpecialKind {
    None,
    KingsideCastle,
    QueensideCastle,
    EnPassant,
    Promotion,
}

/// Result of a legality query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveCheck {
    pub legal: bool,
    pub special: SpecialKind,
}

impl MoveCheck {
    pub const ILLEGAL: MoveCheck = MoveCheck {
        legal: false,
        special: SpecialKind::None,
    };
}

impl From<&KK> for SpecialKind {
    fn from(mv: &KK) -> Self {
        match mv.flag {
            FLAG_CASTLE_KINGSIDE => SpecialKind::KingsideCastle,
            FLAG_CASTLE_QUEENSIDE => SpecialKind::QueensideCastle,
            FLAG_EN_PASSANT => SpecialKind::EnPassant,
            _ if mv.promotion != EMPTY => SpecialKind::Promotion,
            _ => SpecialKind::None,
        }
    }
}
