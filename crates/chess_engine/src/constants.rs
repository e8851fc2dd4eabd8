//! # Chess Engine Constants - Piece Encoding, Values & Search Parameters
//!
//! ## Board Encoding
//!
//! The engine board is a flat `[i8; 64]` indexed `rank * 8 + file`, so a1 = 0, h1 = 7,
//! a8 = 56 and h8 = 63. Each entry holds a signed piece id:
//!
//! - Positive values (1-6) are white pieces
//! - Negative values (-1 to -6) are black pieces
//! - Zero is an empty square
//!
//! The sign carries the colour and the absolute value carries the kind, so ownership tests
//! are a single comparison and `FIGURE_VALUE[piece.abs()]` gives material directly.
//!
//! ## Centipawn Valuation
//!
//! - **Pawn**: 100
//! - **Knight**: 300
//! - **Bishop**: 300
//! - **Rook**: 500
//! - **Queen**: 900
//! - **King**: 18,000 (above all other material combined)
//!
//! Scores whose magnitude exceeds `KING_VALUE_DIV_2` are mate scores; the distance to
//! `KING_VALUE` is the number of plies until mate.
//!
//! ## Direction Vectors
//!
//! Offsets are expressed as `(file_delta, rank_delta)` pairs rather than flat index offsets,
//! which keeps edge handling to a single bounds check per step.

/// Colour of the side to move. `1` for white, `-1` for black.
pub const COLOR_WHITE: i64 = 1;
pub const COLOR_BLACK: i64 = -1;

pub const EMPTY: i8 = 0;
pub const PAWN_ID: i8 = 1;
pub const KNIGHT_ID: i8 = 2;
pub const BISHOP_ID: i8 = 3;
pub const ROOK_ID: i8 = 4;
pub const QUEEN_ID: i8 = 5;
pub const KING_ID: i8 = 6;

pub const W_PAWN: i8 = PAWN_ID;
pub const W_KNIGHT: i8 = KNIGHT_ID;
pub const W_BISHOP: i8 = BISHOP_ID;
pub const W_ROOK: i8 = ROOK_ID;
pub const W_QUEEN: i8 = QUEEN_ID;
pub const W_KING: i8 = KING_ID;
pub const B_PAWN: i8 = -PAWN_ID;
pub const B_KNIGHT: i8 = -KNIGHT_ID;
pub const B_BISHOP: i8 = -BISHOP_ID;
pub const B_ROOK: i8 = -ROOK_ID;
pub const B_QUEEN: i8 = -QUEEN_ID;
pub const B_KING: i8 = -KING_ID;

pub const PAWN_VALUE: i16 = 100;
pub const KNIGHT_VALUE: i16 = 300;
pub const BISHOP_VALUE: i16 = 300;
pub const ROOK_VALUE: i16 = 500;
pub const QUEEN_VALUE: i16 = 900;
pub const KING_VALUE: i16 = 18000;
pub const KING_VALUE_DIV_2: i16 = KING_VALUE / 2;

/// Material value indexed by absolute piece id.
pub const FIGURE_VALUE: [i16; 7] = [
    0,
    PAWN_VALUE,
    KNIGHT_VALUE,
    BISHOP_VALUE,
    ROOK_VALUE,
    QUEEN_VALUE,
    KING_VALUE,
];

/// Castling right bits, matching the order of the FEN castling field.
pub const CASTLE_WHITE_KINGSIDE: u8 = 0b0001;
pub const CASTLE_WHITE_QUEENSIDE: u8 = 0b0010;
pub const CASTLE_BLACK_KINGSIDE: u8 = 0b0100;
pub const CASTLE_BLACK_QUEENSIDE: u8 = 0b1000;
pub const CASTLE_ALL: u8 = 0b1111;

/// Move flags carried by [`crate::types::KK`].
pub const FLAG_NORMAL: u8 = 0;
pub const FLAG_DOUBLE_PUSH: u8 = 1;
pub const FLAG_EN_PASSANT: u8 = 2;
pub const FLAG_CASTLE_KINGSIDE: u8 = 3;
pub const FLAG_CASTLE_QUEENSIDE: u8 = 4;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Promotion pieces in the order they are generated.
pub const PROMOTION_IDS: [i8; 4] = [QUEEN_ID, ROOK_ID, BISHOP_ID, KNIGHT_ID];

/// Alpha-beta window bound. Larger than any mate score.
pub const AB_INF: i16 = 30000;
pub const LOWEST_SCORE: i64 = -(AB_INF as i64);

/// Hard ceiling for iterative deepening.
pub const MAX_DEPTH: i32 = 8;

/// Quiescence search stops after this many capture plies.
pub const MAX_QUIESCENCE_DEPTH: i32 = 4;

pub const STATE_PLAYING: i32 = 0;
pub const STATE_CHECKMATE: i32 = 1;
pub const STATE_STALEMATE: i32 = 2;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
