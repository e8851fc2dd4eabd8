//! Type definitions and utilities for chess game logic
//!
//! Provides newtype patterns and closed enums for chess-specific types
//! to improve type safety and code clarity. Everything here is a plain `Copy` value so
//! board snapshots and moves can be passed around without borrowing concerns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board coordinate representing a file (column) on the chessboard
///
/// Values range from 0 (file 'a') to 7 (file 'h').
/// This newtype prevents mixing up x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(u8);

impl File {
    /// Create a file from an index (0-7)
    pub fn new(index: u8) -> Option<Self> {
        (index < 8).then_some(File(index))
    }

    /// Create a file from a character ('a'..='h')
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let file = File::from_char('e').unwrap(); // File 4
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Convert file to character ('a'..='h')
    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Get the file index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board coordinate representing a rank (row) on the chessboard
///
/// Values range from 0 (rank 1) to 7 (rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    /// Create a rank from an index (0-7)
    pub fn new(index: u8) -> Option<Self> {
        (index < 8).then_some(Rank(index))
    }

    /// Create a rank from a number (1-8)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let rank = Rank::from_number(4).unwrap(); // Rank 3 (0-indexed)
    /// ```
    pub fn from_number(n: u8) -> Option<Self> {
        if (1..=8).contains(&n) {
            Some(Rank(n - 1))
        } else {
            None
        }
    }

    /// Create a rank from a digit character ('1'..='8')
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|n| Rank::from_number(n as u8))
    }

    /// Convert rank to number (1-8)
    pub fn to_number(self) -> u8 {
        self.0 + 1
    }

    pub fn to_char(self) -> char {
        (b'1' + self.0) as char
    }

    /// Get the rank index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board square position (file, rank)
///
/// Combines File and Rank into a single type-safe coordinate. The linear index is
/// `rank * 8 + file`, so a1 = 0 and h8 = 63.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: File,
    pub rank: Rank,
}

impl Square {
    /// Create a square from file and rank indices
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let square = Square::new(4, 3).unwrap(); // e4
    /// ```
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        Some(Square {
            file: File::new(file)?,
            rank: Rank::new(rank)?,
        })
    }

    pub fn from_coords(file: File, rank: Rank) -> Self {
        Square { file, rank }
    }

    /// Create a square from its linear index (0-63)
    pub fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Square::new((index % 8) as u8, (index / 8) as u8)
        } else {
            None
        }
    }

    /// Linear index (0-63)
    pub fn index(self) -> usize {
        self.rank.index() as usize * 8 + self.file.index() as usize
    }

    /// All 64 squares in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }

    /// Step by a file/rank delta, `None` when leaving the board
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file.index() as i8 + file_delta;
        let rank = self.rank.index() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Square::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    /// Create a square from algebraic notation (e.g., "e4")
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let square = Square::from_algebraic("e4").unwrap();
    /// ```
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = File::from_char(chars.next()?)?;
        let rank = Rank::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square { file, rank })
    }

    /// Convert square to algebraic notation (e.g., "e4")
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file.to_char(), self.rank.to_number())
    }

    /// Whether this is a light square (h1 is light)
    pub fn is_light(self) -> bool {
        (self.file.index() + self.rank.index()) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_number())
    }
}

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Rank direction pawns advance in
    pub fn pawn_direction(self) -> i8 {
        match self {
            PieceColor::White => 1,
            PieceColor::Black => -1,
        }
    }

    /// Rank index of the back rank
    pub fn home_rank(self) -> u8 {
        match self {
            PieceColor::White => 0,
            PieceColor::Black => 7,
        }
    }

    /// Rank index pawns start on
    pub fn pawn_rank(self) -> u8 {
        match self {
            PieceColor::White => 1,
            PieceColor::Black => 6,
        }
    }

    /// Rank index pawns promote on
    pub fn promotion_rank(self) -> u8 {
        self.opposite().home_rank()
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    /// Pieces a pawn may promote to, strongest first
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    /// Uppercase notation letter, `None` for pawns
    pub fn letter(self) -> Option<char> {
        match self {
            PieceType::King => Some('K'),
            PieceType::Queen => Some('Q'),
            PieceType::Rook => Some('R'),
            PieceType::Bishop => Some('B'),
            PieceType::Knight => Some('N'),
            PieceType::Pawn => None,
        }
    }

    /// Piece for an uppercase notation letter (`K Q R B N`)
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            _ => None,
        }
    }

    pub fn is_promotion_target(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }

    /// Whether the piece moves along rays
    pub fn is_slider(self) -> bool {
        matches!(self, PieceType::Queen | PieceType::Rook | PieceType::Bishop)
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceType::King => "king",
            PieceType::Queen => "queen",
            PieceType::Rook => "rook",
            PieceType::Bishop => "bishop",
            PieceType::Knight => "knight",
            PieceType::Pawn => "pawn",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: PieceColor,
}

impl Piece {
    pub const fn new(kind: PieceType, color: PieceColor) -> Self {
        Piece { kind, color }
    }

    /// FEN letter: uppercase for white, lowercase for black
    pub fn to_fen_char(self) -> char {
        let letter = self.kind.letter().unwrap_or('P');
        match self.color {
            PieceColor::White => letter,
            PieceColor::Black => letter.to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceType::Pawn,
            other => PieceType::from_letter(other)?,
        };
        Some(Piece { kind, color })
    }
}

/// Wing a castling move happens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// King destination file index
    pub fn king_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Rook origin and destination file indices
    pub fn rook_files(self) -> (u8, u8) {
        match self {
            CastleSide::Kingside => (7, 5),
            CastleSide::Queenside => (0, 3),
        }
    }

    pub fn notation(self) -> &'static str {
        match self {
            CastleSide::Kingside => "O-O",
            CastleSide::Queenside => "O-O-O",
        }
    }
}

/// Castling rights per side and wing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub fn has(&self, color: PieceColor, side: CastleSide) -> bool {
        match (color, side) {
            (PieceColor::White, CastleSide::Kingside) => self.white_kingside,
            (PieceColor::White, CastleSide::Queenside) => self.white_queenside,
            (PieceColor::Black, CastleSide::Kingside) => self.black_kingside,
            (PieceColor::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    pub fn revoke(&mut self, color: PieceColor, side: CastleSide) {
        match (color, side) {
            (PieceColor::White, CastleSide::Kingside) => self.white_kingside = false,
            (PieceColor::White, CastleSide::Queenside) => self.white_queenside = false,
            (PieceColor::Black, CastleSide::Kingside) => self.black_kingside = false,
            (PieceColor::Black, CastleSide::Queenside) => self.black_queenside = false,
        }
    }

    pub fn revoke_all(&mut self, color: PieceColor) {
        self.revoke(color, CastleSide::Kingside);
        self.revoke(color, CastleSide::Queenside);
    }
}

/// Special-move tag carried by a resolved move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    None,
    KingsideCastle,
    QueensideCastle,
    EnPassant,
    Promotion,
}

impl SpecialMove {
    pub fn castle_side(self) -> Option<CastleSide> {
        match self {
            SpecialMove::KingsideCastle => Some(CastleSide::Kingside),
            SpecialMove::QueensideCastle => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

impl From<CastleSide> for SpecialMove {
    fn from(side: CastleSide) -> Self {
        match side {
            CastleSide::Kingside => SpecialMove::KingsideCastle,
            CastleSide::Queenside => SpecialMove::QueensideCastle,
        }
    }
}

/// Trailing `+` / `#` on a move string. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    Check,
    Checkmate,
}

/// Parsed move text, before the board is consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveIntent {
    Castle {
        side: CastleSide,
        annotation: Option<Annotation>,
    },
    Normal {
        piece: PieceType,
        destination: Square,
        from_file: Option<File>,
        from_rank: Option<Rank>,
        capture: bool,
        promotion: Option<PieceType>,
        annotation: Option<Annotation>,
    },
}

impl MoveIntent {
    pub fn annotation(&self) -> Option<Annotation> {
        match self {
            MoveIntent::Castle { annotation, .. } | MoveIntent::Normal { annotation, .. } => {
                *annotation
            }
        }
    }
}

/// A concrete, legal move ready to be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedMove {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub special: SpecialMove,
    pub promotion: Option<PieceType>,
}

impl ResolvedMove {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.special.castle_side().is_some()
    }
}
