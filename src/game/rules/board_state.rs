//! Board state representation
//!
//! [`BoardState`] is an immutable snapshot: piece placement plus the auxiliary rule state
//! (side to move, castling rights, en-passant target, clocks). It is `Copy`, so every
//! history entry owns its own board and no two entries alias.
//!
//! # Architecture
//!
//! A state only comes into existence three ways:
//! - [`BoardState::initial`] for the standard starting position
//! - [`BoardState::from_fen`] for an arbitrary position string
//! - [`BoardState::apply`] on an earlier state
//!
//! Nothing mutates a state after construction; `apply` copies and returns a new one.

use super::piece_moves::attacks;
use crate::game::error::{GameError, GameResult};
use crate::game::types::{
    CastleSide, CastlingRights, Piece, PieceColor, PieceType, ResolvedMove, Square, SpecialMove,
};

/// The parts of a position that decide whether two positions repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    squares: [Option<Piece>; 64],
    side_to_move: PieceColor,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

/// Immutable chess position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    squares: [Option<Piece>; 64],
    side_to_move: PieceColor,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl BoardState {
    /// The standard starting position
    pub fn initial() -> Self {
        let mut squares = [None; 64];
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            squares[file] = Some(Piece::new(kind, PieceColor::White));
            squares[8 + file] = Some(Piece::new(PieceType::Pawn, PieceColor::White));
            squares[48 + file] = Some(Piece::new(PieceType::Pawn, PieceColor::Black));
            squares[56 + file] = Some(Piece::new(kind, PieceColor::Black));
        }
        BoardState {
            squares,
            side_to_move: PieceColor::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Assemble a state from already-validated parts. Used by the FEN loader.
    pub(crate) fn from_parts(
        squares: [Option<Piece>; 64],
        side_to_move: PieceColor,
        castling: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        BoardState {
            squares,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Occupied squares in index order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Occupied squares of one colour in index order
    pub fn pieces_of(&self, color: PieceColor) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Whether any piece of `by` attacks `square`
    pub fn is_square_attacked(&self, square: Square, by: PieceColor) -> bool {
        self.pieces_of(by)
            .any(|(from, piece)| attacks(self, piece, from, square))
    }

    /// Location of the king of `color`
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InternalInvariant`] if the side has no king. Positions loaded
    /// through [`BoardState::from_fen`] always have one, so this indicates a bug.
    pub fn king_square(&self, color: PieceColor) -> GameResult<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceType::King)
            .map(|(sq, _)| sq)
            .ok_or_else(|| GameError::invariant(format!("{color} has no king")))
    }

    pub fn is_in_check(&self, color: PieceColor) -> GameResult<bool> {
        let king = self.king_square(color)?;
        Ok(self.is_square_attacked(king, color.opposite()))
    }

    /// Apply a resolved move and return the resulting state
    ///
    /// Moves the rook on castling, removes the bypassed pawn on en passant, swaps in the
    /// promotion piece, and updates castling rights, en-passant target and both clocks.
    /// The receiver is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InternalInvariant`] when the move does not fit the position
    /// (empty origin, different piece on the origin, wrong side to move, missing rook or
    /// promotion piece). Moves produced by the resolver never trigger this.
    pub fn apply(&self, mv: &ResolvedMove) -> GameResult<BoardState> {
        let color = self.side_to_move;
        match self.piece_at(mv.from) {
            None => {
                return Err(GameError::invariant(format!(
                    "no piece on {} to move",
                    mv.from
                )))
            }
            Some(found) if found != mv.piece => {
                return Err(GameError::invariant(format!(
                    "expected {} {} on {}, found {} {}",
                    mv.piece.color, mv.piece.kind, mv.from, found.color, found.kind
                )))
            }
            Some(_) if mv.piece.color != color => {
                return Err(GameError::invariant(format!(
                    "{} cannot move on {}'s turn",
                    mv.piece.color, color
                )))
            }
            Some(_) => {}
        }

        let mut next = *self;
        next.squares[mv.from.index()] = None;

        let mut captured_something = false;
        if mv.special == SpecialMove::EnPassant {
            let victim = Square::from_coords(mv.to.file, mv.from.rank);
            if next.squares[victim.index()].take().is_none() {
                return Err(GameError::invariant(format!(
                    "no pawn on {victim} to capture en passant"
                )));
            }
            captured_something = true;
        } else if next.squares[mv.to.index()].is_some() {
            captured_something = true;
        }

        let placed = match mv.special {
            SpecialMove::Promotion => {
                let kind = mv
                    .promotion
                    .ok_or_else(|| GameError::invariant("promotion without a piece"))?;
                Piece::new(kind, color)
            }
            _ => mv.piece,
        };
        next.squares[mv.to.index()] = Some(placed);

        if let Some(side) = mv.special.castle_side() {
            let (rook_from_file, rook_to_file) = side.rook_files();
            let rank = color.home_rank();
            let rook_from = Square::new(rook_from_file, rank)
                .ok_or_else(|| GameError::invariant("rook file out of range"))?;
            let rook_to = Square::new(rook_to_file, rank)
                .ok_or_else(|| GameError::invariant("rook file out of range"))?;
            let rook = next.squares[rook_from.index()]
                .take()
                .filter(|p| p.kind == PieceType::Rook && p.color == color)
                .ok_or_else(|| GameError::invariant(format!("no rook on {rook_from} to castle")))?;
            next.squares[rook_to.index()] = Some(rook);
        }

        if mv.piece.kind == PieceType::King {
            next.castling.revoke_all(color);
        }
        for square in [mv.from, mv.to] {
            revoke_corner(&mut next.castling, square);
        }

        next.en_passant = None;
        if mv.piece.kind == PieceType::Pawn {
            let rank_delta = mv.to.rank.index() as i8 - mv.from.rank.index() as i8;
            if rank_delta.abs() == 2 {
                next.en_passant = mv.from.offset(0, rank_delta / 2);
            }
        }

        if mv.piece.kind == PieceType::Pawn || captured_something {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = self.halfmove_clock + 1;
        }
        if color == PieceColor::Black {
            next.fullmove_number = self.fullmove_number + 1;
        }
        next.side_to_move = color.opposite();

        Ok(next)
    }

    /// Key used for repetition detection
    ///
    /// The en-passant square only counts when the side to move has a legal en-passant
    /// capture onto it. A double push that cannot be answered that way, whether no pawn
    /// stands alongside or the pawn is pinned, does not make the position look new.
    pub fn repetition_key(&self) -> RepetitionKey {
        let en_passant = self
            .en_passant
            .filter(|&target| self.has_legal_en_passant(target));
        RepetitionKey {
            squares: self.squares,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant,
        }
    }

    fn has_legal_en_passant(&self, target: Square) -> bool {
        let color = self.side_to_move;
        let pawn = Piece::new(PieceType::Pawn, color);
        [-1, 1].iter().any(|&df| {
            let Some(from) = target.offset(df, -color.pawn_direction()) else {
                return false;
            };
            if self.piece_at(from) != Some(pawn) {
                return false;
            }
            let capture = ResolvedMove {
                from,
                to: target,
                piece: pawn,
                captured: Some(Piece::new(PieceType::Pawn, color.opposite())),
                special: SpecialMove::EnPassant,
                promotion: None,
            };
            self.apply(&capture)
                .and_then(|next| next.is_in_check(color))
                .is_ok_and(|in_check| !in_check)
        })
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::initial()
    }
}

/// Moving from or capturing on a rook's original corner removes that wing's right
fn revoke_corner(rights: &mut CastlingRights, square: Square) {
    let corner = match (square.file.index(), square.rank.index()) {
        (0, 0) => Some((PieceColor::White, CastleSide::Queenside)),
        (7, 0) => Some((PieceColor::White, CastleSide::Kingside)),
        (0, 7) => Some((PieceColor::Black, CastleSide::Queenside)),
        (7, 7) => Some((PieceColor::Black, CastleSide::Kingside)),
        _ => None,
    };
    if let Some((color, side)) = corner {
        rights.revoke(color, side);
    }
}
