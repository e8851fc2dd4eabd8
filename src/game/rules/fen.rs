//! FEN import and export for [`BoardState`]
//!
//! Six space-separated fields: placement, side to move, castling, en-passant target,
//! halfmove clock and fullmove number. The two clocks may be omitted on input.

use super::board_state::BoardState;
use crate::game::error::{GameError, GameResult};
use crate::game::types::{CastlingRights, Piece, PieceColor, PieceType, Rank, Square};

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn invalid(message: impl Into<String>) -> GameError {
    GameError::InvalidPosition {
        message: message.into(),
    }
}

fn parse_placement(text: &str) -> GameResult<[Option<Piece>; 64]> {
    let mut squares = [None; 64];
    let rows: Vec<&str> = text.split('/').collect();
    if rows.len() != 8 {
        return Err(invalid(format!("placement has {} ranks, expected 8", rows.len())));
    }
    for (i, row) in rows.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file: u8 = 0;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file = file
                    .checked_add(skip as u8)
                    .filter(|&f| f <= 8)
                    .ok_or_else(|| invalid(format!("rank {} is too long", rank + 1)))?;
                continue;
            }
            let piece =
                Piece::from_fen_char(c).ok_or_else(|| invalid(format!("unknown piece '{c}'")))?;
            let square = Square::new(file, rank)
                .ok_or_else(|| invalid(format!("rank {} is too long", rank + 1)))?;
            squares[square.index()] = Some(piece);
            file += 1;
        }
        if file != 8 {
            return Err(invalid(format!("rank {} covers {} files", rank + 1, file)));
        }
    }
    Ok(squares)
}

fn parse_castling(text: &str) -> GameResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if text == "-" {
        return Ok(rights);
    }
    for c in text.chars() {
        match c {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => return Err(invalid(format!("bad castling flag '{c}'"))),
        }
    }
    Ok(rights)
}

fn parse_counter(field: Option<&&str>, default: u32, name: &str) -> GameResult<u32> {
    match field {
        None => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|_| invalid(format!("bad {name} '{text}'"))),
    }
}

/// The target must be empty, with the pawn that just double-pushed in front of it and its
/// start square vacated
fn check_en_passant_pawn(
    squares: &[Option<Piece>; 64],
    target: Square,
    side_to_move: PieceColor,
) -> GameResult<()> {
    let mover = side_to_move.opposite();
    let step = mover.pawn_direction();
    let occupant = |sq: Option<Square>| sq.and_then(|sq| squares[sq.index()]);

    let pawn = Piece::new(PieceType::Pawn, mover);
    if occupant(Some(target)).is_some()
        || occupant(target.offset(0, -step)).is_some()
        || occupant(target.offset(0, step)) != Some(pawn)
    {
        return Err(invalid(format!(
            "en-passant square {target} does not follow a {mover} double push"
        )));
    }
    Ok(())
}

impl BoardState {
    /// Load a position string
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPosition`] when a field is malformed, a side does not
    /// have exactly one king, a pawn stands on a back rank, the en-passant square does not
    /// sit behind a pawn that just double-pushed, or the side that just moved is left in
    /// check.
    pub fn from_fen(fen: &str) -> GameResult<Self> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(invalid(format!("expected 4-6 fields, got {}", fields.len())));
        }

        let squares = parse_placement(fields[0])?;
        let side_to_move = match fields[1] {
            "w" => PieceColor::White,
            "b" => PieceColor::Black,
            other => return Err(invalid(format!("bad side to move '{other}'"))),
        };
        let castling = parse_castling(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            text => {
                let square = Square::from_algebraic(text)
                    .ok_or_else(|| invalid(format!("bad en-passant square '{text}'")))?;
                // the target sits behind a pawn of the side that just moved
                let expected_rank = match side_to_move {
                    PieceColor::White => Rank::from_number(6),
                    PieceColor::Black => Rank::from_number(3),
                };
                if Some(square.rank) != expected_rank {
                    return Err(invalid(format!("en-passant square {text} on wrong rank")));
                }
                check_en_passant_pawn(&squares, square, side_to_move)?;
                Some(square)
            }
        };

        let halfmove_clock = parse_counter(fields.get(4), 0, "halfmove clock")?;
        let fullmove_number = parse_counter(fields.get(5), 1, "fullmove number")?.max(1);

        for color in [PieceColor::White, PieceColor::Black] {
            let kings = squares
                .iter()
                .flatten()
                .filter(|p| p.kind == PieceType::King && p.color == color)
                .count();
            if kings != 1 {
                return Err(invalid(format!("{color} has {kings} kings")));
            }
        }

        let pawn_on_back_rank = Square::all().any(|sq| {
            let rank = sq.rank.index();
            (rank == 0 || rank == 7)
                && squares[sq.index()].is_some_and(|p| p.kind == PieceType::Pawn)
        });
        if pawn_on_back_rank {
            return Err(invalid("pawn on the first or last rank"));
        }

        let state = BoardState::from_parts(
            squares,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        );
        if state.is_in_check(side_to_move.opposite())? {
            return Err(invalid(format!(
                "{} is in check but it is {}'s move",
                side_to_move.opposite(),
                side_to_move
            )));
        }
        Ok(state)
    }

    /// Write the position as a FEN string
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let side = match self.side_to_move() {
            PieceColor::White => "w",
            PieceColor::Black => "b",
        };

        let rights = self.castling_rights();
        let mut castling: String = [
            (rights.white_kingside, 'K'),
            (rights.white_queenside, 'Q'),
            (rights.black_kingside, 'k'),
            (rights.black_queenside, 'q'),
        ]
        .iter()
        .filter(|(held, _)| *held)
        .map(|(_, c)| *c)
        .collect();
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant_target()
            .map(|sq| sq.to_algebraic())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{placement} {side} {castling} {en_passant} {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }
}
