//! FEN import and export for the engine board
//!
//! The engine accepts any position its callers can describe, so searches can start from the
//! middle of a game instead of replaying moves.

use crate::board::*;
use crate::constants::*;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::*;

fn piece_from_char(c: char) -> Option<i8> {
    let id = match c.to_ascii_lowercase() {
        'p' => PAWN_ID,
        'n' => KNIGHT_ID,
        'b' => BISHOP_ID,
        'r' => ROOK_ID,
        'q' => QUEEN_ID,
        'k' => KING_ID,
        _ => return None,
    };
    Some(if c.is_ascii_uppercase() { id } else { -id })
}

fn piece_to_char(piece: i8) -> char {
    let c = match piece.abs() {
        PAWN_ID => 'p',
        KNIGHT_ID => 'n',
        BISHOP_ID => 'b',
        ROOK_ID => 'r',
        QUEEN_ID => 'q',
        _ => 'k',
    };
    if piece > 0 {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

fn invalid(message: impl Into<String>) -> ChessEngineError {
    ChessEngineError::InvalidFen {
        message: message.into(),
    }
}

/// Load a position from a FEN string.
///
/// The halfmove and fullmove fields are optional and default to `0` and `1`.
pub fn parse_fen(fen: &str) -> ChessEngineResult<(Board, Color, u8, Option<Position>, u32, u32)> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(invalid(format!("expected at least 4 fields, got {}", fields.len())));
    }

    let mut board = [EMPTY; 64];
    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("placement must have 8 ranks"));
    }
    for (i, rank_text) in ranks.iter().enumerate() {
        let row = 7 - i as i8;
        let mut col: i8 = 0;
        for c in rank_text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                if col + skip as i8 > 8 {
                    return Err(invalid(format!("rank {} overflows", row + 1)));
                }
                col += skip as i8;
            } else {
                let piece = piece_from_char(c)
                    .ok_or_else(|| invalid(format!("unknown piece letter '{c}'")))?;
                if col >= 8 {
                    return Err(invalid(format!("rank {} overflows", row + 1)));
                }
                board[square_to_pos(col, row) as usize] = piece;
                col += 1;
            }
        }
        if col != 8 {
            return Err(invalid(format!("rank {} has {} files", row + 1, col)));
        }
    }

    let side = match fields[1] {
        "w" => COLOR_WHITE,
        "b" => COLOR_BLACK,
        other => return Err(invalid(format!("bad side to move '{other}'"))),
    };

    let mut castling = 0u8;
    if fields[2] != "-" {
        for c in fields[2].chars() {
            castling |= match c {
                'K' => CASTLE_WHITE_KINGSIDE,
                'Q' => CASTLE_WHITE_QUEENSIDE,
                'k' => CASTLE_BLACK_KINGSIDE,
                'q' => CASTLE_BLACK_QUEENSIDE,
                _ => return Err(invalid(format!("bad castling flag '{c}'"))),
            };
        }
    }

    let en_passant = match fields[3] {
        "-" => None,
        text => Some(
            parse_square(text).ok_or_else(|| invalid(format!("bad en-passant square '{text}'")))?,
        ),
    };

    let halfmove = match fields.get(4) {
        Some(text) => text
            .parse()
            .map_err(|_| invalid(format!("bad halfmove clock '{text}'")))?,
        None => 0,
    };
    let fullmove = match fields.get(5) {
        Some(text) => text
            .parse()
            .map_err(|_| invalid(format!("bad fullmove number '{text}'")))?,
        None => 1,
    };

    for king in [W_KING, B_KING] {
        let count = board.iter().filter(|&&p| p == king).count();
        if count != 1 {
            return Err(invalid(format!("expected one king per side, found {count}")));
        }
    }

    Ok((board, side, castling, en_passant, halfmove, fullmove))
}

/// Write the position as a FEN string.
pub fn to_fen(game: &Game) -> String {
    let mut placement = String::new();
    for row in (0..8).rev() {
        let mut empty = 0;
        for col in 0..8 {
            let piece = game.board[square_to_pos(col, row) as usize];
            if piece == EMPTY {
                empty += 1;
                continue;
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
                empty = 0;
            }
            placement.push(piece_to_char(piece));
        }
        if empty > 0 {
            placement.push_str(&empty.to_string());
        }
        if row > 0 {
            placement.push('/');
        }
    }

    let side = if game.side_to_move > 0 { "w" } else { "b" };

    let mut castling = String::new();
    for (bit, c) in [
        (CASTLE_WHITE_KINGSIDE, 'K'),
        (CASTLE_WHITE_QUEENSIDE, 'Q'),
        (CASTLE_BLACK_KINGSIDE, 'k'),
        (CASTLE_BLACK_QUEENSIDE, 'q'),
    ] {
        if game.castling & bit != 0 {
            castling.push(c);
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let ep = game
        .en_passant
        .map(square_name)
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{placement} {side} {castling} {ep} {} {}",
        game.halfmove_clock, game.fullmove_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{game_from_fen, new_game};

    #[test]
    fn test_start_position_round_trip() {
        let game = new_game();
        assert_eq!(to_fen(&game), START_FEN);
    }

    #[test]
    fn test_parse_fen_fields() {
        let game = game_from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 3 40").unwrap();
        assert_eq!(game.side_to_move, COLOR_WHITE);
        assert_eq!(game.castling, 0);
        assert_eq!(game.en_passant, parse_square("d6"));
        assert_eq!(game.halfmove_clock, 3);
        assert_eq!(game.fullmove_number, 40);
    }

    #[test]
    fn test_rejects_missing_king() {
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
    }

    #[test]
    fn test_rejects_bad_rank_width() {
        assert!(parse_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
    }

    #[test]
    fn test_rejects_oversized_digit_runs() {
        let long_run = format!("{}/8/8/8/8/8/8/4K2k w - - 0 1", "8".repeat(40));
        assert!(parse_fen(&long_run).is_err());
        assert!(parse_fen("4k3/9/8/8/8/8/8/4K3 w - - 0 1").is_err());
        assert!(parse_fen("4k3/08/8/8/8/8/8/4K3 w - - 0 1").is_err());
    }
}
