//! Move making and unmaking for search
//!
//! Provides functions to make and unmake moves during search, with undo
//! information to restore the board state.

use crate::constants::*;
use crate::types::*;

/// Information needed to undo a move
pub(crate) struct UndoInfo {
    pub captured_piece: i8,
    pub captured_square: i8,
    pub from_square_piece: i8,
    pub castling: u8,
    pub en_passant: Option<Position>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Castling bits cleared when a piece leaves or lands on `square`.
fn castling_mask(square: i8) -> u8 {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        4 => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        60 => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}

/// Rook origin and destination for a castling move of the king to `king_dst`.
fn castle_rook_squares(king_dst: i8, flag: u8) -> (i8, i8) {
    if flag == FLAG_CASTLE_KINGSIDE {
        (king_dst + 1, king_dst - 1)
    } else {
        (king_dst - 2, king_dst + 1)
    }
}

/// Make a move on the board (returns undo information)
pub(crate) fn make_move(game: &mut Game, mv: KK) -> UndoInfo {
    let piece = game.board[mv.src as usize];
    let captured_square = if mv.flag == FLAG_EN_PASSANT {
        // captured pawn sits beside the mover, on the destination file
        mv.dst - 8 * piece.signum()
    } else {
        mv.dst
    };

    let undo = UndoInfo {
        captured_piece: game.board[captured_square as usize],
        captured_square,
        from_square_piece: piece,
        castling: game.castling,
        en_passant: game.en_passant,
        halfmove_clock: game.halfmove_clock,
        fullmove_number: game.fullmove_number,
    };

    game.board[captured_square as usize] = EMPTY;
    game.board[mv.src as usize] = EMPTY;
    game.board[mv.dst as usize] = if mv.promotion != EMPTY {
        mv.promotion * piece.signum()
    } else {
        piece
    };

    if mv.is_castle() {
        let (rook_from, rook_to) = castle_rook_squares(mv.dst, mv.flag);
        game.board[rook_to as usize] = game.board[rook_from as usize];
        game.board[rook_from as usize] = EMPTY;
    }

    game.castling &= !(castling_mask(mv.src) | castling_mask(mv.dst));
    game.en_passant = (mv.flag == FLAG_DOUBLE_PUSH).then(|| (mv.src + mv.dst) / 2);

    if piece.abs() == PAWN_ID || undo.captured_piece != EMPTY {
        game.halfmove_clock = 0;
    } else {
        game.halfmove_clock += 1;
    }
    if game.side_to_move < 0 {
        game.fullmove_number += 1;
    }
    game.side_to_move = -game.side_to_move;
    game.move_counter += 1;

    undo
}

/// Unmake a move on the board
pub(crate) fn unmake_move(game: &mut Game, mv: KK, undo: UndoInfo) {
    if mv.is_castle() {
        let (rook_from, rook_to) = castle_rook_squares(mv.dst, mv.flag);
        game.board[rook_from as usize] = game.board[rook_to as usize];
        game.board[rook_to as usize] = EMPTY;
    }

    game.board[mv.dst as usize] = EMPTY;
    game.board[mv.src as usize] = undo.from_square_piece;
    game.board[undo.captured_square as usize] = undo.captured_piece;

    game.castling = undo.castling;
    game.en_passant = undo.en_passant;
    game.halfmove_clock = undo.halfmove_clock;
    game.fullmove_number = undo.fullmove_number;
    game.side_to_move = -game.side_to_move;
    game.move_counter -= 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{game_from_fen, new_game};
    use crate::board::parse_square;
    use crate::fen::to_fen;

    #[test]
    fn test_make_unmake_restores_position() {
        let mut game = new_game();
        let before = to_fen(&game);
        let mv = KK::new(12, 28, 0, FLAG_DOUBLE_PUSH);
        let undo = make_move(&mut game, mv);
        assert_eq!(game.en_passant, Some(20));
        assert_eq!(game.side_to_move, COLOR_BLACK);
        unmake_move(&mut game, mv, undo);
        assert_eq!(to_fen(&game), before);
    }

    #[test]
    fn test_en_passant_removes_pawn() {
        let mut game = game_from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let e5 = parse_square("e5").unwrap();
        let d6 = parse_square("d6").unwrap();
        let d5 = parse_square("d5").unwrap();
        let mv = KK::new(e5, d6, 0, FLAG_EN_PASSANT);
        let undo = make_move(&mut game, mv);
        assert_eq!(game.board[d5 as usize], EMPTY);
        assert_eq!(game.board[d6 as usize], W_PAWN);
        unmake_move(&mut game, mv, undo);
        assert_eq!(game.board[d5 as usize], B_PAWN);
    }

    #[test]
    fn test_castling_moves_rook_and_clears_rights() {
        let mut game = game_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = KK::new(4, 6, 0, FLAG_CASTLE_KINGSIDE);
        let undo = make_move(&mut game, mv);
        assert_eq!(game.board[5], W_ROOK);
        assert_eq!(game.board[7], EMPTY);
        assert_eq!(game.castling, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        unmake_move(&mut game, mv, undo);
        assert_eq!(game.board[7], W_ROOK);
        assert_eq!(game.castling, CASTLE_ALL);
    }
}
