//! Move resolver and validator
//!
//! Turns a [`MoveIntent`] plus the current [`BoardState`] into exactly one legal
//! [`ResolvedMove`], or a [`GameError`] saying precisely why not.
//!
//! # Resolution order
//!
//! 1. Collect the mover's pieces of the requested kind
//! 2. Keep those whose movement pattern reaches the destination (pawns push when the
//!    intent does not capture and capture diagonally when it does)
//! 3. Apply the origin hints
//! 4. None left: [`GameError::NoMatchingPiece`] with a reason
//! 5. Several left: [`GameError::AmbiguousMove`] listing their squares
//! 6. Promotion checks ([`GameError::PromotionRequired`] / [`GameError::PromotionNotApplicable`])
//! 7. Simulate the move; if the mover's king is attacked: [`GameError::LeavesKingInCheck`]
//!
//! Ambiguity is decided before king safety, so `Nd2` with two knights able to reach d2 is
//! ambiguous even when one of them is pinned. The SAN writer disambiguates against the same
//! candidate set, which keeps written moves parseable.
//!
//! Everything here is a pure function of its inputs.

use super::error::{GameError, GameResult, NoPieceReason};
use super::rules::piece_moves::{pawn_capture_reach, pawn_push_reach, piece_reach, Reach};
use super::rules::BoardState;
use super::types::{
    CastleSide, File, MoveIntent, Piece, PieceType, Rank, ResolvedMove, SpecialMove, Square,
};
use tracing::trace;

/// Pieces of one kind that can reach a destination by pattern
#[derive(Debug, Clone, Default)]
pub(crate) struct Candidates {
    /// Squares of pieces whose pattern reaches the destination unobstructed
    pub reachable: Vec<Square>,
    /// Whether any piece fitted the pattern but was obstructed
    pub blocked: bool,
    /// Whether the side to move has any piece of the kind at all
    pub any_piece: bool,
}

/// Steps 1-3: pattern candidates for `kind` moving to `to`, filtered by the hints
pub(crate) fn candidates(
    state: &BoardState,
    kind: PieceType,
    to: Square,
    capture: bool,
    from_file: Option<File>,
    from_rank: Option<Rank>,
) -> Candidates {
    let color = state.side_to_move();
    let mut found = Candidates::default();

    for (from, piece) in state.pieces_of(color).filter(|(_, p)| p.kind == kind) {
        found.any_piece = true;
        if from_file.is_some_and(|f| f != from.file) || from_rank.is_some_and(|r| r != from.rank)
        {
            continue;
        }
        let reach = match kind {
            PieceType::Pawn if capture => pawn_capture_reach(state, color, from, to),
            PieceType::Pawn => pawn_push_reach(state, color, from, to),
            _ => piece_reach(state, piece, from, to),
        };
        match reach {
            Reach::Reachable => found.reachable.push(from),
            Reach::Blocked => found.blocked = true,
            Reach::Unreachable => {}
        }
    }

    found
}

/// Resolve a parsed move against a position
///
/// # Errors
///
/// Any of the resolver rejections listed in the module docs, or
/// [`GameError::InternalInvariant`] if the position has no king for the side to move.
pub fn resolve(state: &BoardState, intent: &MoveIntent) -> GameResult<ResolvedMove> {
    match *intent {
        MoveIntent::Castle { side, .. } => resolve_castle(state, side),
        MoveIntent::Normal {
            piece,
            destination,
            from_file,
            from_rank,
            capture,
            promotion,
            ..
        } => {
            let found = candidates(state, piece, destination, capture, from_file, from_rank);
            trace!(
                "[RESOLVER] {} to {}: {} candidate(s)",
                piece,
                destination,
                found.reachable.len()
            );
            match found.reachable.as_slice() {
                [] => {
                    let reason = if !found.any_piece {
                        NoPieceReason::NoSuchPiece
                    } else if found.blocked {
                        NoPieceReason::Blocked
                    } else {
                        NoPieceReason::Unreachable
                    };
                    Err(GameError::no_piece(reason))
                }
                [from] => finish(state, *from, destination, promotion),
                many => Err(GameError::AmbiguousMove {
                    candidates: many.to_vec(),
                }),
            }
        }
    }
}

/// Steps 6-7 for a single origin: promotion checks, special tag, king safety
fn finish(
    state: &BoardState,
    from: Square,
    to: Square,
    promotion: Option<PieceType>,
) -> GameResult<ResolvedMove> {
    let color = state.side_to_move();
    let piece = state
        .piece_at(from)
        .ok_or_else(|| GameError::invariant(format!("candidate square {from} is empty")))?;

    let reaches_last_rank =
        piece.kind == PieceType::Pawn && to.rank.index() == color.promotion_rank();
    match (reaches_last_rank, promotion) {
        (true, None) => return Err(GameError::PromotionRequired),
        (false, Some(_)) => return Err(GameError::PromotionNotApplicable),
        _ => {}
    }

    let is_en_passant = piece.kind == PieceType::Pawn
        && from.file != to.file
        && state.piece_at(to).is_none()
        && state.en_passant_target() == Some(to);

    let (special, captured) = if is_en_passant {
        (
            SpecialMove::EnPassant,
            Some(Piece::new(PieceType::Pawn, color.opposite())),
        )
    } else if reaches_last_rank {
        (SpecialMove::Promotion, state.piece_at(to))
    } else {
        (SpecialMove::None, state.piece_at(to))
    };

    let mv = ResolvedMove {
        from,
        to,
        piece,
        captured,
        special,
        promotion,
    };
    ensure_king_safe(state, &mv)?;
    Ok(mv)
}

fn ensure_king_safe(state: &BoardState, mv: &ResolvedMove) -> GameResult<()> {
    let color = state.side_to_move();
    let after = state.apply(mv)?;
    if after.is_in_check(color)? {
        return Err(GameError::LeavesKingInCheck);
    }
    Ok(())
}

fn resolve_castle(state: &BoardState, side: CastleSide) -> GameResult<ResolvedMove> {
    let color = state.side_to_move();
    let rank = color.home_rank();
    let unavailable = || GameError::no_piece(NoPieceReason::CastlingUnavailable);
    let square = |file: u8| {
        Square::new(file, rank).ok_or_else(|| GameError::invariant("castling file out of range"))
    };

    if !state.castling_rights().has(color, side) {
        return Err(unavailable());
    }

    let king_from = square(4)?;
    let king = Piece::new(PieceType::King, color);
    let (rook_file, _) = side.rook_files();
    let rook_from = square(rook_file)?;
    if state.piece_at(king_from) != Some(king)
        || state.piece_at(rook_from) != Some(Piece::new(PieceType::Rook, color))
    {
        return Err(unavailable());
    }

    let (low, high) = if rook_file < 4 { (rook_file + 1, 4) } else { (5, rook_file) };
    for file in low..high {
        if state.piece_at(square(file)?).is_some() {
            return Err(GameError::no_piece(NoPieceReason::Blocked));
        }
    }

    let king_to = square(side.king_target_file())?;
    let enemy = color.opposite();
    if state.is_square_attacked(king_from, enemy) {
        return Err(GameError::LeavesKingInCheck);
    }
    let transit = match side {
        CastleSide::Kingside => [square(5)?, square(6)?],
        CastleSide::Queenside => [square(3)?, square(2)?],
    };
    if transit.iter().any(|&sq| state.is_square_attacked(sq, enemy)) {
        return Err(GameError::LeavesKingInCheck);
    }

    let mv = ResolvedMove {
        from: king_from,
        to: king_to,
        piece: king,
        captured: None,
        special: SpecialMove::from(side),
        promotion: None,
    };
    ensure_king_safe(state, &mv)?;
    Ok(mv)
}

/// Resolve a move given as origin and destination squares
///
/// A king stepping two files along its home rank is read as castling. Used for engine
/// replies and by the legality cross-check.
///
/// # Errors
///
/// [`GameError::NoMatchingPiece`] when `from` holds no piece of the side to move, plus every
/// rejection [`resolve`] can produce.
pub fn resolve_squares(
    state: &BoardState,
    from: Square,
    to: Square,
    promotion: Option<PieceType>,
) -> GameResult<ResolvedMove> {
    let color = state.side_to_move();
    let piece = state
        .piece_at(from)
        .filter(|p| p.color == color)
        .ok_or_else(|| GameError::no_piece(NoPieceReason::NoSuchPiece))?;

    if piece.kind == PieceType::King
        && from.rank == to.rank
        && from.rank.index() == color.home_rank()
        && from.file.index() == 4
    {
        match to.file.index() {
            6 => return resolve_castle(state, CastleSide::Kingside),
            2 => return resolve_castle(state, CastleSide::Queenside),
            _ => {}
        }
    }

    let capture = match piece.kind {
        PieceType::Pawn => from.file != to.file,
        _ => state.piece_at(to).is_some(),
    };
    resolve(
        state,
        &MoveIntent::Normal {
            piece: piece.kind,
            destination: to,
            from_file: Some(from.file),
            from_rank: Some(from.rank),
            capture,
            promotion,
            annotation: None,
        },
    )
}

fn promotion_order(kind: Option<PieceType>) -> usize {
    kind.and_then(|k| PieceType::PROMOTIONS.iter().position(|&p| p == k))
        .unwrap_or(0)
}

/// Every legal move for the side to move
///
/// Ordered by origin square index, then destination index, then promotion piece
/// (queen, rook, bishop, knight).
///
/// # Errors
///
/// Only [`GameError::InternalInvariant`]; ordinary rejections are simply left out.
pub fn legal_moves(state: &BoardState) -> GameResult<Vec<ResolvedMove>> {
    let color = state.side_to_move();
    let mut moves = Vec::new();

    let mut keep = |result: GameResult<ResolvedMove>| -> GameResult<()> {
        match result {
            Ok(mv) => {
                moves.push(mv);
                Ok(())
            }
            Err(err) if err.is_recoverable() => Ok(()),
            Err(err) => Err(err),
        }
    };

    for (from, piece) in state.pieces_of(color) {
        for to in Square::all() {
            let reach = match piece.kind {
                PieceType::Pawn => {
                    let push = pawn_push_reach(state, color, from, to);
                    if push == Reach::Reachable {
                        push
                    } else {
                        pawn_capture_reach(state, color, from, to)
                    }
                }
                _ => piece_reach(state, piece, from, to),
            };
            if reach != Reach::Reachable {
                continue;
            }
            if piece.kind == PieceType::Pawn && to.rank.index() == color.promotion_rank() {
                for kind in PieceType::PROMOTIONS {
                    keep(finish(state, from, to, Some(kind)))?;
                }
            } else {
                keep(finish(state, from, to, None))?;
            }
        }
        if piece.kind == PieceType::King {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                keep(resolve_castle(state, side))?;
            }
        }
    }

    moves.sort_by_key(|mv| (mv.from.index(), mv.to.index(), promotion_order(mv.promotion)));
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::error::ErrorKind;
    use crate::game::notation::parse;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn resolve_text(state: &BoardState, text: &str) -> GameResult<ResolvedMove> {
        resolve(state, &parse(text).unwrap())
    }

    #[test]
    fn test_initial_position_has_twenty_moves() {
        let moves = legal_moves(&BoardState::initial()).unwrap();
        assert_eq!(moves.len(), 20);
        assert_eq!(moves, legal_moves(&BoardState::initial()).unwrap());
    }

    #[test]
    fn test_knight_resolves_uniquely() {
        let mv = resolve_text(&BoardState::initial(), "Nf3").unwrap();
        assert_eq!(mv.from, sq("g1"));
        assert_eq!(mv.to, sq("f3"));
        assert_eq!(mv.special, SpecialMove::None);
    }

    #[test]
    fn test_no_matching_piece_reasons() {
        let state = BoardState::initial();
        let reason = |text: &str| match resolve_text(&state, text) {
            Err(GameError::NoMatchingPiece { reason }) => reason,
            other => panic!("{text}: expected NoMatchingPiece, got {other:?}"),
        };
        assert_eq!(reason("Nd4"), NoPieceReason::Unreachable);
        assert_eq!(reason("Bc4"), NoPieceReason::Blocked);
        assert_eq!(reason("O-O"), NoPieceReason::Blocked);
        assert_eq!(reason("e5"), NoPieceReason::Unreachable);

        let bare = BoardState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(matches!(
            resolve_text(&bare, "Qd4"),
            Err(GameError::NoMatchingPiece { reason: NoPieceReason::NoSuchPiece })
        ));
        assert!(matches!(
            resolve_text(&bare, "O-O"),
            Err(GameError::NoMatchingPiece { reason: NoPieceReason::CastlingUnavailable })
        ));
    }

    #[test]
    fn test_ambiguity_reported_before_king_safety() {
        // knights on b1 and f3 both reach d2
        let state = BoardState::from_fen("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1").unwrap();
        match resolve_text(&state, "Nd2") {
            Err(GameError::AmbiguousMove { candidates }) => {
                assert_eq!(candidates, vec![sq("b1"), sq("f3")]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
        assert_eq!(resolve_text(&state, "Nbd2").unwrap().from, sq("b1"));
        assert_eq!(resolve_text(&state, "N3d2").unwrap().from, sq("f3"));
    }

    #[test]
    fn test_pinned_piece_leaves_king_in_check() {
        let state = BoardState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let err = resolve_text(&state, "Nc3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LeavesKingInCheck);
    }

    #[test]
    fn test_promotion_rules() {
        let state = BoardState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(resolve_text(&state, "a8").unwrap_err(), GameError::PromotionRequired);
        let mv = resolve_text(&state, "a8=N").unwrap();
        assert_eq!(mv.special, SpecialMove::Promotion);
        assert_eq!(mv.promotion, Some(PieceType::Knight));

        let early = BoardState::from_fen("4k3/8/P7/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            resolve_text(&early, "a7=Q").unwrap_err(),
            GameError::PromotionNotApplicable
        );
    }

    #[test]
    fn test_en_passant_resolution() {
        let state = BoardState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 5").unwrap();
        let mv = resolve_text(&state, "exd6").unwrap();
        assert_eq!(mv.special, SpecialMove::EnPassant);
        assert_eq!(mv.captured, Some(Piece::new(PieceType::Pawn, crate::game::types::PieceColor::Black)));
    }

    #[test]
    fn test_castling_through_check_rejected() {
        let state = BoardState::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert_eq!(resolve_text(&state, "O-O").unwrap_err(), GameError::LeavesKingInCheck);
        let mv = resolve_text(&state, "O-O-O").unwrap();
        assert_eq!(mv.to, sq("c1"));
        assert_eq!(mv.special, SpecialMove::QueensideCastle);
    }

    #[test]
    fn test_resolve_squares_reads_castling_and_promotion() {
        let state = BoardState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = resolve_squares(&state, sq("e1"), sq("g1"), None).unwrap();
        assert_eq!(mv.special, SpecialMove::KingsideCastle);

        let state = BoardState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = resolve_squares(&state, sq("a7"), sq("a8"), Some(PieceType::Queen)).unwrap();
        assert_eq!(mv.promotion, Some(PieceType::Queen));

        let err = resolve_squares(&state, sq("e8"), sq("e7"), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingPiece);
    }

    #[test]
    fn test_capture_flag_advisory_for_pieces() {
        let state = BoardState::initial();
        // knight "captures" on an empty square
        assert_eq!(resolve_text(&state, "Nxf3").unwrap().from, sq("g1"));
    }
}
