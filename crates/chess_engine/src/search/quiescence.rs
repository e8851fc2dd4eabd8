//! Quiescence search to avoid horizon effect
//!
//! At the end of the main search, captures are played out until the position is quiet so
//! that the evaluation never stops in the middle of an exchange. The depth is capped by
//! `MAX_QUIESCENCE_DEPTH` to keep long capture chains bounded.

use super::make_unmake::{make_move, unmake_move};
use super::ordering::order_moves;
use super::SearchContext;
use crate::constants::*;
use crate::evaluation::evaluate_for;
use crate::move_gen::*;
use crate::types::*;

/// Quiescence search, scored from the side to move's point of view
pub(crate) fn quiescence_search(
    game: &mut Game,
    ctx: &mut SearchContext,
    mut alpha: i16,
    beta: i16,
    qs_depth: i32,
) -> i16 {
    game.calls += 1;
    let color = game.side_to_move;
    let stand_pat = evaluate_for(game, color);

    if qs_depth >= MAX_QUIESCENCE_DEPTH || stand_pat >= beta {
        return stand_pat;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut captures: Vec<KK> = generate_pseudo_legal_moves(game, color)
        .into_iter()
        .filter(|mv| {
            game.board[mv.dst as usize] != EMPTY
                || mv.flag == FLAG_EN_PASSANT
                || mv.promotion != EMPTY
        })
        .collect();
    order_moves(game, &mut captures);

    for mv in captures {
        let undo = make_move(game, mv);
        if is_in_check(game, color) {
            unmake_move(game, mv, undo);
            continue;
        }
        let score = -quiescence_search(game, ctx, -beta, -alpha, qs_depth + 1);
        unmake_move(game, mv, undo);

        if score >= beta {
            game.cut += 1;
            return score;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}
