//! Alpha-beta search with negamax
//!
//! Scores are always from the side to move's point of view, so each ply negates the
//! child's score and swaps the window. Search depth is bounded by the caller, which keeps
//! recursion shallow. A node that runs past the deadline marks the context as aborted and
//! the caller discards the unfinished iteration.

use super::make_unmake::{make_move, unmake_move};
use super::ordering::order_moves;
use super::quiescence::quiescence_search;
use super::SearchContext;
use crate::constants::*;
use crate::move_gen::*;
use crate::types::*;

/// Score given to the side to move when it is mated `ply` plies from the root.
pub(crate) fn mated_score(ply: i32) -> i16 {
    -KING_VALUE + ply as i16
}

/// Negamax alpha-beta
pub(crate) fn alphabeta(
    game: &mut Game,
    ctx: &mut SearchContext,
    depth: i32,
    ply: i32,
    mut alpha: i16,
    beta: i16,
) -> i16 {
    game.calls += 1;
    if game.calls % 1024 == 0 && ctx.out_of_time() {
        ctx.aborted = true;
    }
    if ctx.aborted {
        return 0;
    }

    if depth <= 0 {
        return quiescence_search(game, ctx, alpha, beta, 0);
    }

    let color = game.side_to_move;
    let in_check = is_in_check(game, color);
    // one-ply check extension, bounded by the ply limit
    let depth = if in_check && ply < MAX_DEPTH * 2 {
        depth + 1
    } else {
        depth
    };

    let mut moves = generate_pseudo_legal_moves(game, color);
    order_moves(game, &mut moves);

    let mut any_legal = false;
    let mut best = -AB_INF;

    for mv in moves {
        let undo = make_move(game, mv);
        if is_in_check(game, color) {
            unmake_move(game, mv, undo);
            continue;
        }
        any_legal = true;
        let score = -alphabeta(game, ctx, depth - 1, ply + 1, -beta, -alpha);
        unmake_move(game, mv, undo);

        if ctx.aborted {
            return 0;
        }
        if score > best {
            best = score;
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            game.cut += 1;
            break;
        }
    }

    if !any_legal {
        return if in_check { mated_score(ply) } else { 0 };
    }

    best
}
