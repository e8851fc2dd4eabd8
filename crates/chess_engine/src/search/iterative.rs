//! Iterative deepening search
//!
//! Implements iterative deepening to enable time management and progressive
//! search depth increases. The root loop yields between root moves so the search can
//! share an executor with other work.

use super::alphabeta::alphabeta;
use super::make_unmake::{make_move, unmake_move};
use super::ordering::order_moves;
use super::SearchContext;
use crate::constants::*;
use crate::move_gen::*;
use crate::types::*;
use futures_lite::future::yield_now;
use tracing::debug;

/// Iterative deepening search
///
/// Searches depth 1, 2, ... up to `game.abs_max_depth` (capped by `MAX_DEPTH`) until the time
/// budget runs out. Depth 1 always completes so a legal move is returned whenever one exists.
/// When the side to move has no legal move, the returned `Move` is invalid and its `state`
/// says whether it is checkmate or stalemate.
pub async fn iterative_deepening(game: &mut Game, max_time_secs: f32) -> Move {
    let color = game.side_to_move;
    let mut ctx = SearchContext::with_budget(max_time_secs);
    let mut best_move = Move::default();

    game.calls = 0;
    game.cut = 0;
    game.max_depth_so_far = 0;

    let mut root_moves = generate_legal_moves(game);
    if root_moves.is_empty() {
        best_move.state = if is_in_check(game, color) {
            STATE_CHECKMATE
        } else {
            STATE_STALEMATE
        };
        return best_move;
    }
    order_moves(game, &mut root_moves);

    let max_depth = (game.abs_max_depth as i32).clamp(1, MAX_DEPTH);

    for depth in 1..=max_depth {
        let mut alpha = -AB_INF;
        let mut iteration_best: Option<(KK, i16)> = None;

        for &mv in &root_moves {
            let undo = make_move(game, mv);
            let score = -alphabeta(game, &mut ctx, depth - 1, 1, -AB_INF, -alpha);
            unmake_move(game, mv, undo);

            // depth 1 must finish, later depths are discarded when interrupted
            if ctx.aborted && depth > 1 {
                break;
            }
            if iteration_best.is_none_or(|(_, best)| score > best) {
                iteration_best = Some((mv, score));
                alpha = alpha.max(score);
            }
            yield_now().await;
        }

        if ctx.aborted && depth > 1 {
            debug!("[CHESS_ENGINE] Depth {} interrupted, keeping depth {}", depth, depth - 1);
            break;
        }
        ctx.aborted = false;

        if let Some((mv, score)) = iteration_best {
            best_move.src = mv.src as i64;
            best_move.dst = mv.dst as i64;
            best_move.promotion = mv.promotion;
            best_move.score = score as i64;
            game.max_depth_so_far = depth as i64;

            // principal move first on the next iteration
            if let Some(pos) = root_moves.iter().position(|m| *m == mv) {
                root_moves[..=pos].rotate_right(1);
            }

            if score.abs() > KING_VALUE_DIV_2 {
                if score > 0 {
                    best_move.state = STATE_CHECKMATE;
                    best_move.checkmate_in = (KING_VALUE - score) as i64;
                }
                break;
            }
        }

        if ctx.out_of_time() {
            break;
        }
    }

    debug!(
        "[CHESS_ENGINE] Searched to depth {} ({} nodes, {} cutoffs)",
        game.max_depth_so_far, game.calls, game.cut
    );

    best_move
}

/// Find best move for the side to move
pub async fn find_best_move(game: &mut Game, think_time: f32) -> Move {
    iterative_deepening(game, think_time).await
}
