//! Alpha-beta search with iterative deepening
//!
//! This module implements the core AI search using:
//! - Negamax variant of alpha-beta pruning
//! - Quiescence search at the horizon
//! - Iterative deepening for time management
//! - MVV-LVA move ordering for better pruning
//!
//! ## Module Organization
//!
//! - `alphabeta` - Core alpha-beta search algorithm
//! - `quiescence` - Quiescence search to avoid horizon effect
//! - `ordering` - Move ordering heuristics
//! - `make_unmake` - Move making/unmaking utilities
//! - `iterative` - Iterative deepening wrapper

mod alphabeta;
mod iterative;
pub(crate) mod make_unmake;
mod ordering;
mod quiescence;

pub use iterative::{find_best_move, iterative_deepening};

use instant::{Duration, Instant};

/// Time budget shared by every node of one search.
pub(crate) struct SearchContext {
    deadline: Option<Instant>,
    pub aborted: bool,
}

impl SearchContext {
    pub fn with_budget(secs: f32) -> Self {
        SearchContext {
            deadline: Some(Instant::now() + Duration::from_secs_f32(secs.max(0.0))),
            aborted: false,
        }
    }

    #[cfg(test)]
    pub fn unbounded() -> Self {
        SearchContext {
            deadline: None,
            aborted: false,
        }
    }

    pub fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
