//! Move history with undo and redo
//!
//! Maintains the chronological record of every move applied in a game, together with
//! the position before and after each one. This enables:
//!
//! - **Undo/Redo**: step back and forward through the line actually played
//! - **Move list export**: canonical notation for every applied move
//! - **Three-fold repetition**: the done stack is the line repetition is counted over
//!
//! # Architecture
//!
//! Two stacks of [`HistoryEntry`]:
//! - `done` - moves leading to the current position, oldest first
//! - `undone` - moves taken back, most recently undone last
//!
//! Recording a new move clears `undone`, so a game never keeps more than one branch.
//! Each entry owns copies of both boards; restoring a position never recomputes it.

use crate::game::error::{GameError, GameResult};
use crate::game::rules::{BoardState, RepetitionKey};
use crate::game::types::ResolvedMove;
use tracing::debug;

/// One applied move and the positions around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub before: BoardState,
    pub mv: ResolvedMove,
    /// Canonical notation as written when the move was recorded
    pub notation: String,
    pub after: BoardState,
}

/// Undo/redo history for one game
///
/// # Examples
///
/// ```rust,ignore
/// let mut history = MoveHistory::new(BoardState::initial());
/// let mv = resolve(history.current_state(), &parse("e4")?)?;
/// history.record_move(mv, "e4".to_string())?;
/// history.undo()?;
/// history.redo()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    initial: BoardState,
    done: Vec<HistoryEntry>,
    undone: Vec<HistoryEntry>,
}

impl MoveHistory {
    pub fn new(initial: BoardState) -> Self {
        MoveHistory {
            initial,
            done: Vec::new(),
            undone: Vec::new(),
        }
    }

    /// Apply a resolved move to the current position and append it
    ///
    /// Discards every undone move (branch pruning).
    ///
    /// # Errors
    ///
    /// [`GameError::InternalInvariant`] if the move does not fit the current position.
    pub fn record_move(&mut self, mv: ResolvedMove, notation: String) -> GameResult<&BoardState> {
        let before = *self.current_state();
        let after = before.apply(&mv)?;
        if !self.undone.is_empty() {
            debug!("[HISTORY] Pruning {} undone move(s)", self.undone.len());
            self.undone.clear();
        }
        self.done.push(HistoryEntry {
            before,
            mv,
            notation,
            after,
        });
        Ok(self.current_state())
    }

    /// Take back the latest move and return the position before it
    ///
    /// # Errors
    ///
    /// [`GameError::NothingToUndo`] at the start of the game.
    pub fn undo(&mut self) -> GameResult<&BoardState> {
        let entry = self.done.pop().ok_or(GameError::NothingToUndo)?;
        debug!("[HISTORY] Undo {}", entry.notation);
        self.undone.push(entry);
        Ok(self.current_state())
    }

    /// Replay the most recently undone move
    ///
    /// # Errors
    ///
    /// [`GameError::NothingToRedo`] when nothing has been undone since the last new move.
    pub fn redo(&mut self) -> GameResult<&BoardState> {
        let entry = self.undone.pop().ok_or(GameError::NothingToRedo)?;
        debug!("[HISTORY] Redo {}", entry.notation);
        self.done.push(entry);
        Ok(self.current_state())
    }

    pub fn current_state(&self) -> &BoardState {
        self.done.last().map_or(&self.initial, |entry| &entry.after)
    }

    pub fn initial_state(&self) -> &BoardState {
        &self.initial
    }

    /// Notation of every move on the done stack, oldest first
    pub fn move_list(&self) -> Vec<String> {
        self.done.iter().map(|entry| entry.notation.clone()).collect()
    }

    /// Position after `index` moves: 0 is the initial position
    pub fn position_at(&self, index: usize) -> Option<&BoardState> {
        match index {
            0 => Some(&self.initial),
            i => self.done.get(i - 1).map(|entry| &entry.after),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.done
    }

    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.done.last()
    }

    /// Number of moves on the done stack
    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// How often the current position has occurred along the done line
    pub fn occurrences_of_current(&self) -> usize {
        let key: RepetitionKey = self.current_state().repetition_key();
        std::iter::once(&self.initial)
            .chain(self.done.iter().map(|entry| &entry.after))
            .filter(|state| state.repetition_key() == key)
            .count()
    }
}
