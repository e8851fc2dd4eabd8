//! Game session: the game loop behind every front end
//!
//! A [`GameSession`] owns one game's [`MoveHistory`] and turns move text into applied
//! moves:
//!
//! 1. Refuse when the current status is terminal
//! 2. Resolve the text (SAN or coordinate form) against the current position
//! 3. Write the canonical notation
//! 4. Optionally cross-check the move with a [`RuleOracle`]
//! 5. Record it, derive the new status and report both back
//!
//! Human input and AI replies take the same path. Nothing here is global: a new game is a
//! new session.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut session = GameSession::new(SessionConfig::default());
//! let outcome = session.submit_notation("e4")?;
//! assert_eq!(outcome.notation, "e4");
//! session.undo()?;
//! ```

use crate::game::analysis::{evaluate_position, Evaluation, MoveAnalysis};
use crate::game::error::{GameError, GameResult};
use crate::game::notation::{parse, resolve_text, to_san};
use crate::game::oracle::{cross_check, RuleOracle};
use crate::game::resolver::legal_moves;
use crate::game::resources::{derive_status, GameStatus, MoveHistory, DEFAULT_INACTIVITY_THRESHOLD};
use crate::game::rules::BoardState;
use crate::game::types::{Annotation, PieceColor, ResolvedMove};
use tracing::{debug, info, warn};

/// Per-game rule and diagnostics options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Halfmove clock value that draws the game
    pub inactivity_threshold: u32,
    /// Warn when a `+`/`#` suffix disagrees with the real status
    pub strict_annotations: bool,
    /// Cross-check every move with the configured oracle
    pub cross_check: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_threshold: DEFAULT_INACTIVITY_THRESHOLD,
            strict_annotations: false,
            cross_check: false,
        }
    }
}

/// What an accepted move did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub resolved: ResolvedMove,
    /// Canonical notation as recorded in the history
    pub notation: String,
    /// Status of the position after the move
    pub status: GameStatus,
    pub analysis: MoveAnalysis,
}

pub struct GameSession {
    history: MoveHistory,
    config: SessionConfig,
    oracle: Option<Box<dyn RuleOracle + Send>>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("history", &self.history)
            .field("config", &self.config)
            .field("oracle", &self.oracle.is_some())
            .finish()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    /// Session from the standard starting position
    pub fn new(config: SessionConfig) -> Self {
        Self::from_state(BoardState::initial(), config)
    }

    pub fn from_state(initial: BoardState, config: SessionConfig) -> Self {
        Self {
            history: MoveHistory::new(initial),
            config,
            oracle: None,
        }
    }

    /// Session from a position string
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPosition`] when the string cannot be loaded.
    pub fn from_fen(fen: &str, config: SessionConfig) -> GameResult<Self> {
        Ok(Self::from_state(BoardState::from_fen(fen)?, config))
    }

    /// Rebuild a session from a starting position and its move list
    ///
    /// # Errors
    ///
    /// The first rejection encountered; earlier moves are not kept.
    pub fn replay<S: AsRef<str>>(
        initial_fen: &str,
        moves: &[S],
        config: SessionConfig,
    ) -> GameResult<Self> {
        let mut session = Self::from_fen(initial_fen, config)?;
        for text in moves {
            session.submit_notation(text.as_ref())?;
        }
        Ok(session)
    }

    /// Attach an oracle for cross-checking
    pub fn with_oracle(mut self, oracle: Box<dyn RuleOracle + Send>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Resolve and play one move given as SAN (`Nf3`) or coordinate (`g1f3`) text
    ///
    /// # Errors
    ///
    /// - [`GameError::GameOver`] when the game has already ended
    /// - any parser or resolver rejection; the session is unchanged
    pub fn submit_notation(&mut self, text: &str) -> GameResult<MoveOutcome> {
        let status = self.status()?;
        if status.is_terminal() {
            return Err(GameError::GameOver {
                status: status.message(),
            });
        }

        let state = *self.history.current_state();
        let resolved = match resolve_text(&state, text) {
            Ok(mv) => mv,
            Err(e) => {
                debug!("[GAME] Rejected '{}': {}", text.trim(), e);
                return Err(e);
            }
        };
        let notation = to_san(&state, &resolved)?;

        if self.config.cross_check {
            if let Some(oracle) = self.oracle.as_deref() {
                cross_check(oracle, &state.to_fen(), &resolved);
            }
        }

        let mover = state.side_to_move();
        self.history.record_move(resolved, notation.clone())?;
        let status = self.status()?;

        self.check_annotation(text, &notation, status);
        info!("[GAME] {} played {} ({})", mover, notation, status);
        if status.is_terminal() {
            info!("[GAME] Game over: {}", status);
        }

        Ok(MoveOutcome {
            resolved,
            notation,
            status,
            analysis: MoveAnalysis::new(&resolved, status),
        })
    }

    /// Compare a typed `+`/`#` with the real outcome
    fn check_annotation(&self, text: &str, notation: &str, status: GameStatus) {
        let claimed = parse(text).ok().and_then(|intent| intent.annotation());
        let Some(claimed) = claimed else { return };
        let actual_matches = match claimed {
            Annotation::Check => status == GameStatus::Check,
            Annotation::Checkmate => matches!(status, GameStatus::Checkmate { .. }),
        };
        if actual_matches {
            return;
        }
        if self.config.strict_annotations {
            warn!(
                "[GAME] Annotation on '{}' does not match the position; recorded as {}",
                text.trim(),
                notation
            );
        } else {
            debug!("[GAME] Ignoring annotation on '{}'", text.trim());
        }
    }

    /// Status of the current position
    ///
    /// # Errors
    ///
    /// Only [`GameError::InternalInvariant`].
    pub fn status(&self) -> GameResult<GameStatus> {
        derive_status(&self.history, self.config.inactivity_threshold)
    }

    /// Engine evaluation of the current position, from white's side
    ///
    /// # Errors
    ///
    /// [`GameError::InternalInvariant`] from status derivation, or
    /// [`GameError::InvalidPosition`] when the engine cannot load the position.
    pub fn evaluation(&self) -> GameResult<Evaluation> {
        evaluate_position(self.history.current_state(), self.status()?)
    }

    pub fn legal_moves(&self) -> GameResult<Vec<ResolvedMove>> {
        legal_moves(self.history.current_state())
    }

    /// Canonical notation of every legal move, in [`Self::legal_moves`] order
    pub fn legal_move_notations(&self) -> GameResult<Vec<String>> {
        let state = self.history.current_state();
        legal_moves(state)?
            .iter()
            .map(|mv| to_san(state, mv))
            .collect()
    }

    /// Take back the latest move
    ///
    /// Allowed from terminal statuses too.
    ///
    /// # Errors
    ///
    /// [`GameError::NothingToUndo`] at the start of the game.
    pub fn undo(&mut self) -> GameResult<BoardState> {
        let state = *self.history.undo()?;
        info!("[GAME] Undo, {} to move", state.side_to_move());
        Ok(state)
    }

    /// # Errors
    ///
    /// [`GameError::NothingToRedo`] when nothing is undone.
    pub fn redo(&mut self) -> GameResult<BoardState> {
        let state = *self.history.redo()?;
        info!("[GAME] Redo, {} to move", state.side_to_move());
        Ok(state)
    }

    /// Undo until `color` is to move, taking back at least one move
    ///
    /// Returns how many moves were undone. Stops early at the start of the game.
    ///
    /// # Errors
    ///
    /// [`GameError::NothingToUndo`] when there was nothing to take back at all.
    pub fn undo_to_turn(&mut self, color: PieceColor) -> GameResult<usize> {
        self.undo()?;
        let mut count = 1;
        while self.side_to_move() != color && self.history.can_undo() {
            self.undo()?;
            count += 1;
        }
        Ok(count)
    }

    pub fn current_state(&self) -> &BoardState {
        self.history.current_state()
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.history.current_state().side_to_move()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// FEN of the current position
    pub fn position_string(&self) -> String {
        self.history.current_state().to_fen()
    }

    /// FEN of the position the game started from
    pub fn initial_position_string(&self) -> String {
        self.history.initial_state().to_fen()
    }

    pub fn move_list(&self) -> Vec<String> {
        self.history.move_list()
    }

    /// Numbered move text, e.g. `1. e4 e5 2. Nf3`
    ///
    /// A game starting with black to move opens with `1...`.
    pub fn move_text(&self) -> String {
        let initial = self.history.initial_state();
        let mut number = initial.fullmove_number();
        let mut color = initial.side_to_move();
        let mut parts = Vec::new();

        for (i, notation) in self.history.move_list().into_iter().enumerate() {
            match color {
                PieceColor::White => parts.push(format!("{number}. {notation}")),
                PieceColor::Black if i == 0 => parts.push(format!("{number}... {notation}")),
                PieceColor::Black => parts.push(notation),
            }
            if color == PieceColor::Black {
                number += 1;
            }
            color = color.opposite();
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::error::ErrorKind;
    use crate::game::oracle::EngineOracle;
    use crate::game::rules::START_FEN;

    fn play(session: &mut GameSession, moves: &[&str]) {
        for text in moves {
            session.submit_notation(text).unwrap();
        }
    }

    #[test]
    fn test_submit_records_canonical_notation() {
        let mut session = GameSession::default();
        let outcome = session.submit_notation("Ng1f3").unwrap();
        assert_eq!(outcome.notation, "Nf3");
        assert_eq!(outcome.status, GameStatus::InProgress);
        let outcome = session.submit_notation("e7e5").unwrap();
        assert_eq!(outcome.notation, "e5");
        assert_eq!(session.move_list(), vec!["Nf3", "e5"]);
    }

    #[test]
    fn test_rejection_leaves_session_unchanged() {
        let mut session = GameSession::default();
        let before = session.position_string();
        let err = session.submit_notation("Ke2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingPiece);
        assert_eq!(session.position_string(), before);
        assert!(session.move_list().is_empty());
    }

    #[test]
    fn test_game_over_rejects_moves_but_allows_undo() {
        let mut session = GameSession::default();
        play(&mut session, &["f3", "e5", "g4"]);
        let outcome = session.submit_notation("Qh4#").unwrap();
        assert_eq!(outcome.notation, "Qh4#");
        assert!(outcome.status.is_terminal());
        assert!(session.legal_moves().unwrap().is_empty());

        let err = session.submit_notation("a3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GameOver);

        session.undo().unwrap();
        assert_eq!(session.status().unwrap(), GameStatus::InProgress);
    }

    #[test]
    fn test_move_text_numbering() {
        let mut session = GameSession::default();
        play(&mut session, &["e4", "e5", "Nf3"]);
        assert_eq!(session.move_text(), "1. e4 e5 2. Nf3");

        let mut session =
            GameSession::from_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 12", SessionConfig::default())
                .unwrap();
        play(&mut session, &["Kd8", "Rd2+"]);
        assert_eq!(session.move_text(), "12... Kd8 13. Rd2+");
    }

    #[test]
    fn test_replay_restores_position() {
        let mut session = GameSession::default();
        play(&mut session, &["d4", "d5", "c4", "dxc4"]);
        let replayed =
            GameSession::replay(START_FEN, &session.move_list(), SessionConfig::default()).unwrap();
        assert_eq!(replayed.position_string(), session.position_string());
    }

    #[test]
    fn test_undo_to_turn() {
        let mut session = GameSession::default();
        play(&mut session, &["e4", "e5", "Nf3"]);
        assert_eq!(session.undo_to_turn(PieceColor::White).unwrap(), 2);
        assert_eq!(session.move_list(), vec!["e4"]);
        assert_eq!(session.side_to_move(), PieceColor::Black);
    }

    #[test]
    fn test_legal_move_notations_from_start() {
        let session = GameSession::default();
        let notations = session.legal_move_notations().unwrap();
        assert_eq!(notations.len(), 20);
        assert!(notations.contains(&"Nf3".to_string()));
        assert!(notations.contains(&"e4".to_string()));
    }

    #[test]
    fn test_outcome_carries_move_analysis() {
        let mut session = GameSession::default();
        play(&mut session, &["e4", "d5"]);
        let outcome = session.submit_notation("exd5").unwrap();
        assert!(outcome.analysis.is_capture);
        assert!(!outcome.analysis.is_check);

        play(&mut session, &["Qxd5", "Nc3"]);
        let outcome = session.submit_notation("Qe5+").unwrap();
        assert!(outcome.analysis.is_check && !outcome.analysis.is_capture);
    }

    #[test]
    fn test_evaluation_follows_material() {
        let mut session = GameSession::default();
        play(&mut session, &["e4", "d5", "exd5"]);
        assert!(session.evaluation().unwrap().white_centipawns() > 0);
    }

    #[test]
    fn test_cross_check_with_oracle() {
        let config = SessionConfig {
            cross_check: true,
            strict_annotations: true,
            ..SessionConfig::default()
        };
        let mut session = GameSession::new(config).with_oracle(Box::new(EngineOracle));
        // a wrong annotation is only advisory
        let outcome = session.submit_notation("e4+").unwrap();
        assert_eq!(outcome.notation, "e4");
    }
}
