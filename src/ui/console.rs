//! Text console front end
//!
//! A thin loop over [`GameSession`]: reads a line, runs a command or submits the line as a
//! move, and lets the AI answer on its turn through an [`AiWorker`].
//!
//! # Commands
//!
//! | Command   | Effect                                              |
//! |-----------|-----------------------------------------------------|
//! | `help`    | list commands                                       |
//! | `board`   | print the board                                     |
//! | `history` | numbered move list                                  |
//! | `legal`   | every legal move in canonical notation              |
//! | `status`  | current game status                                 |
//! | `undo`    | take back moves until it is the human's turn again  |
//! | `redo`    | replay one undone move                              |
//! | `fen`     | current position string                             |
//! | `hint`    | ask the opponent for a suggestion without playing it|
//! | `eval`    | engine score of the position, from white's side     |
//! | `solo`    | switch the opponent off or back on                  |
//! | `new`     | start a fresh game                                  |
//! | `quit`    | leave                                               |
//!
//! Anything else is treated as a move. In solo mode the human moves for both sides and
//! `undo`/`redo` step one move at a time.
//!
//! Reader and writer are generic so tests can script whole games.

use crate::core::Settings;
use crate::game::ai::{AiError, AiWorker, MoveSuggester, RandomOpponent};
use crate::game::notation::resolve_text;
use crate::game::notation::to_san;
use crate::game::oracle::EngineOracle;
use crate::game::rules::BoardState;
use crate::game::types::Square;
use crate::game::{GameError, GameResult, GameSession, GameStatus};
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::{info, warn};

/// Extra wait beyond the configured think time before giving up on the AI
const AI_GRACE: Duration = Duration::from_secs(10);

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Board,
    History,
    Legal,
    Status,
    Undo,
    Redo,
    Fen,
    Hint,
    Eval,
    Solo,
    New,
    Quit,
    Move(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "help" | "?" => Command::Help,
            "board" => Command::Board,
            "history" | "moves" => Command::History,
            "legal" => Command::Legal,
            "status" => Command::Status,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "fen" => Command::Fen,
            "hint" => Command::Hint,
            "eval" | "evaluate" => Command::Eval,
            "solo" => Command::Solo,
            "new" => Command::New,
            "quit" | "exit" => Command::Quit,
            _ => Command::Move(line.to_string()),
        }
    }
}

const HELP: &str = "\
Commands: help, board, history, legal, status, undo, redo, fen, hint, eval, solo, new, quit
Moves: SAN such as e4, Nf3, exd5, O-O, e8=Q, or coordinates such as g1f3";

/// 8x8 text diagram from white's side, uppercase white and lowercase black
pub fn render_board(state: &BoardState) -> String {
    let mut out = String::new();
    for rank in (0..8u8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8u8 {
            let cell = Square::new(file, rank)
                .and_then(|sq| state.piece_at(sq))
                .map_or('.', |piece| piece.to_fen_char());
            out.push(' ');
            out.push(cell);
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out
}

/// Interactive game between a human and one opponent
pub struct Console<R, W> {
    input: R,
    output: W,
    settings: Settings,
    session: GameSession,
    worker: AiWorker,
    fallback: RandomOpponent,
    solo: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// # Errors
    ///
    /// [`GameError::InvalidPosition`] when the configured start position is unusable.
    pub fn new(
        input: R,
        output: W,
        settings: Settings,
        opponent: Box<dyn MoveSuggester>,
    ) -> GameResult<Self> {
        let session = Self::fresh_session(&settings)?;
        Ok(Self {
            input,
            output,
            solo: settings.solo,
            settings,
            session,
            worker: AiWorker::spawn(opponent),
            fallback: RandomOpponent::new(),
        })
    }

    fn fresh_session(settings: &Settings) -> GameResult<GameSession> {
        let config = settings.session_config();
        let session = match &settings.start_position {
            Some(fen) => GameSession::from_fen(fen, config)?,
            None => GameSession::new(config),
        };
        Ok(if settings.oracle_cross_check {
            session.with_oracle(Box::new(EngineOracle))
        } else {
            session
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_solo(&self) -> bool {
        self.solo
    }

    /// Play until `quit` or end of input
    ///
    /// # Errors
    ///
    /// I/O failures on the console streams, or [`GameError::InternalInvariant`]
    /// wrapped as an I/O error.
    pub fn run(&mut self) -> io::Result<()> {
        if self.solo {
            writeln!(
                self.output,
                "Solo mode: you move for both sides. Type 'help' for commands."
            )?;
        } else {
            writeln!(
                self.output,
                "You play {}. Opponent: {}. Type 'help' for commands.",
                self.settings.human_side,
                self.worker.name()
            )?;
        }
        self.print_board()?;

        loop {
            if self.ai_to_move()? {
                self.play_ai_move()?;
                continue;
            }

            write!(self.output, "{}> ", self.session.side_to_move())?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if !self.handle(Command::parse(&line))? {
                break;
            }
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn ai_to_move(&self) -> io::Result<bool> {
        if self.solo {
            return Ok(false);
        }
        let status = self.session.status().map_err(fatal)?;
        Ok(!status.is_terminal() && self.session.side_to_move() == self.settings.ai_side())
    }

    /// Returns `false` to leave the loop
    fn handle(&mut self, command: Command) -> io::Result<bool> {
        match command {
            Command::Empty => {}
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Board => self.print_board()?,
            Command::History => {
                let text = self.session.move_text();
                writeln!(
                    self.output,
                    "{}",
                    if text.is_empty() { "(no moves)" } else { text.as_str() }
                )?;
            }
            Command::Legal => {
                let moves = self.session.legal_move_notations().map_err(fatal)?;
                writeln!(self.output, "{}", moves.join(" "))?;
            }
            Command::Status => {
                let status = self.session.status().map_err(fatal)?;
                writeln!(self.output, "{status}")?;
            }
            Command::Undo if self.solo => match self.session.undo() {
                Ok(_) => {
                    writeln!(self.output, "Took back 1 move(s).")?;
                    self.print_board()?;
                }
                Err(e) => self.report(&e)?,
            },
            Command::Undo => match self.session.undo_to_turn(self.settings.human_side) {
                Ok(count) => {
                    writeln!(self.output, "Took back {count} move(s).")?;
                    self.print_board()?;
                }
                Err(e) => self.report(&e)?,
            },
            Command::Redo => match self.session.redo() {
                Ok(_) => {
                    // replay the opponent's answer too instead of letting it think again
                    while !self.solo
                        && self.session.side_to_move() != self.settings.human_side
                        && self.session.history().can_redo()
                    {
                        self.session.redo().map_err(fatal)?;
                    }
                    self.print_board()?;
                }
                Err(e) => self.report(&e)?,
            },
            Command::Fen => writeln!(self.output, "{}", self.session.position_string())?,
            Command::Hint => self.hint()?,
            Command::Eval => match self.session.evaluation() {
                Ok(eval) => writeln!(self.output, "Evaluation: {eval}")?,
                Err(e) if e.is_recoverable() => self.report(&e)?,
                Err(e) => return Err(fatal(e)),
            },
            Command::Solo => {
                self.solo = !self.solo;
                info!("[GAME] Solo mode {}", if self.solo { "on" } else { "off" });
                if self.solo {
                    writeln!(self.output, "Solo mode: you move for both sides.")?;
                } else {
                    writeln!(
                        self.output,
                        "Opponent back on: you play {} against {}.",
                        self.settings.human_side,
                        self.worker.name()
                    )?;
                }
            }
            Command::New => {
                self.session = Self::fresh_session(&self.settings).map_err(fatal)?;
                info!("[GAME] New game");
                writeln!(self.output, "New game.")?;
                self.print_board()?;
            }
            Command::Quit => return Ok(false),
            Command::Move(text) => match self.session.submit_notation(&text) {
                Ok(outcome) => {
                    writeln!(self.output, "You played {}", outcome.notation)?;
                    self.announce(outcome.status)?;
                }
                Err(e) if e.is_recoverable() => self.report(&e)?,
                Err(e) => return Err(fatal(e)),
            },
        }
        Ok(true)
    }

    fn report(&mut self, err: &GameError) -> io::Result<()> {
        writeln!(self.output, "{err}")
    }

    fn announce(&mut self, status: GameStatus) -> io::Result<()> {
        if status.is_terminal() || status == GameStatus::Check {
            writeln!(self.output, "{status}")?;
        }
        if status.is_terminal() {
            writeln!(self.output, "Type 'undo', 'new' or 'quit'.")?;
        }
        Ok(())
    }

    fn print_board(&mut self) -> io::Result<()> {
        let board = render_board(self.session.current_state());
        write!(self.output, "{board}")
    }

    fn wait_time(&self) -> Duration {
        Duration::from_secs_f32(self.settings.ai.think_time_secs()) + AI_GRACE
    }

    fn ask_worker(&mut self) -> Result<String, AiError> {
        let position = self.session.position_string();
        self.worker
            .request(&position, self.settings.ai.strength())?
            .wait(self.wait_time())
    }

    fn fallback_reply(&mut self) -> io::Result<String> {
        let position = self.session.position_string();
        self.fallback
            .request_move(&position, 0)
            .map_err(|e| fatal(GameError::from(e)))
    }

    fn play_ai_move(&mut self) -> io::Result<()> {
        let reply = match self.ask_worker() {
            Ok(reply) => reply,
            Err(e) => {
                let err = GameError::from(e);
                warn!("[AI] {}; falling back to random mover", err);
                writeln!(self.output, "{err}. Falling back to random moves.")?;
                self.fallback_reply()?
            }
        };

        let outcome = match self.session.submit_notation(&reply) {
            Ok(outcome) => outcome,
            Err(e) if e.is_recoverable() => {
                warn!(
                    "[AI] Opponent reply '{}' rejected: {}; falling back to random mover",
                    reply, e
                );
                writeln!(
                    self.output,
                    "Opponent suggested an unusable move ({e}). Falling back to random moves."
                )?;
                let reply = self.fallback_reply()?;
                self.session.submit_notation(&reply).map_err(fatal)?
            }
            Err(e) => return Err(fatal(e)),
        };

        writeln!(self.output, "Opponent played {}", outcome.notation)?;
        self.print_board()?;
        self.announce(outcome.status)
    }

    fn hint(&mut self) -> io::Result<()> {
        let status = self.session.status().map_err(fatal)?;
        if status.is_terminal() {
            return writeln!(self.output, "{status}");
        }
        match self.ask_worker() {
            Ok(reply) => {
                let state = *self.session.current_state();
                match resolve_text(&state, &reply).and_then(|mv| to_san(&state, &mv)) {
                    Ok(san) => writeln!(self.output, "Hint: {san}"),
                    Err(e) => writeln!(self.output, "Opponent suggested an unusable move: {e}"),
                }
            }
            Err(e) => self.report(&GameError::from(e)),
        }
    }
}

fn fatal(err: GameError) -> io::Error {
    io::Error::other(err)
}
