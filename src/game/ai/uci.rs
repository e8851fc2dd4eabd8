//! External UCI engine opponent
//!
//! Speaks the Universal Chess Interface to a child process over its stdin/stdout:
//!
//! ```text
//! > uci                                   < ... uciok
//! > setoption name Skill Level value 8
//! > isready                               < readyok
//! > position fen <fen>
//! > go movetime 1500                      < ... bestmove e2e4
//! ```
//!
//! A reader thread forwards every output line over a channel so each wait can time out.
//! Any failure tears the process down; the next request starts a fresh one.

use super::{bounded_think_time, AiError, MoveSuggester, MAX_STRENGTH};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Time allowed for the handshake and on top of the think time
const GRACE: Duration = Duration::from_secs(5);

struct UciProcess {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
    skill: Option<u8>,
}

impl UciProcess {
    fn launch(path: &PathBuf) -> Result<Self, AiError> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AiError::Spawn {
                path: path.display().to_string(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| AiError::NoReply {
            message: "engine stdin unavailable".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| AiError::NoReply {
            message: "engine stdout unavailable".to_string(),
        })?;

        let (sender, lines) = unbounded();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if sender.send(line).is_err() {
                    break;
                }
            }
        });

        let mut process = UciProcess {
            child,
            stdin,
            lines,
            skill: None,
        };
        process.send("uci")?;
        process.wait_for(|line| line == "uciok", GRACE)?;
        info!("[AI] UCI engine '{}' ready", path.display());
        Ok(process)
    }

    fn send(&mut self, command: &str) -> Result<(), AiError> {
        debug!("[AI] > {}", command);
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Read lines until one satisfies `done`, returning it
    fn wait_for(
        &mut self,
        done: impl Fn(&str) -> bool,
        timeout: Duration,
    ) -> Result<String, AiError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if done(&line) {
                        return Ok(line);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(AiError::NoReply {
                        message: format!("no answer within {:.1}s", timeout.as_secs_f32()),
                    })
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(AiError::NoReply {
                        message: "engine closed its output".to_string(),
                    })
                }
            }
        }
    }

    fn set_skill(&mut self, strength: u8) -> Result<(), AiError> {
        if self.skill == Some(strength) {
            return Ok(());
        }
        self.send(&format!("setoption name Skill Level value {strength}"))?;
        self.send("isready")?;
        self.wait_for(|line| line == "readyok", GRACE)?;
        self.skill = Some(strength);
        Ok(())
    }

    fn best_move(&mut self, position: &str, think_time: Duration) -> Result<String, AiError> {
        self.send(&format!("position fen {position}"))?;
        self.send(&format!("go movetime {}", think_time.as_millis()))?;
        let line = self.wait_for(|line| line.starts_with("bestmove"), think_time + GRACE)?;
        match line.split_whitespace().nth(1) {
            Some("(none)") | Some("0000") => Err(AiError::NoLegalMoves),
            Some(mv) => Ok(mv.to_string()),
            None => Err(AiError::NoReply {
                message: format!("malformed reply '{line}'"),
            }),
        }
    }
}

impl Drop for UciProcess {
    fn drop(&mut self) {
        let _ = writeln!(self.stdin, "quit");
        let _ = self.stdin.flush();
        if let Err(e) = self.child.kill() {
            debug!("[AI] Engine already exited: {}", e);
        }
        let _ = self.child.wait();
    }
}

/// Opponent running an external engine binary
pub struct UciProcessOpponent {
    path: PathBuf,
    think_time: Duration,
    process: Option<UciProcess>,
}

impl std::fmt::Debug for UciProcessOpponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UciProcessOpponent")
            .field("path", &self.path)
            .field("think_time", &self.think_time)
            .field("running", &self.process.is_some())
            .finish()
    }
}

impl UciProcessOpponent {
    /// The process is started lazily on the first request
    pub fn new(path: PathBuf, think_time_secs: f32) -> Self {
        Self {
            path,
            think_time: Duration::from_secs_f32(bounded_think_time(think_time_secs)),
            process: None,
        }
    }

    fn ask(&mut self, position: &str, strength: u8) -> Result<String, AiError> {
        let process = match self.process.take() {
            Some(process) => process,
            None => UciProcess::launch(&self.path)?,
        };
        let process = self.process.insert(process);
        process.set_skill(strength.min(MAX_STRENGTH))?;
        process.best_move(position, self.think_time)
    }
}

impl MoveSuggester for UciProcessOpponent {
    fn name(&self) -> &str {
        "uci"
    }

    fn request_move(&mut self, position: &str, strength: u8) -> Result<String, AiError> {
        let result = self.ask(position, strength);
        if let Err(e) = &result {
            if !matches!(e, AiError::NoLegalMoves) {
                warn!("[AI] UCI engine failed, restarting on next request: {}", e);
                self.process = None;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_reported() {
        let mut opponent =
            UciProcessOpponent::new(PathBuf::from("/nonexistent/chess-engine-binary"), 0.1);
        let result = opponent.request_move(crate::game::rules::START_FEN, 5);
        assert!(matches!(result, Err(AiError::Spawn { .. })));
        assert!(opponent.process.is_none());
    }
}
