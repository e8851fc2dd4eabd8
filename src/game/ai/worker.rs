//! Background AI worker
//!
//! Runs a [`MoveSuggester`] on its own thread. Requests go in over one channel; each
//! request carries a one-shot reply channel that comes back to the caller as a
//! [`PendingMove`], which can be polled without blocking.
//!
//! # Architecture
//!
//! ```text
//! front end --AiRequest--> worker thread --Result<String, AiError>--> PendingMove
//! ```
//!
//! Dropping a [`PendingMove`] abandons the request: the worker still finishes thinking but
//! its reply goes nowhere. Dropping the [`AiWorker`] closes the request channel and the
//! thread exits after its current request.

use super::{AiError, MoveSuggester};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

struct AiRequest {
    position: String,
    strength: u8,
    reply: Sender<Result<String, AiError>>,
}

/// Reply handle for one request
#[derive(Debug)]
pub struct PendingMove {
    position: String,
    reply: Receiver<Result<String, AiError>>,
}

impl PendingMove {
    /// Position the request was made for
    pub fn position(&self) -> &str {
        &self.position
    }

    /// Non-blocking poll: `None` while the opponent is still thinking
    pub fn try_take(&self) -> Option<Result<String, AiError>> {
        match self.reply.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AiError::Disconnected)),
        }
    }

    /// Block until the reply arrives or `timeout` passes
    ///
    /// # Errors
    ///
    /// The opponent's own error, [`AiError::NoReply`] on timeout, or
    /// [`AiError::Disconnected`] when the worker died.
    pub fn wait(self, timeout: Duration) -> Result<String, AiError> {
        match self.reply.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(AiError::NoReply {
                message: format!("no move within {:.1}s", timeout.as_secs_f32()),
            }),
            Err(RecvTimeoutError::Disconnected) => Err(AiError::Disconnected),
        }
    }
}

/// Owns the thread an opponent thinks on
pub struct AiWorker {
    name: String,
    requests: Option<Sender<AiRequest>>,
    handle: Option<JoinHandle<()>>,
}

impl AiWorker {
    /// Move `suggester` onto a new thread
    pub fn spawn(mut suggester: Box<dyn MoveSuggester>) -> Self {
        let name = suggester.name().to_string();
        let (requests, inbox) = unbounded::<AiRequest>();

        let handle = thread::Builder::new()
            .name(format!("ai-{name}"))
            .spawn(move || {
                while let Ok(request) = inbox.recv() {
                    let result = suggester.request_move(&request.position, request.strength);
                    if request.reply.send(result).is_err() {
                        debug!("[AI] Reply dropped, request was abandoned");
                    }
                }
                debug!("[AI] Worker shutting down");
            });

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!("[AI] Failed to spawn worker thread: {}", e);
                None
            }
        };
        info!("[AI] Worker started for '{}'", name);

        Self {
            name,
            requests: handle.is_some().then_some(requests),
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue a request for `position`
    ///
    /// # Errors
    ///
    /// [`AiError::Disconnected`] when the worker thread is not running.
    pub fn request(&self, position: &str, strength: u8) -> Result<PendingMove, AiError> {
        let requests = self.requests.as_ref().ok_or(AiError::Disconnected)?;
        let (reply, receiver) = bounded(1);
        requests
            .send(AiRequest {
                position: position.to_string(),
                strength,
                reply,
            })
            .map_err(|_| AiError::Disconnected)?;
        Ok(PendingMove {
            position: position.to_string(),
            reply: receiver,
        })
    }

    /// Close the request channel and wait for the thread to finish
    pub fn shutdown(mut self) {
        self.requests = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("[AI] Worker thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ai::RandomOpponent;
    use crate::game::rules::START_FEN;

    struct Silent;

    impl MoveSuggester for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn request_move(&mut self, _position: &str, _strength: u8) -> Result<String, AiError> {
            thread::sleep(Duration::from_millis(200));
            Err(AiError::NoReply {
                message: "silent".to_string(),
            })
        }
    }

    #[test]
    fn test_worker_returns_move() {
        let worker = AiWorker::spawn(Box::new(RandomOpponent::seeded(3)));
        let pending = worker.request(START_FEN, 0).unwrap();
        assert_eq!(pending.position(), START_FEN);
        let reply = pending.wait(Duration::from_secs(5)).unwrap();
        assert!(reply.len() == 4);
        worker.shutdown();
    }

    #[test]
    fn test_poll_before_reply_is_none() {
        let worker = AiWorker::spawn(Box::new(Silent));
        let pending = worker.request(START_FEN, 0).unwrap();
        assert!(pending.try_take().is_none());
        let result = pending.wait(Duration::from_secs(5));
        assert!(matches!(result, Err(AiError::NoReply { .. })));
    }

    #[test]
    fn test_abandoned_request_does_not_block_next() {
        let worker = AiWorker::spawn(Box::new(RandomOpponent::seeded(9)));
        drop(worker.request(START_FEN, 0).unwrap());
        let reply = worker
            .request(START_FEN, 0)
            .unwrap()
            .wait(Duration::from_secs(5));
        assert!(reply.is_ok());
    }
}
