//! Background execution of encode/decode work
//!
//! Argon2 key derivation is slow. [`CryptoWorker`] runs each request on its
//! own thread and hands back a [`PendingText`]. Each request owns its input
//! and its result. The ledger stores encrypted documents through the
//! blocking [`TextEncoder`] form; callers that need to stay responsive
//! can use `spawn_encode` / `spawn_decode` directly.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

use super::encoder::TextEncoder;

/// Runs an encoder's work off the calling thread
#[derive(Clone)]
pub struct CryptoWorker {
    encoder: Arc<dyn TextEncoder>,
}

/// A request submitted to a [`CryptoWorker`]
pub struct PendingText {
    handle: JoinHandle<LedgerResult<String>>,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Encode,
    Decode,
}

impl CryptoWorker {
    /// Create a worker around an encoder
    pub fn new(encoder: impl TextEncoder + 'static) -> Self {
        Self {
            encoder: Arc::new(encoder),
        }
    }

    /// Start encoding `text` in the background
    pub fn spawn_encode(&self, text: String) -> PendingText {
        self.spawn(Action::Encode, text)
    }

    /// Start decoding `data` in the background
    pub fn spawn_decode(&self, data: String) -> PendingText {
        self.spawn(Action::Decode, data)
    }

    fn spawn(&self, action: Action, input: String) -> PendingText {
        let encoder = Arc::clone(&self.encoder);
        debug!(?action, len = input.len(), "spawning crypto worker");

        let handle = thread::spawn(move || match action {
            Action::Encode => encoder.encode(&input),
            Action::Decode => encoder.decode(&input),
        });

        PendingText { handle }
    }
}

impl PendingText {
    /// Whether the worker has produced its result
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the worker finishes and return its result
    pub fn wait(self) -> LedgerResult<String> {
        self.handle
            .join()
            .map_err(|_| LedgerError::Storage("Crypto worker panicked".to_string()))?
    }
}

/// The blocking form: submit and wait
impl TextEncoder for CryptoWorker {
    fn encode(&self, text: &str) -> LedgerResult<String> {
        self.spawn_encode(text.to_string()).wait()
    }

    fn decode(&self, data: &str) -> LedgerResult<String> {
        self.spawn_decode(data.to_string()).wait()
    }
}
