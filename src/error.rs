use std::io;

use thiserror::Error;

/// Failures the queue manager can surface. An `Io` failure leaves no
/// guarantee that the in-memory queue and the deck files still agree;
/// callers should treat the session as dead and start a fresh one.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("deck file unavailable: {0}")]
    Io(#[from] io::Error),

    #[error("no card at the front of the queue")]
    EmptyQueue,
}
