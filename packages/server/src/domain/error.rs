//! Domain error types.

use thiserror::Error;

/// Validation failure for a value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("value is empty")]
    Empty,
    #[error("value exceeds {0} characters")]
    TooLong(usize),
}

/// Failure reported by the turn persistence gateway.
#[derive(Debug, Error)]
pub enum TurnStoreError {
    #[error("storage rejected the turn: {0}")]
    WriteFailed(String),
    #[error("no transcript for room '{0}'")]
    UnknownRoom(String),
    /// The storage collaborator refused the write for a room/user mismatch.
    #[error("not authorized: {0}")]
    Denied(String),
}

/// Failure reported by the AI responder gateway.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("responder initialization failed: {0}")]
    InitFailed(String),
    #[error("responder call failed: {0}")]
    CallFailed(String),
}

/// Failure pushing an event to a single connection.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),
    #[error("failed to push to connection: {0}")]
    PushFailed(String),
}
