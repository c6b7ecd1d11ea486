//! Use case error types and the wire-level error codes they map to.

use thiserror::Error;

/// Machine-readable codes attached to `error` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Rejected input; nothing was persisted.
    InvalidInput,
    /// Storage collaborator failure; a user turn may be left without a reply.
    SaveError,
    /// Responder was not initialized and lazy initialization failed.
    AiUnavailable,
    /// Responder call failed.
    AiError,
    /// Responder did not reply within the configured bound.
    AiTimeout,
    /// Room/user mismatch reported by a collaborator.
    Unauthorized,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::SaveError => "SAVE_ERROR",
            ErrorCode::AiUnavailable => "AI_UNAVAILABLE",
            ErrorCode::AiError => "AI_ERROR",
            ErrorCode::AiTimeout => "AI_TIMEOUT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
        }
    }
}

/// Terminal failure of the message pipeline for one message. Carries both
/// the machine-readable code and the human message broadcast to the room.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MessageFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl MessageFailure {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failure fetching a room transcript.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GetTranscriptError {
    #[error("room has no transcript")]
    RoomNotFound,
    #[error("storage failure: {0}")]
    StorageError(String),
}
