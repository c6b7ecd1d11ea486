//! AI responder gateway trait.
//!
//! The responder is a black box that produces reply text for a prompt.
//! Readiness is modelled explicitly so the pipeline can attempt one lazy
//! initialization instead of failing every message while the backing
//! model is still warming up.

use async_trait::async_trait;

use super::error::ResponderError;

/// Gateway to the text-generation backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Responder: Send + Sync {
    /// Whether the backend is initialized and accepting prompts.
    async fn is_ready(&self) -> bool;

    /// Initialize the backend if it is not ready yet.
    async fn ensure_ready(&self) -> Result<(), ResponderError>;

    /// Generate reply text for a prompt. `Ok(None)` means the backend
    /// answered but produced no usable text.
    async fn reply(&self, prompt: &str) -> Result<Option<String>, ResponderError>;
}
