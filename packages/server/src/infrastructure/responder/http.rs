//! HTTP-backed Responder implementation.
//!
//! Talks to a text-generation service over two endpoints:
//! `GET {base}/health` for readiness and `POST {base}/generate` for
//! replies. The reply body is a typed struct, so there is no guessing
//! which key of an arbitrary payload carries the generated text.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Responder, ResponderError};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_length: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    text: Option<String>,
}

pub struct HttpResponder {
    client: reqwest::Client,
    base_url: String,
    max_reply_chars: usize,
    ready: AtomicBool,
}

impl HttpResponder {
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the generation service, without a
    ///   trailing slash (e.g. "http://127.0.0.1:8500")
    /// * `max_reply_chars` - Reply length bound forwarded to the service
    pub fn new(base_url: String, max_reply_chars: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_reply_chars,
            ready: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Responder for HttpResponder {
    async fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    async fn ensure_ready(&self) -> Result<(), ResponderError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ResponderError::InitFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResponderError::InitFailed(format!(
                "health check returned {}",
                response.status()
            )));
        }

        self.ready.store(true, Ordering::Release);
        tracing::info!("Responder backend at '{}' is ready", self.base_url);
        Ok(())
    }

    async fn reply(&self, prompt: &str) -> Result<Option<String>, ResponderError> {
        let url = format!("{}/generate", self.base_url);
        let request = GenerateRequest {
            prompt,
            max_length: self.max_reply_chars,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ResponderError::CallFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| ResponderError::CallFailed(e.to_string()))?;

        let reply: GenerateReply = response
            .json()
            .await
            .map_err(|e| ResponderError::CallFailed(e.to_string()))?;

        Ok(reply.text.filter(|text| !text.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_responder_starts_not_ready() {
        // given:
        let responder = HttpResponder::new("http://127.0.0.1:9".to_string(), 1000);

        // when / then:
        assert!(!responder.is_ready().await);
    }

    #[tokio::test]
    async fn test_ensure_ready_fails_when_backend_is_unreachable() {
        // given: port 9 (discard) refuses connections
        let responder = HttpResponder::new("http://127.0.0.1:9".to_string(), 1000);

        // when:
        let result = responder.ensure_ready().await;

        // then:
        assert!(matches!(result, Err(ResponderError::InitFailed(_))));
        assert!(!responder.is_ready().await);
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        // given / when:
        let responder = HttpResponder::new("http://127.0.0.1:8500/".to_string(), 1000);

        // then:
        assert_eq!(responder.base_url, "http://127.0.0.1:8500");
    }
}
