//! Gateway to the hosted language model.
//!
//! The storyteller and judge never talk to the Claude client directly; they
//! go through the [`Gateway`] trait so tests can inject a scripted mock and
//! capture the exact prompts that were sent.

use claude::{Claude, Message, Request};
use std::future::Future;
use thiserror::Error;

/// Default maximum output length for a single model call, in tokens.
pub const DEFAULT_MAX_TOKENS: usize = 3000;

/// Errors from a gateway round trip.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Claude API error: {0}")]
    Claude(#[from] claude::Error),

    #[error("model returned an empty reply")]
    EmptyReply,
}

/// One prompt/reply round trip to the model.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub prompt: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl GatewayRequest {
    /// Create a request with the default output limit.
    pub fn new(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A synchronous-in-spirit, one-call-at-a-time model gateway.
///
/// Implementations are `Clone` so the storyteller and judge can share one
/// underlying client. No retries, no timeouts beyond the client's own.
pub trait Gateway: Clone + Send + Sync {
    /// Send a prompt and return the model's plain text reply.
    fn complete(
        &self,
        request: GatewayRequest,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;
}

/// Gateway backed by the Claude Messages API.
#[derive(Clone)]
pub struct ClaudeGateway {
    client: Claude,
}

impl ClaudeGateway {
    /// Create a gateway with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Claude::new(api_key),
        }
    }

    /// Create a gateway from the ANTHROPIC_API_KEY environment variable.
    ///
    /// The key is read once here, not on every call.
    pub fn from_env() -> Result<Self, GatewayError> {
        Ok(Self {
            client: Claude::from_env()?,
        })
    }

}

/// Reject blank replies so callers never treat whitespace as a story.
fn non_empty(text: String) -> Result<String, GatewayError> {
    if text.trim().is_empty() {
        return Err(GatewayError::EmptyReply);
    }
    Ok(text)
}

impl Gateway for ClaudeGateway {
    fn complete(
        &self,
        request: GatewayRequest,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send {
        async move {
            let api_request = Request::new(vec![Message::user(request.prompt)])
                .with_max_tokens(request.max_tokens)
                .with_temperature(request.temperature);

            let response = self.client.complete(api_request).await?;
            non_empty(response.text)
        }
    }
}
