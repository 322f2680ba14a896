//! Testing utilities for the story engine.
//!
//! This module provides a scripted [`MockGateway`] for deterministic tests
//! without API calls. The mock records every request it receives so tests
//! can assert on the exact prompts that were sent.

use crate::gateway::{Gateway, GatewayError, GatewayRequest};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// A scripted reply or failure.
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Failure(String),
}

#[derive(Debug, Default)]
struct MockState {
    script: VecDeque<Scripted>,
    requests: Vec<GatewayRequest>,
}

/// A gateway that returns scripted replies in order.
///
/// Clones share the same script and request log, so a session built from a
/// clone is still observable from the original handle. When the script runs
/// dry the mock returns a fixed non-JSON line, which drives the fallback
/// path in components that decode JSON.
#[derive(Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text reply.
    pub fn push_reply(&self, text: impl Into<String>) -> &Self {
        self.lock().script.push_back(Scripted::Reply(text.into()));
        self
    }

    /// Queue a gateway failure.
    pub fn push_failure(&self, message: impl Into<String>) -> &Self {
        self.lock()
            .script
            .push_back(Scripted::Failure(message.into()));
        self
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.lock().requests.clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<GatewayRequest> {
        self.lock().requests.last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock gateway state poisoned")
    }
}

impl Gateway for MockGateway {
    fn complete(
        &self,
        request: GatewayRequest,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send {
        let state = self.state.clone();
        async move {
            let mut state = state.lock().expect("mock gateway state poisoned");
            state.requests.push(request);
            match state.script.pop_front() {
                Some(Scripted::Reply(text)) => Ok(text),
                Some(Scripted::Failure(message)) => {
                    Err(GatewayError::Claude(claude::Error::Network(message)))
                }
                None => Ok("The storyteller has no more scripted replies.".to_string()),
            }
        }
    }
}

/// A well-formed classification reply for tests.
pub fn sample_analysis_reply() -> String {
    r#"{
        "story_type": "friendship",
        "key_elements": ["Alice", "Bob the cat", "a sunny garden"],
        "target_age": "6-7",
        "emotional_tone": "happy"
    }"#
    .to_string()
}

/// A well-formed evaluation reply with the same score everywhere.
pub fn sample_evaluation_reply(score: u8) -> String {
    format!(
        r#"{{
        "scores": {{
            "age_appropriateness": {score},
            "story_structure": {score},
            "character_development": {score},
            "language_vocabulary": {score},
            "engagement": {score},
            "educational_value": {score}
        }},
        "average_score": {score}.0,
        "strengths": ["charming characters", "gentle pacing"],
        "areas_for_improvement": []
    }}"#
    )
}

/// A well-formed three-item suggestions reply.
pub fn sample_suggestions_reply() -> String {
    r#"{
        "suggestions": [
            "What if Bob could suddenly talk at midnight?",
            "Maybe the garden hides a tiny door!",
            "What if Alice found a glowing seed?"
        ]
    }"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replies_in_order() {
        let gateway = MockGateway::new();
        gateway.push_reply("first").push_reply("second");

        let reply = gateway
            .complete(GatewayRequest::new("one", 0.1))
            .await
            .unwrap();
        assert_eq!(reply, "first");

        let reply = gateway
            .complete(GatewayRequest::new("two", 0.7))
            .await
            .unwrap();
        assert_eq!(reply, "second");

        // Script exhausted: fixed default reply.
        let reply = gateway
            .complete(GatewayRequest::new("three", 0.7))
            .await
            .unwrap();
        assert!(reply.contains("no more scripted"));
    }

    #[tokio::test]
    async fn test_mock_records_requests_across_clones() {
        let gateway = MockGateway::new();
        gateway.push_reply("ok");

        let clone = gateway.clone();
        clone
            .complete(GatewayRequest::new("hello", 0.5))
            .await
            .unwrap();

        assert_eq!(gateway.request_count(), 1);
        let request = gateway.last_request().unwrap();
        assert_eq!(request.prompt, "hello");
        assert_eq!(request.temperature, 0.5);
    }

    #[tokio::test]
    async fn test_mock_scripted_failure() {
        let gateway = MockGateway::new();
        gateway.push_failure("connection reset");

        let result = gateway.complete(GatewayRequest::new("hi", 0.1)).await;
        assert!(result.is_err());
    }
}
