//! Strict decoding of model-produced JSON.
//!
//! Models often wrap JSON in prose or markdown fences; `extract_json` pulls
//! the payload out before the typed decode. Any missing or mismatched field
//! is a `DecodeError`, never a partial value.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// A model reply failed to decode into the expected shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("{0}")]
    Invalid(String),
}

impl DecodeError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DecodeError::Invalid(message.into())
    }
}

/// Extract a JSON payload from an LLM reply, handling markdown fences.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    // Fenced block first: ```json ... ```
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        let content_start = after_fence.find('\n').map(|n| n + 1).unwrap_or(0);
        let content = &after_fence[content_start..];
        if let Some(end) = content.find("```") {
            return content[..end].trim();
        }
    }

    // Bare object { ... } embedded in prose
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start <= end {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

/// Decode a model reply into `T`, extracting the JSON payload first.
pub fn decode_json<T: DeserializeOwned>(reply: &str) -> Result<T, DecodeError> {
    serde_json::from_str(extract_json(reply)).map_err(|e| DecodeError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Shape {
        name: String,
        count: u8,
    }

    #[test]
    fn test_decode_bare_json() {
        let shape: Shape = decode_json(r#"{"name": "arc", "count": 5}"#).unwrap();
        assert_eq!(shape.count, 5);
    }

    #[test]
    fn test_decode_fenced_json() {
        let reply = "Here you go:\n```json\n{\"name\": \"arc\", \"count\": 5}\n```\nEnjoy!";
        let shape: Shape = decode_json(reply).unwrap();
        assert_eq!(shape.name, "arc");
    }

    #[test]
    fn test_decode_json_embedded_in_prose() {
        let reply = "Sure! {\"name\": \"arc\", \"count\": 3} Hope that helps.";
        let shape: Shape = decode_json(reply).unwrap();
        assert_eq!(shape.count, 3);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let result: Result<Shape, _> = decode_json(r#"{"name": "arc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_json_is_an_error() {
        let result: Result<Shape, _> = decode_json("Once upon a time there was no JSON.");
        assert!(result.is_err());
    }
}
