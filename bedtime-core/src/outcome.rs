//! Outcome type for model calls that degrade to a fixed default.
//!
//! The analyzer, evaluator, and suggestion generator never fail their
//! callers; when the model call or the JSON decode goes wrong they
//! substitute a hardcoded value. [`ModelOutcome`] keeps that substitution
//! visible instead of silent, so the CLI can render a fallback indicator
//! and tests can distinguish a real result from a masked failure.

use crate::decode::DecodeError;
use crate::gateway::GatewayError;
use thiserror::Error;

/// Why a fallback value was substituted for a model result.
#[derive(Debug, Clone, Error)]
pub enum FallbackCause {
    #[error("model call failed: {0}")]
    Gateway(String),

    #[error("model reply was not the expected JSON shape: {0}")]
    Decode(String),
}

impl From<GatewayError> for FallbackCause {
    fn from(err: GatewayError) -> Self {
        FallbackCause::Gateway(err.to_string())
    }
}

impl From<DecodeError> for FallbackCause {
    fn from(err: DecodeError) -> Self {
        FallbackCause::Decode(err.to_string())
    }
}

/// A value produced by a model call, or a fixed default standing in for one.
#[derive(Debug, Clone)]
pub enum ModelOutcome<T> {
    /// The model reply parsed cleanly.
    Parsed(T),
    /// The call or decode failed; `value` is the hardcoded default.
    Fallback { value: T, cause: FallbackCause },
}

impl<T> ModelOutcome<T> {
    /// Wrap a default value with the failure that forced it.
    pub fn fallback(value: T, cause: impl Into<FallbackCause>) -> Self {
        ModelOutcome::Fallback {
            value,
            cause: cause.into(),
        }
    }

    /// The usable value, whichever way it was produced.
    pub fn value(&self) -> &T {
        match self {
            ModelOutcome::Parsed(value) => value,
            ModelOutcome::Fallback { value, .. } => value,
        }
    }

    /// Consume the outcome, discarding provenance.
    pub fn into_value(self) -> T {
        match self {
            ModelOutcome::Parsed(value) => value,
            ModelOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ModelOutcome::Fallback { .. })
    }

    /// The failure behind a fallback, if any.
    pub fn cause(&self) -> Option<&FallbackCause> {
        match self {
            ModelOutcome::Parsed(_) => None,
            ModelOutcome::Fallback { cause, .. } => Some(cause),
        }
    }
}
