//! Bedtime story engine with an AI storyteller and judge.
//!
//! This crate provides:
//! - A gateway abstraction over the Claude API for prompt/reply round trips
//! - A storyteller that analyzes requests, selects a narrative arc, and
//!   generates or continues stories
//! - A judge that scores stories against a fixed rubric and produces
//!   revision suggestions
//! - A session type orchestrating the whole flow for an interactive client
//!
//! # Quick Start
//!
//! ```ignore
//! use bedtime_core::{ClaudeGateway, StorySession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = ClaudeGateway::from_env()?;
//!     let mut session = StorySession::new(gateway);
//!
//!     let story = session.begin("A story about a girl and her cat").await?;
//!     println!("{}", story.text);
//!
//!     let review = session.review().await?;
//!     println!("Average score: {}", review.evaluation.value().average_score);
//!     Ok(())
//! }
//! ```

mod decode;
pub mod gateway;
pub mod judge;
pub mod outcome;
pub mod session;
pub mod storyteller;
pub mod testing;

// Primary public API
pub use gateway::{ClaudeGateway, Gateway, GatewayError, GatewayRequest, DEFAULT_MAX_TOKENS};
pub use judge::{
    Dimension, DimensionScores, Evaluation, Judge, StoryReview, LOW_SCORE_THRESHOLD,
    SUGGESTION_COUNT,
};
pub use outcome::{FallbackCause, ModelOutcome};
pub use session::{SessionError, StorySession};
pub use storyteller::{
    story_arc, story_arc_for_label, EmotionalTone, GeneratedStory, StoryAnalysis, StoryType,
    Storyteller,
};
pub use testing::MockGateway;
