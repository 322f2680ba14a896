//! StorySession - the primary public API for interactive story flow.
//!
//! Wraps the storyteller and judge behind one stateful interface holding
//! the current story text. The interactive client drives everything
//! through this type.

use crate::gateway::{Gateway, GatewayError};
use crate::judge::{Judge, StoryReview};
use crate::storyteller::{GeneratedStory, Storyteller};
use thiserror::Error;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("no active story")]
    NoStory,
}

/// An interactive bedtime story session.
///
/// Holds at most one story at a time. A new story replaces the old one
/// wholesale; a continuation appends to it after a blank-line separator.
pub struct StorySession<G: Gateway> {
    storyteller: Storyteller<G>,
    judge: Judge<G>,
    story: Option<String>,
}

impl<G: Gateway> StorySession<G> {
    /// Create a session sharing one gateway between storyteller and judge.
    pub fn new(gateway: G) -> Self {
        Self {
            storyteller: Storyteller::new(gateway.clone()),
            judge: Judge::new(gateway),
            story: None,
        }
    }

    /// Generate a fresh story from a request, replacing any current story.
    pub async fn begin(&mut self, request: &str) -> Result<GeneratedStory, SessionError> {
        let generated = self.storyteller.generate(request).await?;
        self.story = Some(generated.text.clone());
        Ok(generated)
    }

    /// Continue the current story, appending after a blank line.
    ///
    /// Returns only the newly generated text; the stored story grows in
    /// place and its existing prefix is never rewritten.
    pub async fn continue_story(&mut self) -> Result<String, SessionError> {
        let Some(story) = self.story.as_mut() else {
            return Err(SessionError::NoStory);
        };
        let continuation = self.storyteller.continue_story(story).await?;
        story.push_str("\n\n");
        story.push_str(&continuation);
        Ok(continuation)
    }

    /// Evaluate the current story and generate suggestions.
    pub async fn review(&self) -> Result<StoryReview, SessionError> {
        let story = self.story.as_deref().ok_or(SessionError::NoStory)?;
        Ok(self.judge.review(story).await)
    }

    /// Build a regeneration request embedding the current story and the
    /// chosen feedback. The next `begin` call with this request starts
    /// over from scratch rather than editing the existing prose.
    pub fn revision_request(&self, feedback: &str) -> Result<String, SessionError> {
        let story = self.story.as_deref().ok_or(SessionError::NoStory)?;
        Ok(format!(
            "Here is the original story: {story}\n\nPlease revise the story to address the following: {feedback}"
        ))
    }

    /// The current story text, if any.
    pub fn story(&self) -> Option<&str> {
        self.story.as_deref()
    }

    pub fn has_story(&self) -> bool {
        self.story.is_some()
    }

    /// Discard the current story.
    pub fn clear(&mut self) {
        self.story = None;
    }
}
