//! The storyteller: request analysis, arc selection, story generation.
//!
//! Generation is a fixed pipeline: analyze the request into a typed
//! classification, look up the narrative arc for the analyzed story type,
//! then compose one large prompt with the writing guidelines and send it
//! at a creative temperature.

mod analysis;
mod template;

pub use analysis::{EmotionalTone, StoryAnalysis, StoryType};
pub use template::{story_arc, story_arc_for_label};

use crate::gateway::{Gateway, GatewayError, GatewayRequest};
use crate::outcome::ModelOutcome;

/// Temperature for the classification call. Low: favor consistency.
pub const ANALYSIS_TEMPERATURE: f32 = 0.1;
/// Temperature for story generation and continuation. High: favor variety.
pub const STORY_TEMPERATURE: f32 = 0.7;

/// A freshly generated story plus the analysis that shaped it.
#[derive(Debug, Clone)]
pub struct GeneratedStory {
    /// Raw story text from the model. Length and content are not verified;
    /// the 250-300 word constraint is trusted to the prompt.
    pub text: String,
    /// The classification used to build the prompt. A fallback here means
    /// the story was generated from the default analysis.
    pub analysis: ModelOutcome<StoryAnalysis>,
}

/// Generates bedtime stories for ages 5-10.
pub struct Storyteller<G: Gateway> {
    gateway: G,
}

impl<G: Gateway> Storyteller<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Classify a story request into type, elements, age range, and tone.
    ///
    /// Never fails: a gateway or decode failure yields the default analysis
    /// with the cause recorded.
    pub async fn analyze(&self, request: &str) -> ModelOutcome<StoryAnalysis> {
        let gateway_request = GatewayRequest::new(analysis_prompt(request), ANALYSIS_TEMPERATURE);
        match self.gateway.complete(gateway_request).await {
            Ok(reply) => match StoryAnalysis::decode(&reply) {
                Ok(analysis) => ModelOutcome::Parsed(analysis),
                Err(e) => ModelOutcome::fallback(StoryAnalysis::fallback(), e),
            },
            Err(e) => ModelOutcome::fallback(StoryAnalysis::fallback(), e),
        }
    }

    /// Generate a complete story for the given request.
    ///
    /// Gateway failures on the generation call itself propagate; only the
    /// analysis step degrades to a default.
    pub async fn generate(&self, request: &str) -> Result<GeneratedStory, GatewayError> {
        let analysis = self.analyze(request).await;
        let prompt = story_prompt(request, analysis.value());
        let text = self
            .gateway
            .complete(GatewayRequest::new(prompt, STORY_TEMPERATURE))
            .await?;
        Ok(GeneratedStory { text, analysis })
    }

    /// Generate a 2-3 paragraph continuation of an existing story.
    ///
    /// Each call only sees the story text passed in; the caller owns
    /// concatenation.
    pub async fn continue_story(&self, story: &str) -> Result<String, GatewayError> {
        self.gateway
            .complete(GatewayRequest::new(
                continuation_prompt(story),
                STORY_TEMPERATURE,
            ))
            .await
    }
}

fn analysis_prompt(request: &str) -> String {
    format!(
        r#"Analyze this story request and return a JSON with the following:
- story_type: one of [adventure, friendship, learning, fantasy, mystery]
- key_elements: list of main characters, setting, and plot elements
- target_age: specific age range within 5-10
- emotional_tone: one of [happy, exciting, calming, mysterious, educational]

Story request: {request}

Return in this JSON format:
{{
    "story_type": "type",
    "key_elements": ["element1", "element2"],
    "target_age": "age_range",
    "emotional_tone": "tone"
}}"#
    )
}

fn story_prompt(request: &str, analysis: &StoryAnalysis) -> String {
    format!(
        r#"You are a master children's storyteller writing a bedtime story for ages {age}.
Your story should have a {tone} tone and be a {story_type} story.

Story Elements to Include:
{elements}

{arc}

Writing Guidelines:
- Use age-appropriate vocabulary and sentence structure
- Include sensory details (sights, sounds, smells) to make the story come alive
- Add dialogue to make characters more engaging
- Include repetition and rhythm for younger readers
- Keep the story between 250-300 words
- End with a clear moral or lesson that's relevant to the story

Original Request: {request}

Now, write the story following these guidelines and structure."#,
        age = analysis.target_age,
        tone = analysis.emotional_tone,
        story_type = analysis.story_type,
        elements = analysis.key_elements.join(", "),
        arc = story_arc(analysis.story_type),
    )
}

fn continuation_prompt(story: &str) -> String {
    format!(
        r#"You are a master children's storyteller continuing a bedtime story for ages 5-10.

Here is the story so far:
{story}

Continue the story in a way that:
- Maintains the same characters and setting
- Keeps the same magical and playful tone
- Adds a new exciting element or adventure
- Keeps the story age-appropriate
- Ends with a satisfying conclusion

Write 2-3 paragraphs that continue the story naturally."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_analysis() -> StoryAnalysis {
        StoryAnalysis {
            story_type: StoryType::Mystery,
            key_elements: vec!["Alice".to_string(), "Bob the cat".to_string()],
            target_age: "6-7".to_string(),
            emotional_tone: EmotionalTone::Mysterious,
        }
    }

    #[test]
    fn test_analysis_prompt_embeds_request() {
        let prompt = analysis_prompt("A story about a brave snail");
        assert!(prompt.contains("A story about a brave snail"));
        assert!(prompt.contains("story_type"));
        assert!(prompt.contains("[adventure, friendship, learning, fantasy, mystery]"));
    }

    #[test]
    fn test_story_prompt_composition() {
        let prompt = story_prompt("Alice and her cat", &sample_analysis());
        assert!(prompt.contains("for ages 6-7"));
        assert!(prompt.contains("a mysterious tone"));
        assert!(prompt.contains("a mystery story"));
        assert!(prompt.contains("Alice, Bob the cat"));
        assert!(prompt.contains(story_arc(StoryType::Mystery)));
        assert!(prompt.contains("between 250-300 words"));
        assert!(prompt.contains("Original Request: Alice and her cat"));
    }

    #[test]
    fn test_continuation_prompt_embeds_story() {
        let prompt = continuation_prompt("Once upon a time, the end.");
        assert!(prompt.contains("Once upon a time, the end."));
        assert!(prompt.contains("2-3 paragraphs"));
    }
}
