//! The judge: rubric evaluation and revision suggestions.
//!
//! Evaluation scores a story across six fixed dimensions at a low
//! temperature. Suggestion generation branches on whether the evaluation
//! found weak spots (any dimension below [`LOW_SCORE_THRESHOLD`], or a
//! non-empty improvement list) and always yields exactly three
//! kid-friendly suggestions.

use crate::decode::{decode_json, DecodeError};
use crate::gateway::{Gateway, GatewayRequest};
use crate::outcome::ModelOutcome;
use serde::Deserialize;

/// Dimensions scoring strictly below this drive the improvement variant.
pub const LOW_SCORE_THRESHOLD: u8 = 8;
/// Every suggestion path yields exactly this many suggestions.
pub const SUGGESTION_COUNT: usize = 3;

const EVALUATION_TEMPERATURE: f32 = 0.1;
const SUGGESTION_TEMPERATURE: f32 = 0.7;

/// The six rubric dimensions, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    AgeAppropriateness,
    StoryStructure,
    CharacterDevelopment,
    LanguageVocabulary,
    Engagement,
    EducationalValue,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::AgeAppropriateness,
        Dimension::StoryStructure,
        Dimension::CharacterDevelopment,
        Dimension::LanguageVocabulary,
        Dimension::Engagement,
        Dimension::EducationalValue,
    ];

    /// JSON key in the model contract.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::AgeAppropriateness => "age_appropriateness",
            Dimension::StoryStructure => "story_structure",
            Dimension::CharacterDevelopment => "character_development",
            Dimension::LanguageVocabulary => "language_vocabulary",
            Dimension::Engagement => "engagement",
            Dimension::EducationalValue => "educational_value",
        }
    }

    /// Human-readable label for console display.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::AgeAppropriateness => "Age Appropriateness",
            Dimension::StoryStructure => "Story Structure",
            Dimension::CharacterDevelopment => "Character Development",
            Dimension::LanguageVocabulary => "Language & Vocabulary",
            Dimension::Engagement => "Engagement",
            Dimension::EducationalValue => "Educational Value",
        }
    }
}

/// Scores for the six fixed dimensions, each 1-10.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DimensionScores {
    pub age_appropriateness: u8,
    pub story_structure: u8,
    pub character_development: u8,
    pub language_vocabulary: u8,
    pub engagement: u8,
    pub educational_value: u8,
}

impl DimensionScores {
    /// The same score for every dimension.
    pub fn uniform(score: u8) -> Self {
        Self {
            age_appropriateness: score,
            story_structure: score,
            character_development: score,
            language_vocabulary: score,
            engagement: score,
            educational_value: score,
        }
    }

    pub fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::AgeAppropriateness => self.age_appropriateness,
            Dimension::StoryStructure => self.story_structure,
            Dimension::CharacterDevelopment => self.character_development,
            Dimension::LanguageVocabulary => self.language_vocabulary,
            Dimension::Engagement => self.engagement,
            Dimension::EducationalValue => self.educational_value,
        }
    }

    /// All (dimension, score) pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    /// Dimensions scoring strictly below the threshold.
    pub fn low_scores(&self, threshold: u8) -> Vec<(Dimension, u8)> {
        self.iter().filter(|(_, score)| *score < threshold).collect()
    }

    fn validate(&self) -> Result<(), DecodeError> {
        for (dimension, score) in self.iter() {
            if !(1..=10).contains(&score) {
                return Err(DecodeError::invalid(format!(
                    "score for {} out of range: {score}",
                    dimension.key()
                )));
            }
        }
        Ok(())
    }
}

/// A rubric evaluation of one story.
#[derive(Debug, Clone, Deserialize)]
pub struct Evaluation {
    pub scores: DimensionScores,
    pub average_score: f32,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
}

impl Evaluation {
    /// The fixed neutral evaluation substituted when scoring fails.
    pub fn fallback() -> Self {
        Self {
            scores: DimensionScores::uniform(7),
            average_score: 7.0,
            strengths: vec![
                "Good basic structure".to_string(),
                "Age-appropriate language".to_string(),
            ],
            areas_for_improvement: vec![
                "Could use more character development".to_string(),
                "Could be more engaging".to_string(),
            ],
        }
    }

    /// Dimensions below the fixed threshold.
    pub fn low_scores(&self) -> Vec<(Dimension, u8)> {
        self.scores.low_scores(LOW_SCORE_THRESHOLD)
    }

    fn decode(reply: &str) -> Result<Self, DecodeError> {
        let evaluation: Evaluation = decode_json(reply)?;
        evaluation.scores.validate()?;
        Ok(evaluation)
    }
}

/// Wire shape of the suggestions reply.
#[derive(Debug, Deserialize)]
struct RawSuggestions {
    suggestions: Vec<String>,
}

/// Evaluation and suggestions for one story, with fallback provenance.
#[derive(Debug, Clone)]
pub struct StoryReview {
    pub evaluation: ModelOutcome<Evaluation>,
    pub suggestions: ModelOutcome<Vec<String>>,
}

/// Evaluates stories and proposes revisions.
pub struct Judge<G: Gateway> {
    gateway: G,
}

impl<G: Gateway> Judge<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Score a story against the fixed rubric.
    ///
    /// Never fails: any gateway or decode failure yields the neutral
    /// fallback with the cause recorded.
    pub async fn evaluate(&self, story: &str) -> ModelOutcome<Evaluation> {
        let request = GatewayRequest::new(evaluation_prompt(story), EVALUATION_TEMPERATURE);
        match self.gateway.complete(request).await {
            Ok(reply) => match Evaluation::decode(&reply) {
                Ok(evaluation) => ModelOutcome::Parsed(evaluation),
                Err(e) => ModelOutcome::fallback(Evaluation::fallback(), e),
            },
            Err(e) => ModelOutcome::fallback(Evaluation::fallback(), e),
        }
    }

    /// Generate exactly three revision suggestions for a story.
    ///
    /// Picks the celebratory prompt when nothing scored low and the
    /// improvement list is empty; otherwise embeds the weak areas in the
    /// prompt. Every path, including fallback, yields three suggestions.
    pub async fn suggest(&self, story: &str, evaluation: &Evaluation) -> ModelOutcome<Vec<String>> {
        let low_scores = evaluation.low_scores();
        let prompt = if low_scores.is_empty() && evaluation.areas_for_improvement.is_empty() {
            celebration_prompt(story)
        } else {
            improvement_prompt(story, &low_scores, &evaluation.areas_for_improvement)
        };

        let request = GatewayRequest::new(prompt, SUGGESTION_TEMPERATURE);
        match self.gateway.complete(request).await {
            Ok(reply) => match decode_suggestions(&reply) {
                Ok(suggestions) => ModelOutcome::Parsed(suggestions),
                Err(e) => ModelOutcome::fallback(fallback_suggestions(), e),
            },
            Err(e) => ModelOutcome::fallback(fallback_suggestions(), e),
        }
    }

    /// Evaluate a story, then generate suggestions from that evaluation.
    pub async fn review(&self, story: &str) -> StoryReview {
        let evaluation = self.evaluate(story).await;
        let suggestions = self.suggest(story, evaluation.value()).await;
        StoryReview {
            evaluation,
            suggestions,
        }
    }
}

fn decode_suggestions(reply: &str) -> Result<Vec<String>, DecodeError> {
    let raw: RawSuggestions = decode_json(reply)?;
    if raw.suggestions.len() != SUGGESTION_COUNT {
        return Err(DecodeError::invalid(format!(
            "expected {SUGGESTION_COUNT} suggestions, got {}",
            raw.suggestions.len()
        )));
    }
    Ok(raw.suggestions)
}

/// The fixed suggestions substituted when generation fails.
fn fallback_suggestions() -> Vec<String> {
    vec![
        "What if the story had a magical surprise at the end that no one expected?".to_string(),
        "Maybe they could discover a secret magical door that leads to even more adventures!"
            .to_string(),
        "What if they found a magical object that makes their friendship even stronger?"
            .to_string(),
    ]
}

fn evaluation_prompt(story: &str) -> String {
    format!(
        r#"As a children's literature expert, evaluate this story across these dimensions:
1. Age Appropriateness (1-10)
2. Story Structure (1-10)
3. Character Development (1-10)
4. Language & Vocabulary (1-10)
5. Engagement & Entertainment (1-10)
6. Educational Value (1-10)

Story:
{story}

Return in this JSON format:
{{
    "scores": {{
        "age_appropriateness": score,
        "story_structure": score,
        "character_development": score,
        "language_vocabulary": score,
        "engagement": score,
        "educational_value": score
    }},
    "average_score": average,
    "strengths": ["strength1", "strength2"],
    "areas_for_improvement": ["area1", "area2"]
}}"#
    )
}

fn celebration_prompt(story: &str) -> String {
    format!(
        r#"You are a friendly story wizard who helps make stories even more magical and fun for kids ages 5-10.

This is already a great story:
{story}

The story has high scores in all areas! Let's make it even more magical and exciting.
Generate 3 fun, kid-friendly suggestions to add extra magic and wonder to the story.
Each suggestion should:
- Be written in a playful, magical way that kids would love
- Add an extra layer of magic or fun to the story
- Be something that would make a kid say "Wow!" or "That's cool!"
- Be short and sweet - just the magical idea itself

For example:
"What if the story had a magical surprise at the end that no one expected?"

Return in this JSON format:
{{
    "suggestions": [
        "fun, magical suggestion"
    ]
}}"#
    )
}

fn improvement_prompt(
    story: &str,
    low_scores: &[(Dimension, u8)],
    improvement_areas: &[String],
) -> String {
    let low_scores_json = low_scores_as_json(low_scores);
    let areas_json = serde_json::to_string_pretty(improvement_areas)
        .unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"You are a friendly story wizard who helps make stories more magical and fun for kids ages 5-10.

Based on this story:
{story}

The story needs most improvement in these areas:
{low_scores_json}

Specific areas to improve:
{areas_json}

Generate 3 fun, kid-friendly suggestions that would help improve these specific areas.
Each suggestion should:
- Be written in a playful, magical way that kids would love
- Directly address one of the areas that needs improvement
- Be something that would make a kid say "Wow!" or "That's cool!"
- Be short and sweet - just the magical idea itself

For example, if "character development" needs improvement, instead of saying that directly, say something like:
"What if Bob the cat had a special magical power that only appears when he's helping others?"

Return in this JSON format:
{{
    "suggestions": [
        "fun, magical suggestion"
    ]
}}"#
    )
}

fn low_scores_as_json(low_scores: &[(Dimension, u8)]) -> String {
    let mut map = serde_json::Map::new();
    for (dimension, score) in low_scores {
        map.insert(
            dimension.key().to_string(),
            serde_json::Value::from(*score),
        );
    }
    serde_json::to_string_pretty(&serde_json::Value::Object(map))
        .unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores_with(dimension: Dimension, score: u8) -> DimensionScores {
        let mut scores = DimensionScores::uniform(9);
        match dimension {
            Dimension::AgeAppropriateness => scores.age_appropriateness = score,
            Dimension::StoryStructure => scores.story_structure = score,
            Dimension::CharacterDevelopment => scores.character_development = score,
            Dimension::LanguageVocabulary => scores.language_vocabulary = score,
            Dimension::Engagement => scores.engagement = score,
            Dimension::EducationalValue => scores.educational_value = score,
        }
        scores
    }

    #[test]
    fn test_low_scores_strictly_below_threshold() {
        let scores = scores_with(Dimension::Engagement, 7);
        let low = scores.low_scores(8);
        assert_eq!(low, vec![(Dimension::Engagement, 7)]);

        // A score exactly at the threshold is not low.
        let scores = scores_with(Dimension::Engagement, 8);
        assert!(scores.low_scores(8).is_empty());
    }

    #[test]
    fn test_fallback_evaluation_shape() {
        let fallback = Evaluation::fallback();
        assert_eq!(fallback.scores, DimensionScores::uniform(7));
        assert_eq!(fallback.average_score, 7.0);
        assert_eq!(fallback.strengths.len(), 2);
        assert_eq!(fallback.areas_for_improvement.len(), 2);
        assert_eq!(fallback.scores.iter().count(), 6);
    }

    #[test]
    fn test_decode_evaluation() {
        let reply = r#"{
            "scores": {
                "age_appropriateness": 9,
                "story_structure": 8,
                "character_development": 6,
                "language_vocabulary": 9,
                "engagement": 7,
                "educational_value": 8
            },
            "average_score": 7.8,
            "strengths": ["vivid imagery"],
            "areas_for_improvement": ["more dialogue"]
        }"#;

        let evaluation = Evaluation::decode(reply).unwrap();
        assert_eq!(evaluation.scores.character_development, 6);
        assert_eq!(
            evaluation.low_scores(),
            vec![
                (Dimension::CharacterDevelopment, 6),
                (Dimension::Engagement, 7)
            ]
        );
    }

    #[test]
    fn test_decode_rejects_out_of_range_score() {
        let reply = r#"{
            "scores": {
                "age_appropriateness": 11,
                "story_structure": 8,
                "character_development": 8,
                "language_vocabulary": 8,
                "engagement": 8,
                "educational_value": 8
            },
            "average_score": 8.5,
            "strengths": [],
            "areas_for_improvement": []
        }"#;

        assert!(Evaluation::decode(reply).is_err());
    }

    #[test]
    fn test_decode_rejects_missing_dimension() {
        let reply = r#"{
            "scores": {
                "age_appropriateness": 8,
                "story_structure": 8
            },
            "average_score": 8.0,
            "strengths": [],
            "areas_for_improvement": []
        }"#;

        assert!(Evaluation::decode(reply).is_err());
    }

    #[test]
    fn test_decode_suggestions_requires_exactly_three() {
        let three = r#"{"suggestions": ["a", "b", "c"]}"#;
        assert_eq!(decode_suggestions(three).unwrap().len(), 3);

        let two = r#"{"suggestions": ["a", "b"]}"#;
        assert!(decode_suggestions(two).is_err());

        let four = r#"{"suggestions": ["a", "b", "c", "d"]}"#;
        assert!(decode_suggestions(four).is_err());
    }

    #[test]
    fn test_fallback_suggestions_count() {
        assert_eq!(fallback_suggestions().len(), SUGGESTION_COUNT);
    }

    #[test]
    fn test_improvement_prompt_embeds_only_low_dimensions() {
        let low = vec![(Dimension::CharacterDevelopment, 6)];
        let prompt = improvement_prompt("a story", &low, &["more dialogue".to_string()]);
        assert!(prompt.contains("\"character_development\": 6"));
        assert!(!prompt.contains("engagement"));
        assert!(prompt.contains("more dialogue"));
    }
}
