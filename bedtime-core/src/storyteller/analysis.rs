//! Typed classification of a story request.

use crate::decode::{decode_json, DecodeError};
use serde::Deserialize;
use std::fmt;

/// The five known story types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryType {
    Adventure,
    Friendship,
    Learning,
    Fantasy,
    Mystery,
}

impl StoryType {
    /// Parse a model-produced label. Total: anything unrecognized, including
    /// the empty string, maps to `Adventure`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "friendship" => StoryType::Friendship,
            "learning" => StoryType::Learning,
            "fantasy" => StoryType::Fantasy,
            "mystery" => StoryType::Mystery,
            _ => StoryType::Adventure,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StoryType::Adventure => "adventure",
            StoryType::Friendship => "friendship",
            StoryType::Learning => "learning",
            StoryType::Fantasy => "fantasy",
            StoryType::Mystery => "mystery",
        }
    }
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five known emotional tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionalTone {
    Happy,
    Exciting,
    Calming,
    Mysterious,
    Educational,
}

impl EmotionalTone {
    /// Parse a model-produced label, defaulting to `Happy`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "exciting" => EmotionalTone::Exciting,
            "calming" => EmotionalTone::Calming,
            "mysterious" => EmotionalTone::Mysterious,
            "educational" => EmotionalTone::Educational,
            _ => EmotionalTone::Happy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmotionalTone::Happy => "happy",
            EmotionalTone::Exciting => "exciting",
            EmotionalTone::Calming => "calming",
            EmotionalTone::Mysterious => "mysterious",
            EmotionalTone::Educational => "educational",
        }
    }
}

impl fmt::Display for EmotionalTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wire shape of the classification reply. Structure is strict (all four
/// keys required); enum labels are tolerated and defaulted on conversion.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    story_type: String,
    key_elements: Vec<String>,
    target_age: String,
    emotional_tone: String,
}

/// Classification of a story request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryAnalysis {
    pub story_type: StoryType,
    /// Main characters, setting, and plot elements, in reply order.
    pub key_elements: Vec<String>,
    /// Age range within 5-10, e.g. "7-8".
    pub target_age: String,
    pub emotional_tone: EmotionalTone,
}

impl StoryAnalysis {
    /// The fixed default substituted when classification fails.
    pub fn fallback() -> Self {
        Self {
            story_type: StoryType::Adventure,
            key_elements: vec!["main character".to_string(), "magical element".to_string()],
            target_age: "7-8".to_string(),
            emotional_tone: EmotionalTone::Happy,
        }
    }

    pub(crate) fn decode(reply: &str) -> Result<Self, DecodeError> {
        let raw: RawAnalysis = decode_json(reply)?;
        Ok(Self {
            story_type: StoryType::from_label(&raw.story_type),
            key_elements: raw.key_elements,
            target_age: raw.target_age,
            emotional_tone: EmotionalTone::from_label(&raw.emotional_tone),
        })
    }
}
