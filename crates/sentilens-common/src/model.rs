//! Wire types shared between the predictor client, the renderers, and the
//! report synthesizer. These mirror the predictor's JSON response shape.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall sentiment label as emitted by the predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
        }
    }
}

/// A recognized text span with its category label (PERSON, ORG, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub text: String,
    pub label: String,
}

/// Full analysis of one review, produced wholesale by the predictor.
/// Replaced (never merged) on each new analysis.
///
/// The mapping and string fields default to empty so a predictor that omits a
/// section still renders as "no data" instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// Polarity in [-1, 1].
    pub score: f64,
    /// Degree of opinion vs. fact, in [0, 1].
    pub subjectivity: f64,
    #[serde(default)]
    pub emotions: BTreeMap<String, f64>,
    #[serde(default)]
    pub entities: Vec<NamedEntity>,
    #[serde(default)]
    pub toxicity: BTreeMap<String, f64>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub translated_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the chat transcript. The transcript itself is an append-only
/// `Vec<ChatMessage>` owned by the web state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_predictor_payload_deserializes() {
        let json = r#"{
            "sentiment": "Positive",
            "score": 0.42,
            "subjectivity": 0.3,
            "emotions": {"joy": 0.8, "anger": 0.1},
            "entities": [{"text": "Flipkart", "label": "ORG"}],
            "toxicity": {"toxic": 0.05},
            "language": "en",
            "translated_text": ""
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.emotions["joy"], 0.8);
        assert_eq!(result.entities[0].label, "ORG");
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let json = r#"{"sentiment": "Neutral", "score": 0.0, "subjectivity": 0.5}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(result.emotions.is_empty());
        assert!(result.entities.is_empty());
        assert!(result.toxicity.is_empty());
        assert!(result.language.is_empty());
    }

    #[test]
    fn test_chat_role_serializes_lowercase() {
        let msg = ChatMessage::user("hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
