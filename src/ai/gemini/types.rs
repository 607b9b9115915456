//! Gemini `generateContent` payload types.

use serde::{Deserialize, Serialize};

pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.8;
pub const TOP_K: u32 = 40;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-turn request with the fixed sampling parameters.
    pub fn single_turn(text: String, max_output_tokens: u32) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part { text: Some(text) }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens,
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
}

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Only text parts are produced or read here; other part kinds deserialize
/// with `text: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Lenient view of a `generateContent` response, every level optional.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Plain text of a raw provider payload, empty when any level is absent.
pub fn extract_text(payload: &serde_json::Value) -> String {
    GenerateContentResponse::deserialize(payload)
        .ok()
        .and_then(|response| response.first_text().map(str::to_string))
        .unwrap_or_default()
}
