pub mod client;
pub mod types;

pub use client::GeminiHttpClient;
pub use types::{extract_text, GenerateContentRequest, GenerateContentResponse};

use crate::models::GenerationRequest;

/// Single text block sent upstream: `Topic: <topic>\n` prefix when a
/// non-empty topic is given, then the prompt.
pub fn compose_text(prompt: &str, topic: Option<&str>) -> String {
    match topic.filter(|t| !t.is_empty()) {
        Some(topic) => format!("Topic: {}\n{}", topic, prompt),
        None => prompt.to_string(),
    }
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        GenerateContentRequest::single_turn(
            compose_text(&request.prompt, request.topic.as_deref()),
            request.max_tokens(),
        )
    }
}
