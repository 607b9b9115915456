//! `text-generation`: forwards a prompt to Gemini and returns its raw payload.

use super::{parse_body, AppState};
use crate::ai::gemini::GenerateContentRequest;
use crate::models::GenerationRequest;
use crate::{Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

/// POST /functions/v1/text-generation
pub async fn handle(State(state): State<AppState>, body: Bytes) -> Result<Json<serde_json::Value>> {
    let gemini = state.gemini()?;

    let request: GenerationRequest = parse_body(&body)?;
    if request.prompt.is_empty() {
        return Err(Error::InvalidInput("Prompt is required".to_string()));
    }

    tracing::info!(
        "Generating text with {} (prompt length {}, max tokens {})",
        gemini.model(),
        request.prompt.len(),
        request.max_tokens()
    );

    let data = gemini
        .generate_content(&GenerateContentRequest::from(&request))
        .await?;

    Ok(Json(data))
}
