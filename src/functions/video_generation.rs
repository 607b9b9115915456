//! `video-generation`: starts a single-avatar HeyGen render.

use super::{parse_body, AppState};
use crate::ai::heygen::GenerateVideoRequest;
use crate::models::{VideoRequest, VideoResult};
use crate::{Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

/// POST /functions/v1/video-generation
///
/// Success means the render was accepted: `videoUrl` is usually still null
/// and the caller re-queries `video-status` with `taskId`.
pub async fn handle(State(state): State<AppState>, body: Bytes) -> Result<Json<VideoResult>> {
    let heygen = state.heygen()?;

    let request: VideoRequest = parse_body(&body)?;
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(Error::InvalidInput(format!(
            "Missing required parameters: {}",
            missing.join(", ")
        )));
    }

    tracing::info!(
        "Creating video for avatar {} (script length {}, voice style {})",
        request.avatar_id,
        request.script_text.len(),
        request.voice_style()
    );

    let upstream = GenerateVideoRequest::single_avatar(
        &request.avatar_id,
        &request.voice_id,
        &request.script_text,
    );
    let result = heygen.generate_video(&upstream).await?;

    tracing::info!(
        "Video accepted (task {:?}, status {})",
        result.task_id,
        result.status
    );
    Ok(Json(result))
}
