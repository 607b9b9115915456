//! `video-status`: one lookup of a render started by `video-generation`.

use super::{parse_body, AppState};
use crate::models::{VideoStatus, VideoStatusRequest};
use crate::{Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

/// POST /functions/v1/video-status
pub async fn handle(State(state): State<AppState>, body: Bytes) -> Result<Json<VideoStatus>> {
    let heygen = state.heygen()?;

    let request: VideoStatusRequest = parse_body(&body)?;
    if request.task_id.is_empty() {
        return Err(Error::InvalidInput(
            "Missing required parameters: taskId".to_string(),
        ));
    }

    let status = heygen.video_status(&request.task_id).await?;
    tracing::info!("Video {} status: {}", status.task_id, status.status);
    Ok(Json(status))
}
