//! `avatar-catalog`: lists HeyGen avatars in the normalized shape.

use super::AppState;
use crate::models::AvatarList;
use crate::Result;
use axum::extract::State;
use axum::Json;

/// POST /functions/v1/avatar-catalog
///
/// Takes no input; any request body is ignored.
pub async fn handle(State(state): State<AppState>) -> Result<Json<AvatarList>> {
    let heygen = state.heygen()?;
    let avatars = heygen.list_avatars().await?;
    Ok(Json(AvatarList { avatars }))
}
