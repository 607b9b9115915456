//! Mapping of loosely-typed HeyGen payloads onto fixed internal records.
//!
//! The provider's schema varies by avatar type, so each output field is
//! resolved from an ordered list of source keys. The first source holding a
//! non-empty value wins; the order is significant.

use crate::models::{Avatar, VideoResult, VideoStatus, PENDING_STATUS};
use crate::{Error, Result};
use serde_json::{Map, Value};

pub const UNKNOWN_AVATAR_NAME: &str = "Unknown Avatar";
pub const DEFAULT_VOICE_ID: &str = "en-US-SteffanNeural";

/// Ordered source keys for one output field, plus an optional literal used
/// when none of them is populated.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver {
    pub field: &'static str,
    pub sources: &'static [&'static str],
    pub fallback: Option<&'static str>,
}

impl FieldResolver {
    pub fn resolve(&self, record: &Map<String, Value>) -> Option<String> {
        self.sources
            .iter()
            .find_map(|key| populated(record.get(*key)))
            .or_else(|| self.fallback.map(str::to_string))
    }
}

pub const AVATAR_ID: FieldResolver = FieldResolver {
    field: "id",
    sources: &["avatar_id", "id"],
    fallback: None,
};

pub const AVATAR_NAME: FieldResolver = FieldResolver {
    field: "name",
    sources: &["avatar_name", "name"],
    fallback: Some(UNKNOWN_AVATAR_NAME),
};

pub const AVATAR_IMAGE_URL: FieldResolver = FieldResolver {
    field: "imageUrl",
    sources: &["preview_image_url", "image_url", "thumbnail_url"],
    fallback: Some(""),
};

pub const AVATAR_VOICE_ID: FieldResolver = FieldResolver {
    field: "voiceId",
    sources: &["default_voice_id", "voice_id"],
    fallback: Some(DEFAULT_VOICE_ID),
};

pub const VIDEO_URL: FieldResolver = FieldResolver {
    field: "videoUrl",
    sources: &["video_url"],
    fallback: None,
};

pub const VIDEO_TASK_ID: FieldResolver = FieldResolver {
    field: "taskId",
    sources: &["video_id", "id"],
    fallback: None,
};

pub const VIDEO_STATUS: FieldResolver = FieldResolver {
    field: "status",
    sources: &["status"],
    fallback: Some(PENDING_STATUS),
};

pub const THUMBNAIL_URL: FieldResolver = FieldResolver {
    field: "thumbnailUrl",
    sources: &["thumbnail_url"],
    fallback: None,
};

/// Non-empty strings and numbers count as populated.
fn populated(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Maps one upstream avatar record. Records without any id alias are unusable
/// downstream and yield `None`.
pub fn normalize_avatar(record: &Value) -> Option<Avatar> {
    let record = record.as_object()?;

    Some(Avatar {
        id: AVATAR_ID.resolve(record)?,
        name: AVATAR_NAME.resolve(record).unwrap_or_default(),
        image_url: AVATAR_IMAGE_URL.resolve(record).unwrap_or_default(),
        voice_id: AVATAR_VOICE_ID.resolve(record).unwrap_or_default(),
    })
}

/// Locates the avatar records: `data` itself when it is an array, otherwise
/// `data.avatars`.
fn avatar_records(payload: &Value) -> Option<&Vec<Value>> {
    match payload.get("data")? {
        Value::Array(records) => Some(records),
        Value::Object(data) => data.get("avatars")?.as_array(),
        _ => None,
    }
}

pub fn normalize_avatar_list(payload: &Value) -> Result<Vec<Avatar>> {
    let records = avatar_records(payload).ok_or_else(|| Error::MalformedResponse {
        message: "Unexpected response structure from HeyGen API".to_string(),
        received: payload.clone(),
    })?;

    tracing::debug!("Number of avatars received: {}", records.len());

    Ok(records
        .iter()
        .filter_map(|record| {
            let avatar = normalize_avatar(record);
            if avatar.is_none() {
                tracing::warn!(
                    "Skipping avatar record without an {}: {}",
                    AVATAR_ID.field,
                    record
                );
            }
            avatar
        })
        .collect())
}

fn data_object(payload: &Value) -> Map<String, Value> {
    payload
        .get("data")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Maps a video creation response. A missing `data` object is not an error:
/// the provider accepted the job and every field falls back.
pub fn normalize_video_result(payload: &Value) -> VideoResult {
    let data = data_object(payload);

    VideoResult {
        video_url: VIDEO_URL.resolve(&data),
        task_id: VIDEO_TASK_ID.resolve(&data),
        status: VIDEO_STATUS.resolve(&data).unwrap_or_default(),
    }
}

/// Maps a status lookup response for `task_id`.
pub fn normalize_video_status(task_id: &str, payload: &Value) -> VideoStatus {
    let data = data_object(payload);

    // `error` is a string on older renders and `{code, message, detail}` on newer ones.
    let failure_reason = match data.get("error") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Object(detail)) => populated(detail.get("message"))
            .or_else(|| populated(detail.get("detail")))
            .or_else(|| Some(Value::Object(detail.clone()).to_string())),
        _ => None,
    };

    VideoStatus {
        task_id: task_id.to_string(),
        status: VIDEO_STATUS.resolve(&data).unwrap_or_default(),
        video_url: VIDEO_URL.resolve(&data),
        thumbnail_url: THUMBNAIL_URL.resolve(&data),
        failure_reason,
    }
}
