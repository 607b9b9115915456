//! Data models and structures
//!
//! Request and response bodies exchanged between the dashboard hooks and the
//! functions. All of them are request-scoped; nothing here is persisted.

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_VOICE_STYLE: &str = "casual";
pub const PENDING_STATUS: &str = "pending";

/// Reads an explicit `null` the same as an absent key.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a `text-generation` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }
}

/// Normalized avatar record returned by `avatar-catalog`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Avatar {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub voice_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvatarList {
    #[serde(default)]
    pub avatars: Vec<Avatar>,
}

/// Body of a `video-generation` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub script_text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub avatar_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub voice_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_style: Option<String>,
}

impl VideoRequest {
    pub fn voice_style(&self) -> &str {
        self.voice_style
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_VOICE_STYLE)
    }

    /// Names of the mandatory fields that are empty, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("scriptText", &self.script_text),
            ("avatarId", &self.avatar_id),
            ("voiceId", &self.voice_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Result of a `video-generation` call.
///
/// Synthesis is asynchronous upstream, so `video_url` is frequently `None`
/// right after creation. That means "accepted, not yet ready"; re-query with
/// `video-status` using `task_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    pub video_url: Option<String>,
    pub task_id: Option<String>,
    pub status: String,
}

/// Body of a `video-status` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatusRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub task_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub task_id: String,
    pub status: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Provider's reason for a failed render.
    pub failure_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_request_defaults() {
        let req: GenerationRequest = serde_json::from_str(r#"{"prompt":"hi"}"#).unwrap();
        assert_eq!(req.prompt, "hi");
        assert_eq!(req.topic, None);
        assert_eq!(req.max_tokens(), 1024);
    }

    #[test]
    fn test_generation_request_reads_camel_case() {
        let req: GenerationRequest =
            serde_json::from_str(r#"{"prompt":"hi","topic":"SEO","maxTokens":256}"#).unwrap();
        assert_eq!(req.topic.as_deref(), Some("SEO"));
        assert_eq!(req.max_tokens(), 256);
    }

    #[test]
    fn test_video_request_missing_fields() {
        let req: VideoRequest =
            serde_json::from_str(r#"{"scriptText":"Hello","voiceId":""}"#).unwrap();
        assert_eq!(req.missing_fields(), vec!["avatarId", "voiceId"]);
    }

    #[test]
    fn test_null_required_fields_read_as_missing() {
        let req: VideoRequest =
            serde_json::from_str(r#"{"scriptText":"Hello","avatarId":null,"voiceId":"v1"}"#)
                .unwrap();
        assert_eq!(req.missing_fields(), vec!["avatarId"]);

        let req: GenerationRequest = serde_json::from_str(r#"{"prompt":null}"#).unwrap();
        assert_eq!(req.prompt, "");

        let req: VideoStatusRequest = serde_json::from_str(r#"{"taskId":null}"#).unwrap();
        assert_eq!(req.task_id, "");
    }

    #[test]
    fn test_whitespace_is_not_missing() {
        let req = VideoRequest {
            script_text: " ".to_string(),
            avatar_id: "a1".to_string(),
            voice_id: "v1".to_string(),
            voice_style: None,
        };
        assert!(req.missing_fields().is_empty());
    }

    #[test]
    fn test_video_request_voice_style_default() {
        let req = VideoRequest::default();
        assert_eq!(req.voice_style(), "casual");

        let req = VideoRequest {
            voice_style: Some("energetic".to_string()),
            ..VideoRequest::default()
        };
        assert_eq!(req.voice_style(), "energetic");
    }

    #[test]
    fn test_video_result_serializes_nulls() {
        let result = VideoResult {
            video_url: None,
            task_id: Some("v1".to_string()),
            status: PENDING_STATUS.to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "videoUrl": null, "taskId": "v1", "status": "pending" })
        );
    }
}
