//! HeyGen request payloads.

use serde::Serialize;

pub const ASPECT_RATIO: &str = "16:9";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateVideoRequest {
    pub video_inputs: Vec<VideoInput>,
    pub aspect_ratio: String,
    pub test: bool,
}

impl GenerateVideoRequest {
    /// One avatar speaking `script` with one voice, 16:9, not a test render.
    pub fn single_avatar(avatar_id: &str, voice_id: &str, script: &str) -> Self {
        Self {
            video_inputs: vec![VideoInput {
                character: Character {
                    kind: "avatar".to_string(),
                    avatar_id: avatar_id.to_string(),
                },
                voice: VoiceInput {
                    kind: "text".to_string(),
                    input_text: script.to_string(),
                    voice_id: voice_id.to_string(),
                },
            }],
            aspect_ratio: ASPECT_RATIO.to_string(),
            test: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInput {
    pub character: Character,
    pub voice: VoiceInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Character {
    #[serde(rename = "type")]
    pub kind: String,
    pub avatar_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub input_text: String,
    pub voice_id: String,
}
