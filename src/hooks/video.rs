use super::{FunctionInvoker, HookCore, Notifier, Toast};
use crate::functions::{AVATAR_CATALOG, VIDEO_GENERATION, VIDEO_STATUS};
use crate::models::{Avatar, AvatarList, VideoRequest, VideoResult, VideoStatus, VideoStatusRequest};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

/// Drives the avatar-video functions for the UGC page.
pub struct VideoHook {
    core: HookCore,
    generated_video: Mutex<Option<String>>,
}

impl VideoHook {
    pub fn new(invoker: Arc<dyn FunctionInvoker>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            core: HookCore::new(invoker, notifier),
            generated_video: Mutex::new(None),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.core.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.core.error()
    }

    /// URL of the last video created through this hook, if it was ready.
    pub fn generated_video(&self) -> Option<String> {
        self.generated_video
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn call_typed<B: Serialize, T: DeserializeOwned>(&self, name: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let data = self.core.call(name, body).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Starts a render. A result with `video_url: None` is an accepted job
    /// that is still rendering.
    pub async fn create_video(&self, params: &VideoRequest) -> Option<VideoResult> {
        let _loading = self.core.begin();

        match self
            .call_typed::<_, VideoResult>(VIDEO_GENERATION, params)
            .await
        {
            Ok(result) => {
                *self
                    .generated_video
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = result.video_url.clone();

                let description = if result.video_url.is_some() {
                    "Your UGC video is ready to view"
                } else {
                    "Your UGC video is rendering; check its status shortly"
                };
                self.core
                    .notify(Toast::success("Video created successfully", description));
                Some(result)
            }
            Err(e) => {
                self.core
                    .fail(&e, "Video creation failed", "Failed to create video");
                None
            }
        }
    }

    pub async fn get_avatars(&self) -> Option<Vec<Avatar>> {
        let _loading = self.core.begin();

        let empty = Value::Object(Default::default());
        match self.call_typed::<_, AvatarList>(AVATAR_CATALOG, &empty).await {
            Ok(list) => {
                tracing::debug!("Avatars received: {}", list.avatars.len());
                Some(list.avatars)
            }
            Err(e) => {
                self.core
                    .fail(&e, "Failed to load avatars", "Failed to fetch avatars");
                None
            }
        }
    }

    /// Re-queries a render started by [`VideoHook::create_video`].
    pub async fn check_video_status(&self, task_id: &str) -> Option<VideoStatus> {
        let _loading = self.core.begin();

        let request = VideoStatusRequest {
            task_id: task_id.to_string(),
        };
        match self
            .call_typed::<_, VideoStatus>(VIDEO_STATUS, &request)
            .await
        {
            Ok(status) => {
                if let Some(url) = &status.video_url {
                    *self
                        .generated_video
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner) = Some(url.clone());
                }
                Some(status)
            }
            Err(e) => {
                self.core.fail(
                    &e,
                    "Failed to check video status",
                    "Failed to check video status",
                );
                None
            }
        }
    }
}
