use super::{FunctionInvoker, HookCore, Notifier};
use crate::ai::gemini::extract_text;
use crate::functions::TEXT_GENERATION;
use crate::models::{GenerationRequest, DEFAULT_MAX_TOKENS};
use std::sync::Arc;

/// Drives `text-generation` for the strategy and script pages.
pub struct TextGenerationHook {
    core: HookCore,
    max_tokens: u32,
}

impl TextGenerationHook {
    pub fn new(invoker: Arc<dyn FunctionInvoker>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            core: HookCore::new(invoker, notifier),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn is_loading(&self) -> bool {
        self.core.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.core.error()
    }

    /// Generates text for `prompt`, returning the first candidate's text
    /// (empty when the payload has none) or `None` on failure.
    pub async fn process_with_gemini(&self, prompt: &str, topic: Option<&str>) -> Option<String> {
        let _loading = self.core.begin();

        let request = GenerationRequest {
            prompt: prompt.to_string(),
            topic: topic.map(str::to_string),
            max_tokens: Some(self.max_tokens),
        };

        let result = match serde_json::to_value(&request) {
            Ok(body) => self.core.call(TEXT_GENERATION, body).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(data) => Some(extract_text(&data)),
            Err(e) => {
                self.core
                    .fail(&e, "Error", "Failed to process with Gemini AI");
                None
            }
        }
    }
}
