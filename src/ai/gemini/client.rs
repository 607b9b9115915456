use super::types::GenerateContentRequest;
use crate::config::ApiKey;
use crate::{Error, Result};
use reqwest::Client;

/// Lightweight Gemini REST client for `generateContent`.
pub struct GeminiHttpClient {
    client: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
    api_version: String,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-1.5-flash`);
    /// a leading `models/` path segment is stripped.
    pub fn new_with_client(
        api_key: ApiKey,
        model: &str,
        base_url: &str,
        api_version: &str,
        client: Client,
    ) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: api_version.to_string(),
        }
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, self.api_version, self.model
        )
    }

    /// Calls `generateContent` and returns the provider payload untouched.
    ///
    /// The body is parsed whatever the HTTP status; an `error` member in it
    /// becomes [`Error::Upstream`] carrying the provider's message.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<serde_json::Value> {
        tracing::debug!("Sending generateContent request to Gemini model {}", self.model);

        let response = self
            .client
            .post(self.generate_content_url())
            .header("x-goog-api-key", self.api_key.expose())
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        let status = response.status();
        let body = response.text().await?;
        let data: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            e
        })?;

        if let Some(error) = data.get("error").filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            tracing::error!("Gemini API error (status {}): {}", status, message);
            return Err(Error::Upstream {
                status: None,
                message: format!("Gemini API error: {}", message),
            });
        }

        if !status.is_success() {
            tracing::error!("Gemini API error (status {}): {}", status, body);
            return Err(Error::Upstream {
                status: None,
                message: format!("Gemini API error: {} - {}", status.as_u16(), body),
            });
        }

        Ok(data)
    }
}
