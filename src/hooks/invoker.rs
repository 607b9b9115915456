use super::FunctionInvoker;
use crate::functions::function_path;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Invokes functions over HTTP.
pub struct HttpFunctionInvoker {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpFunctionInvoker {
    pub fn new(base_url: &str) -> Self {
        Self::new_with_client(base_url, Client::new())
    }

    pub fn new_with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Sent as both `apikey` and bearer authorization on every call.
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }
}

#[async_trait]
impl FunctionInvoker for HttpFunctionInvoker {
    async fn invoke(&self, name: &str, body: Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, function_path(name));
        tracing::debug!("Invoking function {}", name);

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to invoke function {}: {}", name, e);
            Error::Invocation(e.to_string())
        })?;

        let status = response.status();
        let text = response.text().await?;
        let data: Value = serde_json::from_str(&text).unwrap_or(Value::String(text));

        if !status.is_success() {
            let message = data
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!("Function {} returned a non-2xx status code: {}", name, status)
                });
            tracing::error!("Function {} failed (status {}): {}", name, status, message);
            return Err(Error::Invocation(message));
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_invoke_posts_body_with_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/functions/v1/avatar-catalog"))
            .and(header("apikey", "anon"))
            .and(header("Authorization", "Bearer anon"))
            .and(body_json(serde_json::json!({})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "avatars": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let invoker = HttpFunctionInvoker::new(&server.uri()).with_api_key("anon".to_string());
        let data = invoker
            .invoke("avatar-catalog", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(data, serde_json::json!({ "avatars": [] }));
    }

    #[tokio::test]
    async fn test_non_2xx_uses_error_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "Prompt is required" })),
            )
            .mount(&server)
            .await;

        let invoker = HttpFunctionInvoker::new(&server.uri());
        let err = invoker
            .invoke("text-generation", serde_json::json!({}))
            .await
            .unwrap_err();
        match err {
            Error::Invocation(message) => assert_eq!(message, "Prompt is required"),
            other => panic!("Expected invocation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_2xx_without_error_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("gateway down"))
            .mount(&server)
            .await;

        let invoker = HttpFunctionInvoker::new(&server.uri());
        let err = invoker
            .invoke("video-generation", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("non-2xx"));
    }
}
