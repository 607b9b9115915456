use super::normalize::{normalize_avatar_list, normalize_video_result, normalize_video_status};
use super::types::GenerateVideoRequest;
use crate::config::ApiKey;
use crate::models::{Avatar, VideoResult, VideoStatus};
use crate::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// HeyGen REST client: one outbound call per method, no retries.
pub struct HeygenClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

impl HeygenClient {
    pub fn new_with_client(api_key: ApiKey, base_url: &str, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends the request and returns the JSON body of a successful response.
    ///
    /// A non-success status becomes [`Error::Upstream`] carrying that status
    /// and the raw body; an unparseable success body becomes
    /// [`Error::MalformedResponse`].
    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Value> {
        let response = request
            .header("X-Api-Key", self.api_key.expose())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send {} request to HeyGen: {}", action, e);
                e
            })?;

        let status = response.status();
        tracing::debug!("HeyGen {} response status: {}", action, status);

        if !status.is_success() {
            let error_text = response.text().await?;
            tracing::error!("HeyGen API {} error (status {}): {}", action, status, error_text);
            return Err(Error::Upstream {
                status: Some(status.as_u16()),
                message: format!("HeyGen API error: {} - {}", status.as_u16(), error_text),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse HeyGen {} response: {}\nBody: {}", action, e, body);
            Error::MalformedResponse {
                message: format!("Failed to parse HeyGen response: {}", e),
                received: Value::String(body),
            }
        })
    }

    pub async fn list_avatars(&self) -> Result<Vec<Avatar>> {
        tracing::info!("Fetching avatars from HeyGen API");

        let url = format!("{}/v2/avatars", self.base_url);
        let payload = self.send(self.client.get(url), "avatar listing").await?;

        let avatars = normalize_avatar_list(&payload)?;
        tracing::info!("Transformed {} avatars", avatars.len());
        Ok(avatars)
    }

    pub async fn generate_video(&self, request: &GenerateVideoRequest) -> Result<VideoResult> {
        let url = format!("{}/v2/video/generate", self.base_url);
        let payload = self
            .send(self.client.post(url).json(request), "video creation")
            .await?;

        Ok(normalize_video_result(&payload))
    }

    pub async fn video_status(&self, task_id: &str) -> Result<VideoStatus> {
        let url = format!("{}/v1/video_status.get", self.base_url);
        let payload = self
            .send(
                self.client.get(url).query(&[("video_id", task_id)]),
                "video status",
            )
            .await?;

        Ok(normalize_video_status(task_id, &payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StaticSecrets, HEYGEN_API_KEY};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client(server: &MockServer) -> HeygenClient {
        let secrets = StaticSecrets::new().with(HEYGEN_API_KEY, "hg-key");
        let key = ApiKey::resolve(&secrets, HEYGEN_API_KEY).unwrap();
        HeygenClient::new_with_client(key, &server.uri(), Client::new())
    }

    #[tokio::test]
    async fn test_list_avatars_sends_api_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/avatars"))
            .and(header("X-Api-Key", "hg-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "avatar_id": "a1", "avatar_name": "Anna" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let avatars = make_client(&server).list_avatars().await.unwrap();
        assert_eq!(avatars.len(), 1);
        assert_eq!(avatars[0].id, "a1");
    }

    #[tokio::test]
    async fn test_list_avatars_propagates_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/avatars"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let err = make_client(&server).list_avatars().await.unwrap_err();
        match err {
            Error::Upstream { status, message } => {
                assert_eq!(status, Some(401));
                assert_eq!(message, "HeyGen API error: 401 - invalid key");
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparseable_success_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/avatars"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = make_client(&server).list_avatars().await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_generate_video_posts_single_avatar_request() {
        let server = MockServer::start().await;
        let request = GenerateVideoRequest::single_avatar("a1", "v1", "Hello");

        Mock::given(method("POST"))
            .and(path("/v2/video/generate"))
            .and(body_json(&request))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": null,
                "data": { "video_id": "vid_1" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = make_client(&server).generate_video(&request).await.unwrap();
        assert_eq!(result.task_id.as_deref(), Some("vid_1"));
        assert_eq!(result.video_url, None);
        assert_eq!(result.status, "pending");
    }

    #[tokio::test]
    async fn test_video_status_queries_by_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/video_status.get"))
            .and(query_param("video_id", "vid_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 100,
                "data": { "status": "processing" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let status = make_client(&server).video_status("vid_1").await.unwrap();
        assert_eq!(status.status, "processing");
        assert_eq!(status.task_id, "vid_1");
    }
}
