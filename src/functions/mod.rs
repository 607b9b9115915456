//! HTTP function endpoints
//!
//! Each function is a stateless proxy: resolve credentials, validate the body,
//! make exactly one upstream call, reshape the answer. The CORS responder
//! wraps every route, including the fallbacks.

pub mod avatar_catalog;
pub mod health;
pub mod text_generation;
pub mod video_generation;
pub mod video_status;

use crate::ai::{GeminiHttpClient, HeygenClient};
use crate::config::{ApiKey, ProviderSettings, SecretSource, GEMINI_API_KEY, HEYGEN_API_KEY};
use crate::{cors, Error, Result};
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde::de::DeserializeOwned;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const TEXT_GENERATION: &str = "text-generation";
pub const AVATAR_CATALOG: &str = "avatar-catalog";
pub const VIDEO_GENERATION: &str = "video-generation";
pub const VIDEO_STATUS: &str = "video-status";

/// Route of a function by name.
pub fn function_path(name: &str) -> String {
    format!("/functions/v1/{}", name)
}

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub providers: Arc<ProviderSettings>,
    pub secrets: Arc<dyn SecretSource>,
}

impl AppState {
    pub fn new(providers: ProviderSettings, secrets: Arc<dyn SecretSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            providers: Arc::new(providers),
            secrets,
        }
    }

    /// Gemini client for one invocation; fails before any network traffic
    /// when the key is absent.
    pub fn gemini(&self) -> Result<GeminiHttpClient> {
        let key = ApiKey::resolve(self.secrets.as_ref(), GEMINI_API_KEY)?;
        Ok(GeminiHttpClient::new_with_client(
            key,
            &self.providers.gemini_model,
            &self.providers.gemini_base_url,
            &self.providers.gemini_api_version,
            self.http.clone(),
        ))
    }

    /// HeyGen client for one invocation.
    pub fn heygen(&self) -> Result<HeygenClient> {
        let key = ApiKey::resolve(self.secrets.as_ref(), HEYGEN_API_KEY)?;
        Ok(HeygenClient::new_with_client(
            key,
            &self.providers.heygen_base_url,
            self.http.clone(),
        ))
    }
}

/// Parses a JSON request body. An empty body reads as the default value so
/// that field validation, not the parser, reports what is missing.
pub(crate) fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| Error::InvalidInput(format!("Invalid JSON body: {}", e)))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Function not found" })),
    )
}

async fn method_not_allowed() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method not allowed" })),
    )
}

/// Build the router with all functions mounted.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(&function_path(TEXT_GENERATION), post(text_generation::handle))
        .route(&function_path(AVATAR_CATALOG), post(avatar_catalog::handle))
        .route(&function_path(VIDEO_GENERATION), post(video_generation::handle))
        .route(&function_path(VIDEO_STATUS), post(video_status::handle))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn(cors::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the functions until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving functions on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
