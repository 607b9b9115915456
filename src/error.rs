//! Error handling and custom error types
//!
//! Provides unified error handling across the functions using thiserror. Every
//! variant maps onto an HTTP status and renders as a JSON object with an
//! `error` string field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    InvalidInput(String),

    /// The provider answered with a non-success status or an in-body error.
    /// `status` is the provider's HTTP status when it should be propagated.
    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("{message}")]
    MalformedResponse {
        message: String,
        received: serde_json::Value,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Function invocation error: {0}")]
    Invocation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Wire shape of every failed function response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(rename = "receivedData", skip_serializing_if = "Option::is_none")]
    pub received_data: Option<serde_json::Value>,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Upstream {
                status: Some(status),
                ..
            } => StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let mut body = ErrorBody {
            error: self.to_string(),
            status: None,
            stack: None,
            received_data: None,
        };

        match self {
            Error::Upstream { status, .. } => body.status = *status,
            Error::MalformedResponse { received, .. } => body.received_data = Some(received.clone()),
            Error::Http(_) | Error::Serialization(_) | Error::Io(_) => {
                body.stack = source_chain(self)
            }
            Error::Configuration(_) | Error::InvalidInput(_) | Error::Invocation(_) => {}
        }

        body
    }
}

/// Joins the `source()` chain below `err`, one cause per line.
fn source_chain(err: &dyn std::error::Error) -> Option<String> {
    let mut causes = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }

    if causes.is_empty() {
        None
    } else {
        Some(causes.join("\n"))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Function failed ({}): {}", status, self);
        } else {
            tracing::warn!("Function rejected request ({}): {}", status, self);
        }
        (status, Json(self.to_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = Error::InvalidInput("Prompt is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_body().error, "Prompt is required");
    }

    #[test]
    fn test_upstream_status_is_propagated() {
        let err = Error::Upstream {
            status: Some(503),
            message: "HeyGen API error: 503 - busy".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let body = err.to_body();
        assert_eq!(body.status, Some(503));
        assert!(body.error.contains("busy"));
    }

    #[test]
    fn test_upstream_without_status_is_internal_error() {
        let err = Error::Upstream {
            status: None,
            message: "Gemini API error: quota".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_body().status, None);
    }

    #[test]
    fn test_malformed_response_embeds_payload() {
        let err = Error::MalformedResponse {
            message: "Unexpected response structure".to_string(),
            received: serde_json::json!({ "unexpected": true }),
        };
        let json = serde_json::to_value(err.to_body()).unwrap();
        assert_eq!(json["receivedData"]["unexpected"], true);
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_configuration_error_body_has_only_error_field() {
        let err = Error::Configuration("GEMINI_API_KEY is not configured".to_string());
        let json = serde_json::to_value(err.to_body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "error": "GEMINI_API_KEY is not configured" })
        );
    }
}
