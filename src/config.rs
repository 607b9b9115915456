//! Provider configuration and secret resolution
//!
//! Non-secret provider settings are read once at startup. Provider API keys
//! are looked up through a [`SecretSource`] on every invocation, so a missing
//! key is a per-request failure rather than a startup crash.

use crate::{Error, Result};
use std::collections::HashMap;

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const HEYGEN_API_KEY: &str = "HEYGEN_API_KEY";

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_API_VERSION: &str = "v1";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_HEYGEN_BASE_URL: &str = "https://api.heygen.com";

/// Endpoints and model selection for the upstream providers.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub gemini_base_url: String,
    pub gemini_api_version: String,
    pub gemini_model: String,
    pub heygen_base_url: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_api_version: DEFAULT_GEMINI_API_VERSION.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            heygen_base_url: DEFAULT_HEYGEN_BASE_URL.to_string(),
        }
    }
}

impl ProviderSettings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or(defaults.gemini_base_url),
            gemini_api_version: std::env::var("GEMINI_API_VERSION")
                .unwrap_or(defaults.gemini_api_version),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            heygen_base_url: std::env::var("HEYGEN_BASE_URL")
                .unwrap_or(defaults.heygen_base_url),
        }
    }

    /// Settings that point both providers at a single base URL (mock servers).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            gemini_base_url: base_url.to_string(),
            heygen_base_url: base_url.to_string(),
            ..Self::default()
        }
    }
}

/// Where provider credentials come from.
pub trait SecretSource: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads secrets from the process environment at lookup time.
#[derive(Debug, Default, Clone)]
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed in-memory secrets.
#[derive(Debug, Default, Clone)]
pub struct StaticSecrets {
    values: HashMap<String, String>,
}

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }
}

impl SecretSource for StaticSecrets {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// A provider API key resolved for a single invocation.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Looks up `name`, treating unset and blank values alike.
    pub fn resolve(secrets: &dyn SecretSource, name: &str) -> Result<Self> {
        match secrets.get(name) {
            Some(value) if !value.trim().is_empty() => Ok(Self(value)),
            _ => Err(Error::Configuration(format!(
                "{} is not configured. Please set it in the environment variables.",
                name
            ))),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_present_key() {
        let secrets = StaticSecrets::new().with(GEMINI_API_KEY, "abc");
        let key = ApiKey::resolve(&secrets, GEMINI_API_KEY).unwrap();
        assert_eq!(key.expose(), "abc");
    }

    #[test]
    fn test_resolve_missing_key_names_variable() {
        let err = ApiKey::resolve(&StaticSecrets::new(), HEYGEN_API_KEY).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains(HEYGEN_API_KEY));
    }

    #[test]
    fn test_resolve_blank_key_is_missing() {
        let secrets = StaticSecrets::new().with(HEYGEN_API_KEY, "   ");
        assert!(ApiKey::resolve(&secrets, HEYGEN_API_KEY).is_err());
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let secrets = StaticSecrets::new().with(GEMINI_API_KEY, "super-secret");
        let key = ApiKey::resolve(&secrets, GEMINI_API_KEY).unwrap();
        assert!(!format!("{:?}", key).contains("super-secret"));
    }

    #[test]
    fn test_with_base_url_overrides_both_providers() {
        let settings = ProviderSettings::with_base_url("http://127.0.0.1:9999");
        assert_eq!(settings.gemini_base_url, "http://127.0.0.1:9999");
        assert_eq!(settings.heygen_base_url, "http://127.0.0.1:9999");
        assert_eq!(settings.gemini_model, "gemini-1.5-flash");
    }
}
