//! Upstream AI provider integrations
//!
//! Thin REST clients for the text-generation provider (Gemini) and the
//! avatar-video provider (HeyGen). Each client is built per invocation from a
//! freshly resolved API key and a shared connection pool.

pub mod gemini;
pub mod heygen;

pub use gemini::GeminiHttpClient;
pub use heygen::HeygenClient;
