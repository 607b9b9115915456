//! Serverless-style functions behind the marketing dashboard
//!
//! Stateless proxies that forward dashboard requests to an AI text-generation
//! provider and an avatar-video provider, reshape the answers, and return
//! them with permissive CORS headers. The `hooks` module holds the client-side
//! wrappers the dashboard uses to call them.

pub mod ai;
pub mod config;
pub mod cors;
pub mod error;
pub mod functions;
pub mod hooks;
pub mod models;

pub use error::{Error, Result};
