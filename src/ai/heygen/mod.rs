pub mod client;
pub mod normalize;
pub mod types;

pub use client::HeygenClient;
pub use normalize::{FieldResolver, DEFAULT_VOICE_ID, UNKNOWN_AVATAR_NAME};
pub use types::GenerateVideoRequest;
