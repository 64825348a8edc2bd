//! Capability traits implemented by the OpenRouter models.

mod chat;
mod embedding;

pub use chat::ChatCapability;
pub use embedding::EmbeddingCapability;
