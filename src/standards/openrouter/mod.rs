//! OpenRouter chat-completions standard.
//!
//! - wire types for chunks, complete responses and embeddings
//! - usage normalization and the usage accounting block
//! - finish reason mapping
//! - request building and response mapping
//! - the stream transformer

pub mod embedding;
pub mod errors;
pub mod finish_reason;
pub mod metadata;
pub mod settings;
pub mod streaming;
pub mod transformers;
pub mod types;
pub mod usage;

pub use errors::classify_http_error;
pub use finish_reason::map_finish_reason;
pub use settings::{
    Compatibility, LogprobsSetting, OpenRouterChatSettings, OpenRouterEmbeddingSettings,
    ReasoningSettings, UsageSettings,
};
pub use streaming::{OpenRouterStreamTransformer, StreamTransformOptions, transform_stream};
pub use usage::{OpenRouterUsageAccounting, normalize_usage};
