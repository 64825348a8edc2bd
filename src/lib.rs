//! openrouter-provider
//!
//! OpenRouter chat and embedding models with a normalized, provider-neutral
//! result and stream vocabulary.
#![deny(unsafe_code)]

pub mod error;
pub mod execution;
pub mod provider;
pub mod standards;
pub mod streaming;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::LlmError;
pub use provider::{OpenRouterBuilder, OpenRouterProvider};

/// Commonly used items.
pub mod prelude {
    pub use crate::error::LlmError;
    pub use crate::provider::{
        OpenRouterBuilder, OpenRouterChatLanguageModel, OpenRouterEmbeddingModel,
        OpenRouterProvider,
    };
    pub use crate::standards::openrouter::{
        Compatibility, OpenRouterChatSettings, OpenRouterEmbeddingSettings, ReasoningSettings,
    };
    pub use crate::streaming::{ChatStream, StreamPart, StreamResult};
    pub use crate::traits::{ChatCapability, EmbeddingCapability};
    pub use crate::types::{
        CallOptions, Content, EmbedOptions, EmbedResult, FinishReason, GenerateResult, Message,
        NormalizedUsage, Tool, ToolChoice,
    };
}
