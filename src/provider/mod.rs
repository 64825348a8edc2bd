//! OpenRouter provider: builder, shared configuration and models.

mod builder;
mod chat_model;
mod config;
mod embedding_model;

pub use builder::{API_KEY_ENV, OpenRouterBuilder};
pub use chat_model::OpenRouterChatLanguageModel;
pub use config::{
    CHAT_PROVIDER_ID, DEFAULT_BASE_URL, EMBEDDING_PROVIDER_ID, OpenRouterConfig,
};
pub use embedding_model::OpenRouterEmbeddingModel;

use crate::standards::openrouter::{OpenRouterChatSettings, OpenRouterEmbeddingSettings};

/// Factory for chat and embedding models sharing one configuration.
#[derive(Debug, Clone)]
pub struct OpenRouterProvider {
    config: OpenRouterConfig,
}

impl OpenRouterProvider {
    pub fn builder() -> OpenRouterBuilder {
        OpenRouterBuilder::new()
    }

    pub fn from_config(config: OpenRouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    pub fn chat(&self, model_id: impl Into<String>) -> OpenRouterChatLanguageModel {
        self.chat_with_settings(model_id, OpenRouterChatSettings::default())
    }

    pub fn chat_with_settings(
        &self,
        model_id: impl Into<String>,
        settings: OpenRouterChatSettings,
    ) -> OpenRouterChatLanguageModel {
        OpenRouterChatLanguageModel::new(
            model_id,
            settings,
            self.config.clone().with_provider(CHAT_PROVIDER_ID),
        )
    }

    pub fn embedding(&self, model_id: impl Into<String>) -> OpenRouterEmbeddingModel {
        self.embedding_with_settings(model_id, OpenRouterEmbeddingSettings::default())
    }

    pub fn embedding_with_settings(
        &self,
        model_id: impl Into<String>,
        settings: OpenRouterEmbeddingSettings,
    ) -> OpenRouterEmbeddingModel {
        OpenRouterEmbeddingModel::new(
            model_id,
            settings,
            self.config.clone().with_provider(EMBEDDING_PROVIDER_ID),
        )
    }
}
