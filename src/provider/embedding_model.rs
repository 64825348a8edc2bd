//! OpenRouter embedding model.

use super::config::OpenRouterConfig;
use crate::error::LlmError;
use crate::execution::http::{HttpTransportRequest, headermap_to_hashmap};
use crate::standards::openrouter::classify_http_error;
use crate::standards::openrouter::embedding::{build_embedding_request, map_embedding_response};
use crate::standards::openrouter::settings::OpenRouterEmbeddingSettings;
use crate::traits::EmbeddingCapability;
use crate::types::{EmbedOptions, EmbedResult};
use async_trait::async_trait;
use serde_json::Value;

const EMBEDDINGS_PATH: &str = "/embeddings";

#[derive(Debug, Clone)]
pub struct OpenRouterEmbeddingModel {
    model_id: String,
    settings: OpenRouterEmbeddingSettings,
    config: OpenRouterConfig,
}

impl OpenRouterEmbeddingModel {
    pub fn new(
        model_id: impl Into<String>,
        settings: OpenRouterEmbeddingSettings,
        config: OpenRouterConfig,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            settings,
            config,
        }
    }
}

#[async_trait]
impl EmbeddingCapability for OpenRouterEmbeddingModel {
    fn provider(&self) -> &str {
        &self.config.provider
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn do_embed(&self, options: EmbedOptions) -> Result<EmbedResult, LlmError> {
        let body = build_embedding_request(
            &self.model_id,
            &self.settings,
            &options,
            self.config.extra_body.as_ref(),
        )?;
        let request = HttpTransportRequest {
            url: self.config.url(EMBEDDINGS_PATH),
            headers: self.config.request_headers(&options.headers)?,
            body: Value::Object(body),
        };

        tracing::debug!(
            provider = %self.config.provider,
            model = %self.model_id,
            values = options.values.len(),
            "dispatching embedding request"
        );
        let response = self.config.transport.execute_json(request).await?;
        let text = String::from_utf8_lossy(&response.body);

        if !(200..300).contains(&response.status) {
            return Err(classify_http_error(
                &self.config.provider,
                response.status,
                &text,
            ));
        }

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse embedding response JSON: {e}"))
        })?;
        map_embedding_response(
            &self.config.provider,
            json,
            headermap_to_hashmap(&response.headers),
        )
    }
}
