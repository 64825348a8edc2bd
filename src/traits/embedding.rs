use crate::error::LlmError;
use crate::types::{EmbedOptions, EmbedResult};
use async_trait::async_trait;

#[async_trait]
pub trait EmbeddingCapability: Send + Sync {
    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    async fn do_embed(&self, options: EmbedOptions) -> Result<EmbedResult, LlmError>;

    async fn embed(&self, values: Vec<String>) -> Result<EmbedResult, LlmError> {
        self.do_embed(EmbedOptions::new(values)).await
    }
}
