use crate::error::LlmError;
use crate::streaming::StreamResult;
use crate::types::{CallOptions, GenerateResult, Message};
use async_trait::async_trait;

#[async_trait]
pub trait ChatCapability: Send + Sync {
    /// Provider id, e.g. `openrouter.chat`.
    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    async fn do_generate(&self, options: CallOptions) -> Result<GenerateResult, LlmError>;

    async fn do_stream(&self, options: CallOptions) -> Result<StreamResult, LlmError>;

    /// Single user turn, text answer.
    async fn generate_text(&self, prompt: String) -> Result<String, LlmError> {
        let result = self
            .do_generate(CallOptions::new(vec![Message::user(prompt)]))
            .await?;
        Ok(result.text())
    }
}
