//! OpenRouter chat language model.

use super::config::OpenRouterConfig;
use crate::error::LlmError;
use crate::execution::http::{HttpTransportRequest, headermap_to_hashmap};
use crate::standards::openrouter::classify_http_error;
use crate::standards::openrouter::settings::OpenRouterChatSettings;
use crate::standards::openrouter::streaming::{StreamTransformOptions, transform_stream};
use crate::standards::openrouter::transformers::{
    ResponseContext, build_chat_request, into_stream_request, map_chat_response,
};
use crate::streaming::StreamResult;
use crate::traits::ChatCapability;
use crate::types::{CallOptions, GenerateResult, RequestInfo};
use async_trait::async_trait;
use serde_json::Value;

const CHAT_PATH: &str = "/chat/completions";

#[derive(Debug, Clone)]
pub struct OpenRouterChatLanguageModel {
    model_id: String,
    settings: OpenRouterChatSettings,
    config: OpenRouterConfig,
}

impl OpenRouterChatLanguageModel {
    pub fn new(
        model_id: impl Into<String>,
        settings: OpenRouterChatSettings,
        config: OpenRouterConfig,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            settings,
            config,
        }
    }

    pub fn settings(&self) -> &OpenRouterChatSettings {
        &self.settings
    }

    fn transport_request(
        &self,
        body: Value,
        options: &CallOptions,
    ) -> Result<HttpTransportRequest, LlmError> {
        Ok(HttpTransportRequest {
            url: self.config.url(CHAT_PATH),
            headers: self.config.request_headers(&options.headers)?,
            body,
        })
    }
}

#[async_trait]
impl ChatCapability for OpenRouterChatLanguageModel {
    fn provider(&self) -> &str {
        &self.config.provider
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn do_generate(&self, options: CallOptions) -> Result<GenerateResult, LlmError> {
        let args = build_chat_request(
            &self.model_id,
            &self.settings,
            &options,
            self.config.extra_body.as_ref(),
        )?;
        let body = Value::Object(args.body);
        let request = self.transport_request(body.clone(), &options)?;

        tracing::debug!(
            provider = %self.config.provider,
            model = %self.model_id,
            "dispatching chat request"
        );
        let response = self.config.transport.execute_json(request).await?;
        let headers = headermap_to_hashmap(&response.headers);
        let text = String::from_utf8_lossy(&response.body);

        if !(200..300).contains(&response.status) {
            return Err(classify_http_error(
                &self.config.provider,
                response.status,
                &text,
            ));
        }

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse chat response JSON: {e}"))
        })?;

        map_chat_response(
            json,
            ResponseContext {
                provider: &self.config.provider,
                id_generator: &self.config.id_generator,
                request_body: body,
                headers,
                warnings: args.warnings,
            },
        )
    }

    async fn do_stream(&self, options: CallOptions) -> Result<StreamResult, LlmError> {
        let args = build_chat_request(
            &self.model_id,
            &self.settings,
            &options,
            self.config.extra_body.as_ref(),
        )?;
        let body = Value::Object(into_stream_request(args.body, self.config.compatibility));
        let request = self.transport_request(body.clone(), &options)?;

        tracing::debug!(
            provider = %self.config.provider,
            model = %self.model_id,
            "dispatching chat stream request"
        );
        let response = self.config.transport.execute_stream(request).await?;
        let response_headers = headermap_to_hashmap(&response.headers);

        if !(200..300).contains(&response.status) {
            let bytes = response.body.collect_bytes().await?;
            return Err(classify_http_error(
                &self.config.provider,
                response.status,
                &String::from_utf8_lossy(&bytes),
            ));
        }

        let stream = transform_stream(
            response.body.into_stream(),
            args.warnings,
            StreamTransformOptions {
                include_raw_chunks: options.include_raw_chunks,
                id_generator: self.config.id_generator.clone(),
            },
            options.abort_signal.clone(),
        );

        Ok(StreamResult {
            stream,
            request: RequestInfo { body },
            response_headers,
        })
    }
}
