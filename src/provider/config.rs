//! Per-model configuration shared by the chat and embedding models.

use crate::error::LlmError;
use crate::execution::http::{HttpHeaderBuilder, HttpTransport};
use crate::standards::openrouter::Compatibility;
use crate::utils::IdGenerator;
use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const CHAT_PROVIDER_ID: &str = "openrouter.chat";
pub const EMBEDDING_PROVIDER_ID: &str = "openrouter.embedding";

#[derive(Clone)]
pub struct OpenRouterConfig {
    /// `openrouter.chat` or `openrouter.embedding`; used in error messages
    /// and logs.
    pub provider: String,
    pub base_url: String,
    pub api_key: SecretString,
    /// Sent with every request (e.g. `HTTP-Referer`, `X-Title`).
    pub headers: HashMap<String, String>,
    pub transport: Arc<dyn HttpTransport>,
    pub compatibility: Compatibility,
    /// Merged into every body after model settings, before call options.
    pub extra_body: Option<Map<String, Value>>,
    pub id_generator: IdGenerator,
}

impl std::fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ds = f.debug_struct("OpenRouterConfig");
        ds.field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("compatibility", &self.compatibility)
            .field("header_names", &self.headers.keys().collect::<Vec<_>>());

        if !self.api_key.expose_secret().is_empty() {
            ds.field("has_api_key", &true);
        }
        if self.extra_body.is_some() {
            ds.field("has_extra_body", &true);
        }

        ds.finish_non_exhaustive()
    }
}

impl OpenRouterConfig {
    /// Same configuration under another provider id.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Auth and JSON content type, then configured headers, then call headers.
    pub fn request_headers(
        &self,
        call_headers: &HashMap<String, String>,
    ) -> Result<HeaderMap, LlmError> {
        Ok(HttpHeaderBuilder::new()
            .with_bearer_auth(self.api_key.expose_secret())?
            .with_json_content_type()
            .with_custom_headers(&self.headers)?
            .with_custom_headers(call_headers)?
            .build())
    }
}
