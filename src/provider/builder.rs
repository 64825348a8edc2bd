//! Fluent builder for [`OpenRouterProvider`].

use super::OpenRouterProvider;
use super::config::{CHAT_PROVIDER_ID, DEFAULT_BASE_URL, OpenRouterConfig};
use crate::error::LlmError;
use crate::execution::http::{HttpTransport, ReqwestTransport};
use crate::standards::openrouter::Compatibility;
use crate::utils::{IdGenerator, uuid_generator};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

#[derive(Clone, Default)]
pub struct OpenRouterBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn HttpTransport>>,
    compatibility: Compatibility,
    extra_body: Option<Map<String, Value>>,
    id_generator: Option<IdGenerator>,
}

impl OpenRouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Falls back to `OPENROUTER_API_KEY` when not set.
    pub fn api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Extra header sent with every request, e.g. `HTTP-Referer` or `X-Title`.
    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured client for the default transport. Ignored when a
    /// custom transport is set.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn compatibility(mut self, compatibility: Compatibility) -> Self {
        self.compatibility = compatibility;
        self
    }

    /// Merged into every request body, below call-level provider options.
    pub fn extra_body(mut self, extra: Map<String, Value>) -> Self {
        self.extra_body = Some(extra);
        self
    }

    pub fn id_generator(mut self, generator: IdGenerator) -> Self {
        self.id_generator = Some(generator);
        self
    }

    pub fn build(self) -> Result<OpenRouterProvider, LlmError> {
        let api_key = match self.api_key {
            Some(key) if !key.expose_secret().is_empty() => key,
            _ => std::env::var(API_KEY_ENV)
                .ok()
                .filter(|k| !k.is_empty())
                .map(SecretString::from)
                .ok_or_else(|| {
                    LlmError::MissingApiKey(format!(
                        "OpenRouter API key is missing. Pass it via `api_key` or set {API_KEY_ENV}."
                    ))
                })?,
        };

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(LlmError::ConfigurationError(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                let client = match self.http_client {
                    Some(client) => client,
                    None => build_http_client(self.timeout)?,
                };
                Arc::new(ReqwestTransport::new(client))
            }
        };

        Ok(OpenRouterProvider::from_config(OpenRouterConfig {
            provider: CHAT_PROVIDER_ID.to_string(),
            base_url,
            api_key,
            headers: self.headers,
            transport,
            compatibility: self.compatibility,
            extra_body: self.extra_body,
            id_generator: self.id_generator.unwrap_or_else(uuid_generator),
        }))
    }
}

fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, LlmError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| LlmError::ConfigurationError(format!("Failed to build HTTP client: {e}")))
}
