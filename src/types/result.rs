//! Results of complete and streamed calls.

use super::{Content, LanguageModelFinishReason, NormalizedUsage, ProviderMetadata, Warning};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response identity as reported by the vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "modelId")]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ResponseMetadata {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.model_id.is_none() && self.timestamp.is_none()
    }
}

/// What was sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestInfo {
    pub body: serde_json::Value,
}

/// What came back, alongside the parsed content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseInfo {
    #[serde(flatten)]
    pub metadata: ResponseMetadata,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

/// Normalized result of a non-streaming call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResult {
    pub content: Vec<Content>,
    #[serde(rename = "finishReason")]
    pub finish_reason: LanguageModelFinishReason,
    pub usage: NormalizedUsage,
    #[serde(default)]
    pub warnings: Vec<Warning>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "providerMetadata"
    )]
    pub provider_metadata: Option<ProviderMetadata>,
    pub request: RequestInfo,
    pub response: ResponseInfo,
}

impl GenerateResult {
    /// Concatenated text blocks.
    pub fn text(&self) -> String {
        self.content.iter().filter_map(Content::as_text).collect()
    }
}
