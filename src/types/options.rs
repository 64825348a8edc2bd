//! Per-call options.

use super::{Prompt, ProviderOptions};
use crate::error::LlmError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Tool {
    Function {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(rename = "inputSchema")]
        input_schema: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        strict: Option<bool>,
    },
    /// Tool executed by some other provider; not representable here.
    ProviderDefined {
        id: String,
        name: String,
        #[serde(default)]
        args: serde_json::Value,
    },
}

impl Tool {
    pub fn function(
        name: impl Into<String>,
        description: Option<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self::Function {
            name: name.into(),
            description,
            input_schema,
            strict: None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Function { name, .. } | Self::ProviderDefined { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ToolChoice {
    Auto,
    None,
    Required,
    Tool {
        #[serde(rename = "toolName")]
        tool_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResponseFormat {
    Text,
    Json {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// Options for a single generate/stream call.
#[derive(Debug, Clone, Default, Validate)]
pub struct CallOptions {
    pub prompt: Prompt,

    #[validate(range(min = 1))]
    pub max_output_tokens: Option<u32>,

    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f64>,

    #[validate(range(min = 0.0, max = 1.0))]
    pub top_p: Option<f64>,

    #[validate(range(min = 1))]
    pub top_k: Option<u32>,

    #[validate(range(min = -2.0, max = 2.0))]
    pub frequency_penalty: Option<f64>,

    #[validate(range(min = -2.0, max = 2.0))]
    pub presence_penalty: Option<f64>,

    pub stop_sequences: Option<Vec<String>>,
    pub seed: Option<i64>,
    pub response_format: Option<ResponseFormat>,
    pub tools: Vec<Tool>,
    pub tool_choice: Option<ToolChoice>,

    /// `providerOptions.openrouter` is merged into the request body last.
    pub provider_options: Option<ProviderOptions>,

    /// Extra per-request headers.
    pub headers: HashMap<String, String>,

    /// Forward every raw vendor chunk as a `raw` stream part.
    pub include_raw_chunks: bool,

    /// Cancelling ends the response stream; whatever was accumulated is
    /// still flushed.
    pub abort_signal: Option<CancellationToken>,
}

impl CallOptions {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            prompt,
            ..Default::default()
        }
    }

    /// Range-check sampling parameters.
    pub fn validate_params(&self) -> Result<(), LlmError> {
        self.validate()
            .map_err(|e| LlmError::InvalidParameter(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;

    #[test]
    fn rejects_out_of_range_temperature() {
        let opts = CallOptions {
            temperature: Some(3.5),
            ..CallOptions::new(vec![Message::user("hi")])
        };
        match opts.validate_params() {
            Err(LlmError::InvalidParameter(msg)) => assert!(msg.contains("temperature")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn accepts_defaults() {
        assert!(CallOptions::new(vec![]).validate_params().is_ok());
    }
}
