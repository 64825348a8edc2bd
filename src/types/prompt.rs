//! Caller-side prompt representation.

use super::ProviderOptions;
use serde::{Deserialize, Serialize};

/// Binary or referenced payload of a prompt file part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FileData {
    /// Remote URL (or an already formed `data:` URL).
    Url(String),
    Base64(String),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UserContentPart {
    Text {
        text: String,
    },
    File {
        data: FileData,
        #[serde(rename = "mediaType")]
        media_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AssistantContentPart {
    Text {
        text: String,
    },
    /// Prior reasoning. `provider_options.openrouter.reasoning_details` is
    /// replayed verbatim when present.
    Reasoning {
        text: String,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerOptions"
        )]
        provider_options: Option<ProviderOptions>,
    },
    ToolCall {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
        input: serde_json::Value,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerOptions"
        )]
        provider_options: Option<ProviderOptions>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum ToolResultOutput {
    Text(String),
    Json(serde_json::Value),
    ErrorText(String),
    ErrorJson(serde_json::Value),
}

impl ToolResultOutput {
    /// The string sent as a `tool` message's content.
    pub fn to_content_string(&self) -> String {
        match self {
            Self::Text(text) | Self::ErrorText(text) => text.clone(),
            Self::Json(value) | Self::ErrorJson(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultPart {
    #[serde(rename = "toolCallId")]
    pub tool_call_id: String,
    #[serde(rename = "toolName")]
    pub tool_name: String,
    pub output: ToolResultOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System {
        content: String,
    },
    User {
        content: Vec<UserContentPart>,
    },
    Assistant {
        content: Vec<AssistantContentPart>,
    },
    Tool {
        content: Vec<ToolResultPart>,
    },
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self::System {
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::User {
            content: vec![UserContentPart::Text { text: text.into() }],
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant {
            content: vec![AssistantContentPart::Text { text: text.into() }],
        }
    }
}

pub type Prompt = Vec<Message>;
