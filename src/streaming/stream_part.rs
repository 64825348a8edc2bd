//! Normalized stream parts.
//!
//! The vocabulary follows the Vercel AI SDK `LanguageModelV3StreamPart`
//! union, so parts serialize to the same JSON a JS consumer would expect.

use crate::types::{
    FilePart, LanguageModelFinishReason, NormalizedUsage, ProviderMetadata, ResponseMetadata,
    Source, ToolCallPart, Warning,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamPart {
    StreamStart {
        warnings: Vec<Warning>,
    },

    ResponseMetadata(ResponseMetadata),

    ReasoningStart {
        id: String,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },
    ReasoningDelta {
        id: String,
        delta: String,
    },
    ReasoningEnd {
        id: String,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },

    TextStart {
        id: String,
    },
    TextDelta {
        id: String,
        delta: String,
    },
    TextEnd {
        id: String,
    },

    Source(Source),

    ToolInputStart {
        id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
    },
    ToolInputDelta {
        id: String,
        delta: String,
    },
    ToolInputEnd {
        id: String,
    },
    ToolCall(ToolCallPart),

    File(FilePart),

    Error {
        error: serde_json::Value,
    },

    Finish {
        #[serde(rename = "finishReason")]
        finish_reason: LanguageModelFinishReason,
        usage: NormalizedUsage,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },

    Raw {
        #[serde(rename = "rawValue")]
        raw_value: serde_json::Value,
    },
}

impl StreamPart {
    /// The kebab-case `type` tag of this part.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StreamStart { .. } => "stream-start",
            Self::ResponseMetadata(_) => "response-metadata",
            Self::ReasoningStart { .. } => "reasoning-start",
            Self::ReasoningDelta { .. } => "reasoning-delta",
            Self::ReasoningEnd { .. } => "reasoning-end",
            Self::TextStart { .. } => "text-start",
            Self::TextDelta { .. } => "text-delta",
            Self::TextEnd { .. } => "text-end",
            Self::Source(_) => "source",
            Self::ToolInputStart { .. } => "tool-input-start",
            Self::ToolInputDelta { .. } => "tool-input-delta",
            Self::ToolInputEnd { .. } => "tool-input-end",
            Self::ToolCall(_) => "tool-call",
            Self::File(_) => "file",
            Self::Error { .. } => "error",
            Self::Finish { .. } => "finish",
            Self::Raw { .. } => "raw",
        }
    }

    /// Format as an SSE `data:` frame.
    pub fn to_sse_frame(&self) -> Result<String, crate::error::LlmError> {
        Ok(format!("data: {}\n\n", serde_json::to_string(self)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FinishReason;

    #[test]
    fn kind_matches_serialized_tag() {
        let parts = [
            StreamPart::TextDelta {
                id: "t".into(),
                delta: "hi".into(),
            },
            StreamPart::ResponseMetadata(ResponseMetadata {
                id: Some("gen-1".into()),
                ..Default::default()
            }),
            StreamPart::Source(Source::Url {
                id: "s".into(),
                url: "https://example.com".into(),
                title: None,
                provider_metadata: None,
            }),
            StreamPart::Finish {
                finish_reason: LanguageModelFinishReason::new(FinishReason::Stop, None),
                usage: NormalizedUsage::empty(),
                provider_metadata: None,
            },
        ];
        for part in parts {
            let json = serde_json::to_value(&part).unwrap();
            assert_eq!(json["type"], part.kind());
        }
    }

    #[test]
    fn finish_serializes_camel_case_fields() {
        let part = StreamPart::Finish {
            finish_reason: LanguageModelFinishReason::new(
                FinishReason::ToolCalls,
                Some("stop".into()),
            ),
            usage: NormalizedUsage::empty(),
            provider_metadata: None,
        };
        let frame = part.to_sse_frame().unwrap();
        assert!(frame.starts_with("data: {"));
        assert!(frame.contains("\"finishReason\":{\"unified\":\"tool-calls\",\"raw\":\"stop\"}"));
        assert!(frame.ends_with("\n\n"));
    }
}
