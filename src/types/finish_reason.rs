//! Finish reason types.

use serde::{Deserialize, Serialize};

/// Why the model stopped generating tokens.
///
/// Closed set; vendor values outside it map to [`FinishReason::Other`] and
/// keep their raw spelling in [`LanguageModelFinishReason::raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    Error,
    Other,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ContentFilter => "content-filter",
            Self::ToolCalls => "tool-calls",
            Self::Error => "error",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified finish reason plus the vendor's original value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageModelFinishReason {
    pub unified: FinishReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl LanguageModelFinishReason {
    pub fn new(unified: FinishReason, raw: Option<String>) -> Self {
        Self { unified, raw }
    }

    /// The "nothing known yet" value a stream starts with.
    pub fn other() -> Self {
        Self::new(FinishReason::Other, None)
    }

    pub fn error() -> Self {
        Self::new(FinishReason::Error, None)
    }
}

impl Default for LanguageModelFinishReason {
    fn default() -> Self {
        Self::other()
    }
}
