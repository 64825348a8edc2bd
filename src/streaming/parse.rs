//! Typed parsing of raw chunks.
//!
//! Every SSE payload is parsed into a [`ParseResult`] that keeps the raw JSON
//! next to either the typed value or the validation error. The transformer
//! branches on that tag only; a failed chunk is never fatal on its own.

use crate::error::LlmError;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum ParseResult<T> {
    Success { value: T, raw_value: Value },
    Failure { error: LlmError, raw_value: Value },
}

impl<T: DeserializeOwned> ParseResult<T> {
    /// Validate an already decoded JSON value.
    pub fn from_value(raw_value: Value) -> Self {
        match T::deserialize(&raw_value) {
            Ok(value) => Self::Success { value, raw_value },
            Err(e) => Self::Failure {
                error: LlmError::ParseError(format!("Type validation failed: {e}")),
                raw_value,
            },
        }
    }

    /// Parse and validate an SSE `data:` payload.
    ///
    /// Text that is not JSON at all is kept as a string raw value.
    pub fn from_json_str(data: &str) -> Self {
        match serde_json::from_str::<Value>(data) {
            Ok(raw) => Self::from_value(raw),
            Err(e) => Self::Failure {
                error: LlmError::ParseError(format!("Invalid JSON in stream chunk: {e}")),
                raw_value: Value::String(data.to_string()),
            },
        }
    }
}

impl<T> ParseResult<T> {
    pub fn raw_value(&self) -> &Value {
        match self {
            Self::Success { raw_value, .. } | Self::Failure { raw_value, .. } => raw_value,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
