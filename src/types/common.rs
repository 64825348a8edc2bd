//! Warnings and provider metadata containers.

use serde::{Deserialize, Serialize};

/// Provider metadata keyed by provider name (e.g. `{"openrouter": {...}}`).
///
/// Kept permissive so unknown vendor data survives a round trip.
pub type ProviderMetadata = serde_json::Map<String, serde_json::Value>;

/// Provider options keyed by provider name. Same shape as [`ProviderMetadata`]
/// but flowing from the caller towards the vendor.
pub type ProviderOptions = serde_json::Map<String, serde_json::Value>;

/// Key under which this crate reads and writes vendor-specific data.
pub const OPENROUTER_METADATA_KEY: &str = "openrouter";

/// Wrap a value under the `openrouter` provider key.
pub fn openrouter_metadata(value: serde_json::Value) -> ProviderMetadata {
    let mut out = ProviderMetadata::new();
    out.insert(OPENROUTER_METADATA_KEY.to_string(), value);
    out
}

/// Read the `openrouter` entry of a provider options/metadata map.
pub fn openrouter_entry(
    map: Option<&ProviderMetadata>,
) -> Option<&serde_json::Map<String, serde_json::Value>> {
    map?.get(OPENROUTER_METADATA_KEY)?.as_object()
}

/// Non-fatal issue found while building a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Warning {
    UnsupportedSetting {
        setting: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    UnsupportedTool {
        #[serde(rename = "toolName")]
        tool_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Other {
        message: String,
    },
}

impl Warning {
    pub fn unsupported_setting(
        setting: impl Into<String>,
        details: Option<impl Into<String>>,
    ) -> Self {
        Self::UnsupportedSetting {
            setting: setting.into(),
            details: details.map(Into::into),
        }
    }

    pub fn unsupported_tool(
        tool_name: impl Into<String>,
        details: Option<impl Into<String>>,
    ) -> Self {
        Self::UnsupportedTool {
            tool_name: tool_name.into(),
            details: details.map(Into::into),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
