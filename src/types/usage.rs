//! Normalized token usage.
//!
//! Fields the vendor did not report stay `None`; only the two totals default
//! to zero. Derived counters (`noCache`, `text`) are signed because vendors
//! occasionally report more cached/reasoning tokens than the total, and that
//! discrepancy is passed through unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTokens {
    pub total: u64,
    #[serde(rename = "noCache")]
    pub no_cache: Option<i64>,
    #[serde(rename = "cacheRead")]
    pub cache_read: Option<u64>,
    #[serde(rename = "cacheWrite")]
    pub cache_write: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputTokens {
    pub total: u64,
    pub text: Option<i64>,
    pub reasoning: Option<u64>,
}

/// Token usage in the normalized shape shared by every result and the
/// terminal `finish` stream part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedUsage {
    #[serde(rename = "inputTokens")]
    pub input_tokens: InputTokens,
    #[serde(rename = "outputTokens")]
    pub output_tokens: OutputTokens,
    /// Verbatim vendor usage object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl NormalizedUsage {
    /// Usage record for a response that carried no usage object at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total tokens across input and output.
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.total + self.output_tokens.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_usage_serializes_known_totals_only() {
        let json = serde_json::to_value(NormalizedUsage::empty()).unwrap();
        assert_eq!(json["inputTokens"]["total"], 0);
        assert!(json["inputTokens"]["cacheWrite"].is_null());
        assert!(json.get("raw").is_none());
    }
}
