//! Structured reasoning details.
//!
//! Reasoning details are replayed verbatim on follow-up turns (some models
//! sign their reasoning and reject a conversation whose prior reasoning was
//! altered), so they serialize in the vendor wire shape.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown in place of encrypted reasoning content.
pub const REDACTED_REASONING: &str = "[REDACTED]";

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of a model's structured reasoning output.
///
/// Unknown `type` tags fail deserialization instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReasoningDetail {
    #[serde(rename = "reasoning.text")]
    Text {
        #[serde(default, deserialize_with = "null_as_empty")]
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signature: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<u32>,
    },
    #[serde(rename = "reasoning.summary")]
    Summary {
        #[serde(default, deserialize_with = "null_as_empty")]
        summary: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<u32>,
    },
    #[serde(rename = "reasoning.encrypted")]
    Encrypted {
        #[serde(default, deserialize_with = "null_as_empty")]
        data: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<u32>,
    },
}

impl ReasoningDetail {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            signature: None,
            format: None,
            id: None,
            index: None,
        }
    }

    pub fn summary(summary: impl Into<String>) -> Self {
        Self::Summary {
            summary: summary.into(),
            format: None,
            id: None,
            index: None,
        }
    }

    pub fn encrypted(data: impl Into<String>) -> Self {
        Self::Encrypted {
            data: data.into(),
            format: None,
            id: None,
            index: None,
        }
    }

    /// Human-readable text for this entry.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Text { text, .. } => text,
            Self::Summary { summary, .. } => summary,
            Self::Encrypted { .. } => REDACTED_REASONING,
        }
    }

    /// Encrypted continuation payload, if this entry carries a non-empty one.
    pub fn encrypted_payload(&self) -> Option<&str> {
        match self {
            Self::Encrypted { data, .. } if !data.is_empty() => Some(data),
            Self::Encrypted { .. } | Self::Text { .. } | Self::Summary { .. } => None,
        }
    }
}

fn first_non_empty(slot: &mut Option<String>, incoming: Option<String>) {
    let empty = slot.as_deref().is_none_or(str::is_empty);
    if empty && let Some(value) = incoming.filter(|v| !v.is_empty()) {
        *slot = Some(value);
    }
}

/// Order-preserving reasoning detail sequence for one turn.
///
/// Consecutive `Text` entries are merged into one logical entry; `Summary`
/// and `Encrypted` entries are always appended standalone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasoningDetails {
    entries: Vec<ReasoningDetail>,
}

impl ReasoningDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, detail: ReasoningDetail) {
        match (self.entries.last_mut(), detail) {
            (
                Some(ReasoningDetail::Text {
                    text,
                    signature,
                    format,
                    id,
                    index,
                }),
                ReasoningDetail::Text {
                    text: more,
                    signature: incoming_signature,
                    format: incoming_format,
                    id: incoming_id,
                    index: incoming_index,
                },
            ) => {
                text.push_str(&more);
                first_non_empty(signature, incoming_signature);
                first_non_empty(format, incoming_format);
                first_non_empty(id, incoming_id);
                if index.is_none() {
                    *index = incoming_index;
                }
            }
            (_, detail) => self.entries.push(detail),
        }
    }

    pub fn extend(&mut self, details: impl IntoIterator<Item = ReasoningDetail>) {
        for detail in details {
            self.push(detail);
        }
    }

    pub fn as_slice(&self) -> &[ReasoningDetail] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any entry is an `Encrypted` detail with non-empty data.
    pub fn has_encrypted_payload(&self) -> bool {
        self.entries.iter().any(|d| d.encrypted_payload().is_some())
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.entries).unwrap_or_else(|_| serde_json::Value::Array(vec![]))
    }

    pub fn into_vec(self) -> Vec<ReasoningDetail> {
        self.entries
    }
}

impl FromIterator<ReasoningDetail> for ReasoningDetails {
    fn from_iter<I: IntoIterator<Item = ReasoningDetail>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_text_fragments_merge_with_first_signature() {
        let mut details = ReasoningDetails::new();
        details.push(ReasoningDetail::text("a"));
        details.push(ReasoningDetail::Text {
            text: "b".into(),
            signature: Some("s".into()),
            format: None,
            id: None,
            index: None,
        });
        details.push(ReasoningDetail::Text {
            text: "c".into(),
            signature: Some("later".into()),
            format: Some("anthropic-claude-v1".into()),
            id: None,
            index: None,
        });

        assert_eq!(
            details.as_slice(),
            &[ReasoningDetail::Text {
                text: "abc".into(),
                signature: Some("s".into()),
                format: Some("anthropic-claude-v1".into()),
                id: None,
                index: None,
            }]
        );
    }

    #[test]
    fn encrypted_and_summary_entries_are_never_merged() {
        let details: ReasoningDetails = [
            ReasoningDetail::text("thinking"),
            ReasoningDetail::encrypted("blob-1"),
            ReasoningDetail::encrypted("blob-2"),
            ReasoningDetail::summary("short"),
            ReasoningDetail::text("more"),
        ]
        .into_iter()
        .collect();

        assert_eq!(details.len(), 5);
        assert!(details.has_encrypted_payload());
    }

    #[test]
    fn empty_encrypted_data_is_not_a_payload() {
        let details: ReasoningDetails = [ReasoningDetail::encrypted("")].into_iter().collect();
        assert!(!details.has_encrypted_payload());
    }

    #[test]
    fn wire_shape_round_trips_and_accepts_null_text() {
        let detail: ReasoningDetail = serde_json::from_value(serde_json::json!({
            "type": "reasoning.text",
            "text": null,
            "signature": "sig",
            "format": "anthropic-claude-v1",
            "index": 0
        }))
        .unwrap();
        assert_eq!(detail.display_text(), "");

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["type"], "reasoning.text");
        assert_eq!(json["signature"], "sig");
    }

    #[test]
    fn unknown_detail_tag_is_rejected() {
        let parsed = serde_json::from_value::<ReasoningDetail>(serde_json::json!({
            "type": "reasoning.hologram",
            "data": "x"
        }));
        assert!(parsed.is_err());
    }
}
