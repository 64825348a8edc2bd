//! Finish reason mapping.

use crate::types::{FinishReason, LanguageModelFinishReason, ReasoningDetail};

/// Map a vendor finish reason, keeping the raw value.
pub fn map_finish_reason(raw: Option<&str>) -> LanguageModelFinishReason {
    let unified = match raw {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        Some("tool_calls" | "function_call") => FinishReason::ToolCalls,
        Some("error") => FinishReason::Error,
        _ => FinishReason::Other,
    };
    LanguageModelFinishReason::new(unified, raw.map(str::to_string))
}

/// Turn `stop` into `tool-calls` when the turn produced tool calls together
/// with an encrypted reasoning continuation.
///
/// Some upstreams report `stop` in that case even though the caller must
/// continue the tool loop. The raw value is left untouched.
pub fn apply_encrypted_reasoning_override(
    reason: LanguageModelFinishReason,
    has_tool_calls: bool,
    details: &[ReasoningDetail],
) -> LanguageModelFinishReason {
    let has_encrypted = details.iter().any(|d| d.encrypted_payload().is_some());
    if has_tool_calls && has_encrypted && reason.unified == FinishReason::Stop {
        return LanguageModelFinishReason::new(FinishReason::ToolCalls, reason.raw);
    }
    reason
}
