use crate::standards::openrouter::types::{FileAnnotation, OpenRouterUsage};
use crate::standards::openrouter::usage::OpenRouterUsageAccounting;
use crate::types::{LanguageModelFinishReason, ReasoningDetails};
use std::collections::BTreeMap;

/// Lifecycle of a text or reasoning block within one stream.
///
/// `NotStarted -> Open -> Closed`; a closed block never reopens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlockLifecycle {
    #[default]
    NotStarted,
    Open {
        id: String,
    },
    Closed,
}

impl BlockLifecycle {
    pub fn is_not_started(&self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub fn open_id(&self) -> Option<&str> {
        match self {
            Self::Open { id } => Some(id),
            Self::NotStarted | Self::Closed => None,
        }
    }

    /// Move `NotStarted -> Open`. Returns `false` in any other state.
    pub fn open(&mut self, id: String) -> bool {
        if !self.is_not_started() {
            return false;
        }
        *self = Self::Open { id };
        true
    }

    /// Move `Open -> Closed`, returning the id of the closed block.
    pub fn close(&mut self) -> Option<String> {
        match std::mem::replace(self, Self::Closed) {
            Self::Open { id } => Some(id),
            previous => {
                *self = previous;
                None
            }
        }
    }
}

/// Argument accumulation for one tool-call index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallAccumulator {
    pub id: String,
    pub name: String,
    pub arguments: String,
    pub input_started: bool,
    pub input_ended: bool,
    /// Set once the `tool-call` part has been emitted; never cleared.
    pub sent: bool,
}

impl ToolCallAccumulator {
    pub fn new(id: String, name: String, arguments: String) -> Self {
        Self {
            id,
            name,
            arguments,
            input_started: false,
            input_ended: false,
            sent: false,
        }
    }
}

/// Everything one stream accumulates between its first chunk and flush.
#[derive(Debug, Default)]
pub struct StreamState {
    pub finish_reason: LanguageModelFinishReason,
    /// Wire usage merged across chunks; normalized once at flush.
    pub usage: Option<OpenRouterUsage>,
    pub usage_accounting: OpenRouterUsageAccounting,
    pub reasoning_details: ReasoningDetails,
    pub file_annotations: Vec<FileAnnotation>,
    /// Keyed by vendor index; indices may arrive sparse or out of order.
    pub tool_calls: BTreeMap<u32, ToolCallAccumulator>,
    pub text: BlockLifecycle,
    pub reasoning: BlockLifecycle,
    /// Set by the first emitted tool call, the only one that may carry the
    /// reasoning details.
    pub first_tool_call_emitted: bool,
    pub response_id: Option<String>,
    pub model_id: Option<String>,
    pub created: Option<i64>,
    pub provider: Option<String>,
}
