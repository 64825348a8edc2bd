use super::*;
use crate::standards::openrouter::types::ToolCallDelta;
use crate::types::{ProviderMetadata, ToolCallPart};
use crate::utils::is_parsable_json;

fn invalid_tool_call(message: &str, delta: &ToolCallDelta) -> LlmError {
    LlmError::invalid_response_data(message, serde_json::to_value(delta).ok())
}

impl OpenRouterStreamTransformer {
    pub(super) fn process_tool_call(
        &mut self,
        delta: ToolCallDelta,
        out: &mut Vec<StreamPart>,
    ) -> Result<(), LlmError> {
        let index = match delta.index {
            Some(index) => index,
            None => self.index_for_unindexed(&delta),
        };

        if !self.state.tool_calls.contains_key(&index) {
            return self.start_tool_call(index, delta, out);
        }

        let fragment = delta
            .function
            .and_then(|f| f.arguments)
            .unwrap_or_default();

        let Some(call) = self.state.tool_calls.get_mut(&index) else {
            return Ok(());
        };
        if call.sent {
            tracing::debug!(index, "argument fragment after tool call was emitted; ignored");
            return Ok(());
        }

        // The first chunk's arguments were buffered silently; they go out
        // together with the first follow-up fragment.
        let delta_text = if call.input_started {
            fragment.clone()
        } else {
            call.input_started = true;
            out.push(StreamPart::ToolInputStart {
                id: call.id.clone(),
                tool_name: call.name.clone(),
            });
            format!("{}{}", call.arguments, fragment)
        };
        call.arguments.push_str(&fragment);

        if !delta_text.is_empty() {
            out.push(StreamPart::ToolInputDelta {
                id: call.id.clone(),
                delta: delta_text,
            });
        }

        if !is_parsable_json(&call.arguments) {
            return Ok(());
        }

        call.input_ended = true;
        call.sent = true;
        let (id, name, input) = (call.id.clone(), call.name.clone(), call.arguments.clone());
        let provider_metadata = self.claim_reasoning_attachment();
        out.push(StreamPart::ToolInputEnd { id: id.clone() });
        out.push(StreamPart::ToolCall(ToolCallPart {
            tool_call_id: id,
            tool_name: name,
            input,
            provider_metadata,
        }));

        Ok(())
    }

    /// A delta without `index` continues the latest call unless it carries
    /// a new id, in which case it takes the slot after the highest one.
    fn index_for_unindexed(&self, delta: &ToolCallDelta) -> u32 {
        let last = self.state.tool_calls.last_key_value();
        match (last, delta.id.as_deref()) {
            (Some((index, _)), None) => *index,
            (Some((index, call)), Some(id)) if call.id == id => *index,
            (Some((index, _)), Some(_)) => index.saturating_add(1),
            (None, _) => 0,
        }
    }

    /// First delta for an index: validate, then either emit the whole call
    /// at once or start buffering.
    fn start_tool_call(
        &mut self,
        index: u32,
        delta: ToolCallDelta,
        out: &mut Vec<StreamPart>,
    ) -> Result<(), LlmError> {
        if delta.kind.as_deref() != Some("function") {
            return Err(invalid_tool_call("Expected 'function' type.", &delta));
        }
        let Some(id) = delta.id.clone() else {
            return Err(invalid_tool_call("Expected 'id' to be a string.", &delta));
        };
        let Some(name) = delta.function.as_ref().and_then(|f| f.name.clone()) else {
            return Err(invalid_tool_call(
                "Expected 'function.name' to be a string.",
                &delta,
            ));
        };
        let arguments = delta
            .function
            .and_then(|f| f.arguments)
            .unwrap_or_default();

        let mut call = ToolCallAccumulator::new(id, name, arguments);

        if !call.arguments.is_empty() && is_parsable_json(&call.arguments) {
            let provider_metadata = self.claim_reasoning_attachment();
            call.input_started = true;
            call.input_ended = true;
            call.sent = true;
            out.push(StreamPart::ToolInputStart {
                id: call.id.clone(),
                tool_name: call.name.clone(),
            });
            out.push(StreamPart::ToolInputDelta {
                id: call.id.clone(),
                delta: call.arguments.clone(),
            });
            out.push(StreamPart::ToolInputEnd {
                id: call.id.clone(),
            });
            out.push(StreamPart::ToolCall(ToolCallPart {
                tool_call_id: call.id.clone(),
                tool_name: call.name.clone(),
                input: call.arguments.clone(),
                provider_metadata,
            }));
        }

        self.state.tool_calls.insert(index, call);
        Ok(())
    }

    /// Reasoning metadata for the tool call about to be emitted. The first
    /// emitted call claims the slot even when no details exist yet; later
    /// calls never carry them.
    fn claim_reasoning_attachment(&mut self) -> Option<ProviderMetadata> {
        if std::mem::replace(&mut self.state.first_tool_call_emitted, true) {
            return None;
        }
        non_empty_reasoning_metadata(self.state.reasoning_details.as_slice())
    }

    /// Emit every unsent accumulator; unparsable input becomes `{}`.
    pub(super) fn force_emit_tool_calls(&mut self, out: &mut Vec<StreamPart>) {
        let indices: Vec<u32> = self
            .state
            .tool_calls
            .iter()
            .filter(|(_, call)| !call.sent)
            .map(|(index, _)| *index)
            .collect();

        for index in indices {
            let provider_metadata = self.claim_reasoning_attachment();
            let Some(call) = self.state.tool_calls.get_mut(&index) else {
                continue;
            };
            if call.input_started && !call.input_ended {
                call.input_ended = true;
                out.push(StreamPart::ToolInputEnd {
                    id: call.id.clone(),
                });
            }
            let input = if is_parsable_json(&call.arguments) {
                call.arguments.clone()
            } else {
                tracing::debug!(
                    tool_call_id = %call.id,
                    "tool call arguments never became valid JSON; sending {{}}"
                );
                "{}".to_string()
            };
            call.sent = true;
            out.push(StreamPart::ToolCall(ToolCallPart {
                tool_call_id: call.id.clone(),
                tool_name: call.name.clone(),
                input,
                provider_metadata,
            }));
        }
    }
}
