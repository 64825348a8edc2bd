//! OpenRouter chat stream transformer.
//!
//! Turns validated chat-completion chunks into [`StreamPart`]s. One
//! transformer owns the state of exactly one HTTP stream: `transform` is fed
//! every chunk in order and `flush` consumes the transformer once upstream
//! has ended (naturally or through cancellation).

mod content;
mod state;
mod tool_calls;

pub use state::{BlockLifecycle, StreamState, ToolCallAccumulator};

use crate::error::LlmError;
use crate::standards::openrouter::finish_reason::{
    apply_encrypted_reasoning_override, map_finish_reason,
};
use crate::standards::openrouter::metadata::{non_empty_reasoning_metadata, response_metadata};
use crate::standards::openrouter::types::{OpenRouterChunk, OpenRouterChunkData};
use crate::standards::openrouter::usage::normalize_usage;
use crate::streaming::{
    ChatStream, ParseResult, SseDataStreamConfig, StreamPart, stream_sse_data,
};
use crate::types::{FinishReason, LanguageModelFinishReason, ResponseMetadata, Warning};
use crate::utils::{IdGenerator, cancellable, uuid_generator};
use futures::Stream;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

/// Per-stream options.
#[derive(Clone)]
pub struct StreamTransformOptions {
    /// Forward each raw chunk as a `raw` part before its normalized parts.
    pub include_raw_chunks: bool,
    pub id_generator: IdGenerator,
}

impl Default for StreamTransformOptions {
    fn default() -> Self {
        Self {
            include_raw_chunks: false,
            id_generator: uuid_generator(),
        }
    }
}

impl std::fmt::Debug for StreamTransformOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTransformOptions")
            .field("include_raw_chunks", &self.include_raw_chunks)
            .finish_non_exhaustive()
    }
}

pub struct OpenRouterStreamTransformer {
    options: StreamTransformOptions,
    state: StreamState,
}

impl OpenRouterStreamTransformer {
    pub fn new(options: StreamTransformOptions) -> Self {
        Self {
            options,
            state: StreamState::default(),
        }
    }

    pub fn state(&self) -> &StreamState {
        &self.state
    }

    fn next_id(&self) -> String {
        (self.options.id_generator)()
    }

    /// Process one chunk.
    ///
    /// Validation failures and in-band vendor errors become `error` parts and
    /// force the finish reason to `error`; the stream keeps going. A tool
    /// call that violates the vendor contract is returned as `Err`, which is
    /// fatal for the stream.
    pub fn transform(
        &mut self,
        chunk: ParseResult<OpenRouterChunk>,
    ) -> Result<Vec<StreamPart>, LlmError> {
        let mut out = Vec::new();

        if self.options.include_raw_chunks {
            out.push(StreamPart::Raw {
                raw_value: chunk.raw_value().clone(),
            });
        }

        match chunk {
            ParseResult::Failure { error, raw_value } => {
                tracing::warn!(error = %error, "openrouter chunk failed validation");
                tracing::debug!(raw = %raw_value, "invalid chunk");
                self.state.finish_reason = LanguageModelFinishReason::error();
                out.push(StreamPart::Error {
                    error: serde_json::Value::String(error.to_string()),
                });
            }
            ParseResult::Success {
                value: OpenRouterChunk::Error(envelope),
                ..
            } => {
                tracing::warn!(message = %envelope.error.message, "openrouter error chunk");
                self.state.finish_reason = LanguageModelFinishReason::error();
                out.push(StreamPart::Error {
                    error: serde_json::to_value(&envelope.error)?,
                });
            }
            ParseResult::Success {
                value: OpenRouterChunk::Data(data),
                ..
            } => self.process_chunk(data, &mut out)?,
        }

        Ok(out)
    }

    fn process_chunk(
        &mut self,
        chunk: OpenRouterChunkData,
        out: &mut Vec<StreamPart>,
    ) -> Result<(), LlmError> {
        self.record_response_metadata(&chunk, out);

        if let Some(usage) = &chunk.usage {
            self.state
                .usage
                .get_or_insert_with(Default::default)
                .merge_known(usage);
            self.state.usage_accounting.update(usage);
        }

        let Some(choice) = chunk.choices.into_iter().next() else {
            return Ok(());
        };

        if let Some(reason) = choice.finish_reason.as_deref() {
            self.state.finish_reason = map_finish_reason(Some(reason));
        }

        let Some(delta) = choice.delta else {
            return Ok(());
        };

        self.process_reasoning(delta.reasoning_details, delta.reasoning, out);
        if let Some(text) = delta.content.filter(|t| !t.is_empty()) {
            self.process_text(text, out);
        }
        if let Some(annotations) = delta.annotations {
            self.process_annotations(annotations, out);
        }
        if let Some(tool_calls) = delta.tool_calls {
            for tool_call in tool_calls {
                self.process_tool_call(tool_call, out)?;
            }
        }
        if let Some(images) = delta.images {
            self.process_images(&images, out);
        }

        Ok(())
    }

    /// Emit id / model / timestamp the first time each is seen.
    fn record_response_metadata(&mut self, chunk: &OpenRouterChunkData, out: &mut Vec<StreamPart>) {
        let mut fresh = ResponseMetadata::default();

        if self.state.response_id.is_none() && chunk.id.is_some() {
            self.state.response_id = chunk.id.clone();
            fresh.id = chunk.id.clone();
        }
        if self.state.model_id.is_none() && chunk.model.is_some() {
            self.state.model_id = chunk.model.clone();
            fresh.model_id = chunk.model.clone();
        }
        if self.state.created.is_none()
            && let Some(created) = chunk.created
        {
            self.state.created = Some(created);
            fresh.timestamp = chrono::DateTime::from_timestamp(created, 0);
        }
        if chunk.provider.is_some() {
            self.state.provider = chunk.provider.clone();
        }

        if !fresh.is_empty() {
            out.push(StreamPart::ResponseMetadata(fresh));
        }
    }

    /// Finalize the stream. Runs exactly once since it consumes `self`.
    pub fn flush(mut self) -> Vec<StreamPart> {
        let mut out = Vec::new();
        let state = &mut self.state;

        let finish_reason = apply_encrypted_reasoning_override(
            std::mem::take(&mut state.finish_reason),
            !state.tool_calls.is_empty(),
            state.reasoning_details.as_slice(),
        );

        if finish_reason.unified == FinishReason::ToolCalls {
            self.force_emit_tool_calls(&mut out);
        } else {
            let dropped = self.state.tool_calls.values().filter(|c| !c.sent).count();
            if dropped > 0 {
                tracing::debug!(
                    dropped,
                    finish_reason = %finish_reason.unified,
                    "incomplete tool calls not emitted"
                );
            }
        }

        let state = &mut self.state;
        if let Some(id) = state.reasoning.close() {
            out.push(StreamPart::ReasoningEnd {
                id,
                provider_metadata: non_empty_reasoning_metadata(state.reasoning_details.as_slice()),
            });
        }
        if let Some(id) = state.text.close() {
            out.push(StreamPart::TextEnd { id });
        }

        let provider_metadata = response_metadata(
            Some(&state.usage_accounting),
            state.provider.as_deref(),
            state.reasoning_details.as_slice(),
            &state.file_annotations,
        );

        out.push(StreamPart::Finish {
            finish_reason,
            usage: normalize_usage(state.usage.as_ref()),
            provider_metadata: Some(provider_metadata),
        });
        out
    }
}

/// Build the normalized part stream for an SSE response body.
///
/// `warnings` are reported first in a `stream-start` part. Cancelling
/// `abort_signal` ends the byte stream; the transformer then flushes what it
/// has. A transport error or a protocol violation ends the stream with
/// `Err` and no `finish` part.
pub fn transform_stream<S, B>(
    byte_stream: S,
    warnings: Vec<Warning>,
    options: StreamTransformOptions,
    abort_signal: Option<CancellationToken>,
) -> ChatStream
where
    S: Stream<Item = Result<B, LlmError>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let bytes = cancellable(byte_stream, abort_signal);
    let mut events = stream_sse_data(bytes, SseDataStreamConfig::new("openrouter"));

    let out = async_stream::stream! {
        yield Ok(StreamPart::StreamStart { warnings });

        let mut transformer = OpenRouterStreamTransformer::new(options);
        while let Some(item) = events.next().await {
            let data = match item {
                Ok(data) => data,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            match transformer.transform(ParseResult::from_json_str(&data)) {
                Ok(parts) => {
                    for part in parts {
                        yield Ok(part);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "openrouter stream protocol violation");
                    yield Err(e);
                    return;
                }
            }
        }

        for part in transformer.flush() {
            yield Ok(part);
        }
    };

    Box::pin(out)
}
