//! SSE data helpers
//!
//! Splits a byte stream into SSE `data:` payloads, ignoring keep-alives,
//! empty events and done markers. Payloads are returned as text so the
//! caller decides how (and how strictly) to parse them.

use crate::error::LlmError;
use eventsource_stream::Eventsource;
use futures_util::Stream;
use futures_util::StreamExt;
use std::pin::Pin;

#[derive(Debug, Clone)]
pub struct SseDataStreamConfig {
    /// Label used in error messages.
    pub label: String,
    /// SSE `data` payloads that indicate end-of-stream and should be ignored.
    pub done_markers: Vec<String>,
}

impl SseDataStreamConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            done_markers: vec!["[DONE]".to_string()],
        }
    }
}

pub type SseDataStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

/// Convert a bytes stream into a stream of SSE `data:` payloads.
///
/// A transport or framing error is yielded once and ends the stream.
pub fn stream_sse_data<S, B>(byte_stream: S, cfg: SseDataStreamConfig) -> SseDataStream
where
    S: Stream<Item = Result<B, LlmError>> + Send + Unpin + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let SseDataStreamConfig {
        label,
        done_markers,
    } = cfg;

    let out = async_stream::stream! {
        let mut events = byte_stream.eventsource();

        while let Some(item) = events.next().await {
            let event = match item {
                Ok(ev) => ev,
                Err(e) => {
                    yield Err(LlmError::StreamError(format!("SSE stream error ({label}): {e}")));
                    return;
                }
            };

            let data = event.data.trim();
            if data.is_empty() || done_markers.iter().any(|m| m == data) {
                continue;
            }
            tracing::trace!(label = %label, "sse data event");
            yield Ok(data.to_string());
        }
    };

    Box::pin(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn skips_comments_and_done_marker() {
        let data: Vec<Result<&[u8], LlmError>> = vec![
            Ok(b": OPENROUTER PROCESSING\n\n".as_slice()),
            Ok(b"data: {\"a\":1}\n\n".as_slice()),
            Ok(b"data: [DONE]\n\n".as_slice()),
            Ok(b"data: {\"b\":2}\n\n".as_slice()),
        ];

        let stream = stream_sse_data(
            futures_util::stream::iter(data),
            SseDataStreamConfig::new("test"),
        );
        let out: Vec<String> = stream.map(|r| r.expect("data")).collect().await;
        assert_eq!(out, vec!["{\"a\":1}".to_string(), "{\"b\":2}".to_string()]);
    }

    #[tokio::test]
    async fn events_split_across_byte_chunks_are_reassembled() {
        let data: Vec<Result<&[u8], LlmError>> = vec![
            Ok(b"data: {\"te".as_slice()),
            Ok(b"xt\":\"hi\"}\n".as_slice()),
            Ok(b"\n".as_slice()),
        ];
        let stream = stream_sse_data(
            futures_util::stream::iter(data),
            SseDataStreamConfig::new("test"),
        );
        let out: Vec<String> = stream.map(|r| r.expect("data")).collect().await;
        assert_eq!(out, vec!["{\"text\":\"hi\"}".to_string()]);
    }

    #[tokio::test]
    async fn transport_error_ends_stream() {
        let data: Vec<Result<&[u8], LlmError>> = vec![
            Ok(b"data: {\"a\":1}\n\n".as_slice()),
            Err(LlmError::HttpError("connection reset".into())),
            Ok(b"data: {\"b\":2}\n\n".as_slice()),
        ];
        let mut stream = stream_sse_data(
            futures_util::stream::iter(data),
            SseDataStreamConfig::new("openrouter"),
        );
        assert!(stream.next().await.expect("first").is_ok());
        match stream.next().await.expect("second") {
            Err(LlmError::StreamError(msg)) => assert!(msg.contains("openrouter")),
            other => panic!("unexpected item: {other:?}"),
        }
        assert!(stream.next().await.is_none());
    }
}
