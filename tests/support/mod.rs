//! Shared test helpers: fixture loading and a scripted HTTP transport.
#![allow(dead_code)]

use async_trait::async_trait;
use futures_util::StreamExt;
use openrouter_provider::LlmError;
use openrouter_provider::execution::http::{
    HttpTransport, HttpTransportRequest, HttpTransportResponse, HttpTransportStreamBody,
    HttpTransportStreamResponse,
};
use openrouter_provider::streaming::{ChatStream, StreamPart};
use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::{Arc, Mutex};

pub fn fixture_path(name: &str) -> String {
    format!(
        "{}/tests/fixtures/openrouter/{name}",
        env!("CARGO_MANIFEST_DIR")
    )
}

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("read fixture {name}: {e}"))
        .replace("\r\n", "\n")
}

/// Split an `.sse` fixture into one chunk per event, as a server would flush.
pub fn load_sse_fixture_chunks(name: &str) -> Vec<Result<Vec<u8>, LlmError>> {
    load_fixture(name)
        .split("\n\n")
        .map(|event| event.trim_end_matches('\n'))
        .filter(|event| !event.is_empty())
        .map(|event| Ok(format!("{event}\n\n").into_bytes()))
        .collect()
}

pub async fn collect_parts(mut stream: ChatStream) -> Vec<StreamPart> {
    let mut parts = Vec::new();
    while let Some(item) = stream.next().await {
        parts.push(item.expect("stream part"));
    }
    parts
}

pub fn kinds(parts: &[StreamPart]) -> Vec<&'static str> {
    parts.iter().map(StreamPart::kind).collect()
}

/// Transport returning canned responses and recording every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    calls: Arc<Mutex<Vec<HttpTransportRequest>>>,
    json_response: Arc<Mutex<Option<(u16, Vec<u8>)>>>,
    stream_response: Arc<Mutex<Option<(u16, Vec<Result<Vec<u8>, LlmError>>)>>>,
}

impl ScriptedTransport {
    pub fn with_json(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let transport = Self::default();
        *transport.json_response.lock().expect("lock") = Some((status, body.into()));
        transport
    }

    pub fn with_stream(status: u16, chunks: Vec<Result<Vec<u8>, LlmError>>) -> Self {
        let transport = Self::default();
        *transport.stream_response.lock().expect("lock") = Some((status, chunks));
        transport
    }

    pub fn calls(&self) -> Vec<HttpTransportRequest> {
        self.calls.lock().expect("lock").clone()
    }

    fn response_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-test"));
        headers
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, LlmError> {
        self.calls.lock().expect("lock").push(request);
        let (status, body) = self
            .json_response
            .lock()
            .expect("lock")
            .clone()
            .ok_or_else(|| LlmError::InternalError("no json response scripted".into()))?;
        Ok(HttpTransportResponse {
            status,
            headers: Self::response_headers(),
            body,
        })
    }

    async fn execute_stream(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportStreamResponse, LlmError> {
        self.calls.lock().expect("lock").push(request);
        let (status, chunks) = self
            .stream_response
            .lock()
            .expect("lock")
            .take()
            .ok_or_else(|| LlmError::InternalError("no stream response scripted".into()))?;
        Ok(HttpTransportStreamResponse {
            status,
            headers: Self::response_headers(),
            body: HttpTransportStreamBody::from_stream(futures_util::stream::iter(chunks)),
        })
    }
}
