//! HTTP transport abstraction.
//!
//! Models never talk to `reqwest` directly: every request goes through an
//! [`HttpTransport`], so callers can observe the final URL/headers/body or
//! return a synthetic response. [`ReqwestTransport`] is the default.

use crate::error::LlmError;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::header::HeaderMap;
use std::fmt;
use std::pin::Pin;

/// Transport-level data for a JSON POST request.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// A fully buffered response. Non-2xx statuses are returned, not raised.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, LlmError>> + Send>>;

/// Streaming response body.
pub struct HttpTransportStreamBody {
    inner: ByteStream,
}

impl HttpTransportStreamBody {
    /// A body that yields `bytes` as a single chunk.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_stream(futures::stream::once(async move { Ok(bytes) }))
    }

    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Vec<u8>, LlmError>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }

    pub fn into_stream(self) -> ByteStream {
        self.inner
    }

    /// Drain the body into memory. Used to classify error responses.
    pub async fn collect_bytes(self) -> Result<Vec<u8>, LlmError> {
        let mut stream = self.inner;
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk?);
        }
        Ok(out)
    }
}

impl fmt::Debug for HttpTransportStreamBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransportStreamBody").finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct HttpTransportStreamResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: HttpTransportStreamBody,
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, LlmError>;

    async fn execute_stream(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportStreamResponse, LlmError>;
}

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(&self, request: HttpTransportRequest) -> Result<reqwest::Response, LlmError> {
        tracing::debug!(url = %request.url, "sending openrouter request");
        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .json(&request.body)
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, LlmError> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| LlmError::HttpError(format!("Failed to read response body: {e}")))?;

        Ok(HttpTransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }

    async fn execute_stream(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportStreamResponse, LlmError> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let bytes = response.bytes_stream().map(|r| {
            r.map(|b| b.to_vec())
                .map_err(|e| LlmError::StreamError(format!("HTTP byte stream error: {e}")))
        });

        Ok(HttpTransportStreamResponse {
            status,
            headers,
            body: HttpTransportStreamBody::from_stream(bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stream_body_collects_all_chunks() {
        let body = HttpTransportStreamBody::from_stream(futures::stream::iter(vec![
            Ok(b"ab".to_vec()),
            Ok(b"cd".to_vec()),
        ]));
        assert_eq!(body.collect_bytes().await.unwrap(), b"abcd".to_vec());
    }

    #[tokio::test]
    async fn stream_body_collect_surfaces_errors() {
        let body = HttpTransportStreamBody::from_stream(futures::stream::iter(vec![
            Ok(b"ab".to_vec()),
            Err(LlmError::StreamError("reset".into())),
        ]));
        assert!(matches!(
            body.collect_bytes().await,
            Err(LlmError::StreamError(_))
        ));
    }

    #[tokio::test]
    async fn from_bytes_yields_one_chunk() {
        let mut stream = HttpTransportStreamBody::from_bytes(b"data".to_vec()).into_stream();
        assert_eq!(stream.next().await.unwrap().unwrap(), b"data".to_vec());
        assert!(stream.next().await.is_none());
    }
}
