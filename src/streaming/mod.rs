//! Streaming Module
//!
//! - `StreamPart`, the normalized event vocabulary
//! - `ParseResult`, typed chunk validation that keeps the raw payload
//! - SSE `data:` extraction over a byte stream

mod parse;
mod sse;
mod stream_part;

pub use parse::*;
pub use sse::*;
pub use stream_part::*;

use crate::error::LlmError;
use futures::Stream;
use std::pin::Pin;

/// Stream of normalized parts. An `Err` item is terminal.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<StreamPart, LlmError>> + Send>>;

/// A started stream together with what was sent and the response headers.
pub struct StreamResult {
    pub stream: ChatStream,
    pub request: crate::types::RequestInfo,
    pub response_headers: std::collections::HashMap<String, String>,
}

impl std::fmt::Debug for StreamResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResult")
            .field("request", &self.request)
            .field("response_headers", &self.response_headers)
            .finish_non_exhaustive()
    }
}
