//! Request and complete-response transformers for `/chat/completions`.

pub mod request;
pub mod response;

pub use request::{ChatRequestArgs, build_chat_request, convert_to_openrouter_messages, into_stream_request};
pub use response::{ResponseContext, map_chat_response};
