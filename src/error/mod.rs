//! Error handling types for openrouter-provider.
//!
//! - `LlmError`, the single error enum returned by every fallible operation
//! - `ErrorCategory`, a coarse classification used for retry decisions
//! - conversions from common dependency errors

mod conversions;
pub mod types;

pub use types::*;
