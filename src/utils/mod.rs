//! Utility modules for openrouter-provider

pub mod cancel;
pub mod data_url;
pub mod id;
pub mod json;
pub mod mime;

pub use cancel::*;
pub use data_url::*;
pub use id::*;
pub use json::*;
pub use mime::*;
