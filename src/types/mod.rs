//! Core data types shared by the request builder, the response mapper and
//! the stream transformer.

mod common;
mod content;
mod embedding;
mod finish_reason;
mod options;
mod prompt;
mod reasoning;
mod result;
mod usage;

pub use common::*;
pub use content::*;
pub use embedding::*;
pub use finish_reason::*;
pub use options::*;
pub use prompt::*;
pub use reasoning::*;
pub use result::*;
pub use usage::*;
