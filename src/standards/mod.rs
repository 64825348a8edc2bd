//! Vendor wire standards.
//!
//! Everything that knows the OpenRouter JSON shapes lives here; the
//! `provider` module only wires these pieces to a transport.

pub mod openrouter;
