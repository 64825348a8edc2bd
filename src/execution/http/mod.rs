//! HTTP plumbing: header construction and the injectable transport.

pub mod headers;
pub mod transport;

pub use headers::*;
pub use transport::*;
