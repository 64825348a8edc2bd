//! Cancellation utilities
//!
//! A cancelled stream ends like a naturally finished one: the consumer sees
//! upstream closure, never a distinct "cancelled" error.

use futures::Stream;
use futures::StreamExt;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

/// End `stream` as soon as `token` is cancelled.
///
/// With no token the stream is returned unchanged.
pub fn cancellable<S>(
    stream: S,
    token: Option<CancellationToken>,
) -> Pin<Box<dyn Stream<Item = S::Item> + Send>>
where
    S: Stream + Send + 'static,
{
    match token {
        Some(token) => Box::pin(stream.take_until(token.cancelled_owned())),
        None => Box::pin(stream),
    }
}

/// Create a standalone token that can be shared across tasks.
pub fn new_abort_signal() -> CancellationToken {
    CancellationToken::new()
}
