//! Identifier generation for stream blocks and sources.

use std::sync::Arc;

/// Produces fresh ids. Injectable so tests can get deterministic output.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Random UUID v4 ids.
pub fn uuid_generator() -> IdGenerator {
    Arc::new(|| uuid::Uuid::new_v4().simple().to_string())
}

/// Sequential ids `{prefix}-0`, `{prefix}-1`, ...
pub fn sequential_generator(prefix: impl Into<String>) -> IdGenerator {
    use std::sync::atomic::{AtomicU64, Ordering};
    let prefix = prefix.into();
    let counter = AtomicU64::new(0);
    Arc::new(move || format!("{prefix}-{}", counter.fetch_add(1, Ordering::Relaxed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_increment() {
        let next = sequential_generator("id");
        assert_eq!(next(), "id-0");
        assert_eq!(next(), "id-1");
    }

    #[test]
    fn uuid_ids_are_unique() {
        let next = uuid_generator();
        assert_ne!(next(), next());
    }
}
