//! JSON helpers.

use serde_json::{Map, Value};

/// Whether `input` is a complete JSON document.
pub fn is_parsable_json(input: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(input).is_ok()
}

/// Shallow-merge `overrides` into `target`; keys in `overrides` win.
pub fn merge_object(target: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        target.insert(key.clone(), value.clone());
    }
}

/// Remove `null` entries, leaving only fields that carry a value.
pub fn strip_nulls(map: &mut Map<String, Value>) {
    map.retain(|_, v| !v.is_null());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_objects_are_not_parsable() {
        assert!(!is_parsable_json(""));
        assert!(!is_parsable_json("{\"a"));
        assert!(!is_parsable_json("{\"a\":1"));
        assert!(is_parsable_json("{\"a\":1}"));
        assert!(is_parsable_json("{}"));
    }

    #[test]
    fn merge_overrides_existing_keys() {
        let mut target = json!({"a": 1, "b": 2}).as_object().cloned().unwrap();
        let overrides = json!({"b": 3, "c": 4}).as_object().cloned().unwrap();
        merge_object(&mut target, &overrides);
        assert_eq!(Value::Object(target), json!({"a": 1, "b": 3, "c": 4}));
    }
}
