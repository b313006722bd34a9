use serde_json::Value;

use crate::types::{KeyPath, Segment};

/// Get a value from a JSON document by key path.
///
/// Returns `None` if any step does not resolve: a missing member, an index
/// outside the sequence, a non-sequence where an index is expected, or a
/// malformed segment. A `null` result is also reported as `None`, so a
/// missing key and a key holding `null` read the same.
pub fn get<'a>(doc: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    let mut current = Some(doc);
    for segment in path.segments() {
        let value = match current {
            Some(value) if !value.is_null() => value,
            _ => return None,
        };
        current = match segment {
            Segment::Field(name) => member(value, name),
            Segment::IndexedField { name, index } => match member(value, name) {
                Some(Value::Array(items)) => items.get(*index),
                _ => return None,
            },
            Segment::Malformed(_) => return None,
        };
    }
    current.filter(|value| !value.is_null())
}

fn member<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(name),
        _ => None,
    }
}
