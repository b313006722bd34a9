use log::{debug, trace};
use serde_json::{Map, Value};

use crate::coerce::coerce_value;
use crate::types::{KeyPath, Segment};
use crate::PathError;

/// Largest sequence length `set` will pad up to.
pub const MAX_SEQUENCE_LEN: usize = 1 << 16;

/// Set a value in a JSON document by key path, coercing the raw string
/// first (see [`coerce_value`]).
pub fn set(doc: &mut Value, path: &KeyPath, raw: &str) -> Result<(), PathError> {
    set_value(doc, path, coerce_value(raw))
}

/// Set an already typed value in a JSON document by key path.
///
/// Missing intermediate containers are created. A container of the wrong
/// kind is replaced: a non-mapping where a member is accessed becomes `{}`,
/// a non-sequence where an index is used becomes `[]`. Sequences are padded
/// with `{}` up to the requested index.
///
/// # Errors
///
/// - `PathError::MalformedSegment` if a segment is malformed. Containers
///   created for the segments before it are left in the document.
/// - `PathError::IndexTooLarge` if an index would pad a sequence beyond
///   [`MAX_SEQUENCE_LEN`]. The sequence at that segment is left untouched.
/// - `PathError::EmptyPath` if the path has no segments.
pub fn set_value(doc: &mut Value, path: &KeyPath, value: Value) -> Result<(), PathError> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(PathError::EmptyPath);
    };

    let mut current = doc;
    for segment in parents {
        current = descend(current, segment)?;
    }

    match last {
        Segment::Field(name) => {
            as_mapping(current).insert(name.clone(), value);
        }
        Segment::IndexedField { name, index } => {
            *element(current, name, *index)? = value;
        }
        Segment::Malformed(raw) => return Err(PathError::MalformedSegment(raw.clone())),
    }
    Ok(())
}

fn descend<'a>(current: &'a mut Value, segment: &Segment) -> Result<&'a mut Value, PathError> {
    match segment {
        Segment::Field(name) => {
            let child = as_mapping(current)
                .entry(name.clone())
                .or_insert(Value::Null);
            if !child.is_object() {
                trace!("creating mapping at `{name}`");
                *child = Value::Object(Map::new());
            }
            Ok(child)
        }
        Segment::IndexedField { name, index } => element(current, name, *index),
        Segment::Malformed(raw) => Err(PathError::MalformedSegment(raw.clone())),
    }
}

/// Resolve `current[name][index]`, creating the sequence and padding it.
fn element<'a>(
    current: &'a mut Value,
    name: &str,
    index: usize,
) -> Result<&'a mut Value, PathError> {
    let existing = current.get(name).and_then(Value::as_array).map_or(0, Vec::len);
    if index >= existing && index >= MAX_SEQUENCE_LEN {
        return Err(PathError::IndexTooLarge {
            index,
            max: MAX_SEQUENCE_LEN,
        });
    }

    let slot = as_mapping(current)
        .entry(name.to_string())
        .or_insert(Value::Null);
    let items = as_sequence(slot, name);
    if items.len() <= index {
        trace!("padding `{name}` from {} to {} elements", items.len(), index + 1);
        items.resize_with(index + 1, || Value::Object(Map::new()));
    }
    Ok(&mut items[index])
}

fn as_mapping(value: &mut Value) -> &mut Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            if !other.is_null() {
                debug!("replacing non-mapping value with an empty mapping");
            }
            *other = Value::Object(Map::new());
            as_mapping(other)
        }
    }
}

fn as_sequence<'a>(value: &'a mut Value, name: &str) -> &'a mut Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => {
            if !other.is_null() {
                debug!("replacing non-sequence value at `{name}` with an empty sequence");
            }
            *other = Value::Array(Vec::new());
            as_sequence(other, name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get::get;
    use serde_json::json;

    fn path(s: &str) -> KeyPath {
        KeyPath::parse(s)
    }

    #[test]
    fn test_set_top_level() {
        let mut doc = json!({});
        set(&mut doc, &path("enabled"), "true").unwrap();
        assert_eq!(doc, json!({"enabled": true}));
    }

    #[test]
    fn test_set_creates_intermediate_mappings() {
        let mut doc = json!({"settings": {"keep": 1}});
        set(&mut doc, &path("settings.network.timeout"), "300").unwrap();
        assert_eq!(
            doc,
            json!({"settings": {"keep": 1, "network": {"timeout": 300}}})
        );
    }

    #[test]
    fn test_set_overwrites_existing_leaf() {
        let mut doc = json!({"a": {"b": [1, 2]}});
        set(&mut doc, &path("a.b"), "\"x\"").unwrap();
        assert_eq!(doc, json!({"a": {"b": "x"}}));
    }

    #[test]
    fn test_set_scalar_intermediate_becomes_mapping() {
        let mut doc = json!({"a": 1});
        set(&mut doc, &path("a.b"), "5").unwrap();
        assert_eq!(doc, json!({"a": {"b": 5}}));
    }

    #[test]
    fn test_set_sequence_intermediate_becomes_mapping() {
        let mut doc = json!({"a": [1, 2]});
        set(&mut doc, &path("a.b"), "5").unwrap();
        assert_eq!(doc, json!({"a": {"b": 5}}));
    }

    #[test]
    fn test_set_pads_with_empty_mappings() {
        let mut doc = json!({});
        set(&mut doc, &path("backends[2].name"), "\"mock\"").unwrap();
        assert_eq!(doc, json!({"backends": [{}, {}, {"name": "mock"}]}));
    }

    #[test]
    fn test_set_indexed_leaf() {
        let mut doc = json!({});
        set(&mut doc, &path("ports[1]"), "8080").unwrap();
        assert_eq!(doc, json!({"ports": [{}, 8080]}));

        set(&mut doc, &path("ports[0]"), "80").unwrap();
        assert_eq!(doc, json!({"ports": [80, 8080]}));
    }

    #[test]
    fn test_set_indexed_keeps_existing_elements() {
        let mut doc = json!({"backends": [{"name": "a", "enabled": false}]});
        set(&mut doc, &path("backends[0].enabled"), "true").unwrap();
        assert_eq!(doc, json!({"backends": [{"name": "a", "enabled": true}]}));
    }

    #[test]
    fn test_set_non_sequence_replaced_for_index() {
        let mut doc = json!({"a": {"x": 1}});
        set(&mut doc, &path("a[0].y"), "2").unwrap();
        assert_eq!(doc, json!({"a": [{"y": 2}]}));
    }

    #[test]
    fn test_set_scalar_element_becomes_mapping() {
        let mut doc = json!({"a": [1, 2]});
        set(&mut doc, &path("a[0].b"), "x").unwrap();
        assert_eq!(doc, json!({"a": [{"b": "x"}, 2]}));
    }

    #[test]
    fn test_set_non_mapping_root_becomes_mapping() {
        let mut doc = json!([1, 2]);
        set(&mut doc, &path("a"), "1").unwrap();
        assert_eq!(doc, json!({"a": 1}));

        let mut doc = Value::Null;
        set(&mut doc, &path("a.b"), "1").unwrap();
        assert_eq!(doc, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_set_malformed_leaf_leaves_document() {
        let mut doc = json!({"a": [1, 2]});
        let err = set(&mut doc, &path("a[x]"), "1").unwrap_err();
        assert_eq!(err, PathError::MalformedSegment("a[x]".to_string()));
        assert_eq!(doc, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_set_malformed_leaf_on_scalar_root() {
        let mut doc = json!(5);
        assert!(set(&mut doc, &path("a[x]"), "1").is_err());
        assert_eq!(doc, json!(5));
    }

    #[test]
    fn test_set_malformed_intermediate_keeps_created_containers() {
        // No rollback: earlier segments stay created after the failure.
        let mut doc = json!({});
        let err = set(&mut doc, &path("a.b[x].c"), "1").unwrap_err();
        assert_eq!(err, PathError::MalformedSegment("b[x]".to_string()));
        assert_eq!(doc, json!({"a": {}}));
    }

    #[test]
    fn test_set_malformed_first_segment_is_untouched() {
        let mut doc = json!({"a": 1});
        assert!(set(&mut doc, &path("a[1][2].b"), "1").is_err());
        assert_eq!(doc, json!({"a": 1}));
    }

    #[test]
    fn test_set_index_at_usize_max() {
        let mut doc = json!({});
        let err = set(&mut doc, &path("a[18446744073709551615]"), "1").unwrap_err();
        assert_eq!(
            err,
            PathError::IndexTooLarge {
                index: usize::MAX,
                max: MAX_SEQUENCE_LEN,
            }
        );
        assert_eq!(doc, json!({}));
    }

    #[test]
    fn test_set_index_beyond_padding_limit() {
        let mut doc = json!({"a": [1, 2]});
        let err = set(&mut doc, &path("a[1152921504606846975].b"), "1").unwrap_err();
        assert!(matches!(err, PathError::IndexTooLarge { .. }));
        assert_eq!(doc, json!({"a": [1, 2]}));

        assert!(set(&mut doc, &path(&format!("a[{MAX_SEQUENCE_LEN}]")), "1").is_err());
        assert_eq!(doc, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_set_index_limit_keeps_earlier_containers() {
        let mut doc = json!({});
        assert!(set(&mut doc, &path("x.a[99999999].b"), "1").is_err());
        assert_eq!(doc, json!({"x": {}}));
    }

    #[test]
    fn test_set_last_index_below_limit() {
        let mut doc = json!({});
        let last = MAX_SEQUENCE_LEN - 1;
        set(&mut doc, &path(&format!("a[{last}]")), "1").unwrap();
        let items = doc["a"].as_array().unwrap();
        assert_eq!(items.len(), MAX_SEQUENCE_LEN);
        assert_eq!(items[last], json!(1));
    }

    #[test]
    fn test_set_empty_key() {
        let mut doc = json!({});
        set(&mut doc, &path(""), "v").unwrap();
        assert_eq!(doc, json!({"": "v"}));
    }

    #[test]
    fn test_set_empty_path() {
        let mut doc = json!({"a": 1});
        let err = set(&mut doc, &KeyPath::from_segments(vec![]), "1").unwrap_err();
        assert_eq!(err, PathError::EmptyPath);
        assert_eq!(doc, json!({"a": 1}));
    }

    #[test]
    fn test_set_value_typed() {
        let mut doc = json!({});
        set_value(&mut doc, &path("list[0]"), json!({"k": [1]})).unwrap();
        assert_eq!(doc, json!({"list": [{"k": [1]}]}));
    }

    #[test]
    fn test_set_preserves_member_order() {
        let mut doc = json!({"z": 1, "a": 2});
        set(&mut doc, &path("m"), "3").unwrap();
        set(&mut doc, &path("z"), "4").unwrap();
        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_set_then_get() {
        let mut doc = json!({});
        for (p, raw, expected) in [
            ("a.b", "true", json!(true)),
            ("a.c", "false", json!(false)),
            ("n[1].x", "42", json!(42)),
            ("f", "-3.14", json!(-3.14)),
            ("s", "\"hello\"", json!("hello")),
            ("t", "hello", json!("hello")),
        ] {
            set(&mut doc, &path(p), raw).unwrap();
            assert_eq!(get(&doc, &path(p)), Some(&expected), "path {p}");
        }
    }
}
