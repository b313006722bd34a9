//! Dot/bracket key paths for nested JSON documents.
//!
//! A key path is a `.`-separated list of member names, where a member may be
//! followed by one `[index]` to address an element of a sequence:
//! `backends[0].config.timeout`.
//!
//! # Example
//!
//! ```
//! use json_query_path::{get_by_path, set_by_path};
//! use serde_json::json;
//!
//! let mut doc = json!({"backends": [{"name": "opencode"}]});
//! assert_eq!(get_by_path(&doc, "backends[0].name"), Some(&json!("opencode")));
//!
//! set_by_path(&mut doc, "backends[0].enabled", "true").unwrap();
//! assert_eq!(doc, json!({"backends": [{"name": "opencode", "enabled": true}]}));
//! ```

use serde_json::Value;
use thiserror::Error;

pub mod types;
pub use types::{KeyPath, Segment};

pub mod parse;
pub use parse::{is_identifier, is_integer, parse_key_path, parse_segment};

pub mod coerce;
pub use coerce::coerce_value;

mod get;
pub use get::get;

mod set;
pub use set::{set, set_value, MAX_SEQUENCE_LEN};

/// Get a value by path string.
///
/// Convenience wrapper that parses `path` and calls [`get`].
///
/// # Example
///
/// ```
/// use json_query_path::get_by_path;
/// use serde_json::json;
///
/// let doc = json!({"a": [1, 2, 3]});
/// assert_eq!(get_by_path(&doc, "a[1]"), Some(&json!(2)));
/// assert_eq!(get_by_path(&doc, "a[5]"), None);
/// ```
pub fn get_by_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    get(doc, &KeyPath::parse(path))
}

/// Set a raw string value by path string.
///
/// Convenience wrapper that parses `path` and calls [`set`].
///
/// # Example
///
/// ```
/// use json_query_path::set_by_path;
/// use serde_json::json;
///
/// let mut doc = json!({});
/// set_by_path(&mut doc, "backends[2].name", "\"mock\"").unwrap();
/// assert_eq!(doc, json!({"backends": [{}, {}, {"name": "mock"}]}));
/// ```
pub fn set_by_path(doc: &mut Value, path: &str, raw: &str) -> Result<(), PathError> {
    set(doc, &KeyPath::parse(path), raw)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("malformed path segment: {0}")]
    MalformedSegment(String),
    #[error("index {index} exceeds the sequence limit of {max}")]
    IndexTooLarge { index: usize, max: usize },
    #[error("empty path")]
    EmptyPath,
}
