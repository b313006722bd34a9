//! Key path string classification.

use crate::types::{KeyPath, Segment};

/// Parse a dot/bracket key path string into segments.
///
/// The string is split on `.`; every token is classified by [`parse_segment`].
///
/// # Example
///
/// ```
/// use json_query_path::{parse_key_path, Segment};
///
/// let path = parse_key_path("backends[2].name");
/// assert_eq!(
///     path.segments(),
///     &[
///         Segment::IndexedField { name: "backends".to_string(), index: 2 },
///         Segment::Field("name".to_string()),
///     ]
/// );
/// ```
pub fn parse_key_path(path: &str) -> KeyPath {
    KeyPath::from_segments(path.split('.').map(parse_segment).collect())
}

/// Classify a single raw token.
///
/// - no `[` at all: [`Segment::Field`], taken verbatim
/// - exactly `identifier[digits]`: [`Segment::IndexedField`]
/// - anything else: [`Segment::Malformed`]
pub fn parse_segment(token: &str) -> Segment {
    if !token.contains('[') {
        return Segment::Field(token.to_string());
    }
    match split_indexed(token) {
        Some((name, index)) => Segment::IndexedField {
            name: name.to_string(),
            index,
        },
        None => Segment::Malformed(token.to_string()),
    }
}

fn split_indexed(token: &str) -> Option<(&str, usize)> {
    let body = token.strip_suffix(']')?;
    let (name, digits) = body.split_once('[')?;
    if !is_identifier(name) || !is_integer(digits) {
        return None;
    }
    // Overflowing indexes are rejected rather than clamped.
    let index = digits.parse().ok()?;
    Some((name, index))
}

/// Check if a string matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Check if a string consists only of ASCII digits.
pub fn is_integer(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}
