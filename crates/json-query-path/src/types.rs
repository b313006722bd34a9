//! Type definitions for key paths.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A single navigation step of a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Member access by name: `name`.
    Field(String),
    /// Member access followed by positional access: `name[3]`.
    IndexedField { name: String, index: usize },
    /// A raw token with bracket syntax that is not `identifier[digits]`.
    ///
    /// Kept in the path so that reads fail with "not found" and writes fail
    /// at the position where the token occurs.
    Malformed(String),
}

impl Segment {
    /// Name of the mapping member this step accesses, if well formed.
    pub fn name(&self) -> Option<&str> {
        match self {
            Segment::Field(name) | Segment::IndexedField { name, .. } => Some(name.as_str()),
            Segment::Malformed(_) => None,
        }
    }

    /// Position within the sequence, for indexed steps.
    pub fn index(&self) -> Option<usize> {
        match self {
            Segment::IndexedField { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Segment::Malformed(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::IndexedField { name, index } => write!(f, "{name}[{index}]"),
            Segment::Malformed(raw) => f.write_str(raw),
        }
    }
}

/// A parsed dot/bracket key path such as `backends[0].config.timeout`.
///
/// Paths parsed from a string always contain at least one segment; the empty
/// string parses to a single `Field("")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Parse a path string. See [`crate::parse_key_path`].
    pub fn parse(path: &str) -> Self {
        crate::parse::parse_key_path(path)
    }

    /// Build a path from already classified segments.
    ///
    /// An empty segment list addresses the document root.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The raw text of the first malformed segment, if any.
    pub fn first_malformed(&self) -> Option<&str> {
        self.segments.iter().find_map(|segment| match segment {
            Segment::Malformed(raw) => Some(raw.as_str()),
            _ => None,
        })
    }

    pub fn is_well_formed(&self) -> bool {
        self.first_malformed().is_none()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}
