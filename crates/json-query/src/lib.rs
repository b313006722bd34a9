//! Command-line access to values in JSON files.
//!
//! The key path grammar and the value coercion rules live in
//! [`json_query_path`]; this crate adds the file handling used by the
//! `json-query` binary.

pub mod json_cli;

pub use json_cli::{Action, CliError, QueryOptions};
