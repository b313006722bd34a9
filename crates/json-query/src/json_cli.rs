//! `json-cli` — read or update a value in a JSON file by key path.
//!
//! Provides the core logic used by the `json-query` binary:
//! - string-level lookup and update of a document
//! - the file workflow around an update (backup, write back, cleanup)

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use json_query_path::{get_by_path, set_by_path, PathError};
use log::{debug, info, warn};
use serde_json::Value;
use thiserror::Error;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Key not found: {0}")]
    KeyNotFound(String),
    #[error("Failed to set value: {key}")]
    SetFailed {
        key: String,
        #[source]
        source: PathError,
    },
    #[error("--set requires a value")]
    MissingValue,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ── Options ───────────────────────────────────────────────────────────────

/// What to do with the key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Get,
    /// Set the raw value, coerced by the path engine.
    Set(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Keep the backup file after a successful update.
    pub keep_backup: bool,
    /// Appended to the file name to form the backup file name.
    pub backup_suffix: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            keep_backup: false,
            backup_suffix: ".bak".to_string(),
        }
    }
}

// ── Documents ─────────────────────────────────────────────────────────────

/// Render a found value for the terminal.
///
/// Mappings and sequences are pretty-printed JSON, strings are printed
/// without quotes, other scalars in their JSON form.
pub fn render_value(value: &Value) -> Result<String, CliError> {
    match value {
        Value::Object(_) | Value::Array(_) => Ok(serde_json::to_string_pretty(value)?),
        Value::String(s) => Ok(s.clone()),
        other => Ok(other.to_string()),
    }
}

/// Look up a key path in a parsed document and render the value.
pub fn lookup(doc: &Value, key: &str) -> Result<String, CliError> {
    match get_by_path(doc, key) {
        Some(value) => render_value(value),
        None => Err(CliError::KeyNotFound(key.to_string())),
    }
}

/// Set a key path in a parsed document and serialize the result.
///
/// Returns the updated document as pretty-printed JSON with a trailing
/// newline. On failure the document may hold containers created before the
/// failing segment, so callers should discard it.
pub fn update(doc: &mut Value, key: &str, raw: &str) -> Result<String, CliError> {
    set_by_path(doc, key, raw).map_err(|source| CliError::SetFailed {
        key: key.to_string(),
        source,
    })?;
    let mut out = serde_json::to_string_pretty(doc)?;
    out.push('\n');
    Ok(out)
}

/// Look up a key path in a document.
///
/// `doc_json`: the document as a JSON string.
/// `key`: the key path (e.g., `backends[0].name`).
///
/// Returns the rendered value (see [`render_value`]).
pub fn lookup_key(doc_json: &str, key: &str) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    lookup(&doc, key)
}

/// Set a key path in a document given as a JSON string.
pub fn update_key(doc_json: &str, key: &str, raw: &str) -> Result<String, CliError> {
    let mut doc: Value = serde_json::from_str(doc_json)?;
    update(&mut doc, key, raw)
}

// ── Files ─────────────────────────────────────────────────────────────────

/// Path of the backup written next to `file` while an update is in flight.
pub fn backup_path(file: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Run an action against a JSON file.
///
/// Returns the text to print on success: the rendered value for
/// [`Action::Get`], a confirmation line for [`Action::Set`].
///
/// For a set, the original content is copied to the backup file first. The
/// backup is removed once the file is written, or when the set itself fails
/// (the file is left untouched). If writing the file fails, the backup is
/// kept.
pub fn run(
    file: &Path,
    key: &str,
    action: &Action,
    options: &QueryOptions,
) -> Result<String, CliError> {
    if !file.exists() {
        return Err(CliError::FileNotFound(file.to_path_buf()));
    }
    let content = fs::read_to_string(file)?;
    // Parse errors surface before any backup is written.
    let mut doc: Value = serde_json::from_str(&content)?;

    match action {
        Action::Get => {
            debug!("get `{key}` from {}", file.display());
            lookup(&doc, key)
        }
        Action::Set(raw) => {
            if raw.is_empty() {
                return Err(CliError::MissingValue);
            }
            debug!("set `{key}` = `{raw}` in {}", file.display());

            let backup = backup_path(file, &options.backup_suffix);
            fs::write(&backup, &content)?;
            info!("backup written to {}", backup.display());

            let updated = match update(&mut doc, key, raw) {
                Ok(updated) => updated,
                Err(e) => {
                    fs::remove_file(&backup)?;
                    return Err(e);
                }
            };

            if let Err(e) = fs::write(file, updated) {
                warn!("write failed, original content kept at {}", backup.display());
                return Err(e.into());
            }

            if !options.keep_backup {
                fs::remove_file(&backup)?;
            }
            Ok(format!("✅ Set {key} = {raw}"))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
