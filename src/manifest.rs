//! Games manifest loading and persistence.
//!
//! The manifest is a UTF-8 JSON file whose top-level value is an array of
//! game entries. Entries are kept as raw [`serde_json::Value`] objects
//! rather than a typed struct: the tool rewrites a handful of known fields
//! (`thumb`, `path`, `script`) and must pass every other field through
//! byte-for-byte, including ones it has never heard of.
//!
//! The file is read once at startup and written back exactly once at the
//! end of the run, pretty-printed with 2-space indentation. There is no
//! incremental persistence: a crash mid-run leaves the filesystem moved but
//! the manifest stale, which the next run repairs (every resolution step is
//! idempotent).

use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest must be a JSON array at the top level")]
    NotAnArray,
}

/// Load the manifest and return its entries.
///
/// The only shape requirement enforced here is "top-level value is an
/// array"; element-level checks are deferred to entry processing, where a
/// non-object element becomes an unresolved diagnostic instead of a fatal
/// error.
pub fn load(path: &Path) -> Result<Vec<Value>, ManifestError> {
    let content = fs::read_to_string(path)?;
    let data: Value = serde_json::from_str(&content)?;
    match data {
        Value::Array(entries) => Ok(entries),
        _ => Err(ManifestError::NotAnArray),
    }
}

/// Overwrite the manifest with the given entries, pretty-printed.
pub fn save(path: &Path, entries: &[Value]) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}
