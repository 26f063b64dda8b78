//! Durable local storage for the replica: one keyed JSON blob holding the
//! serialized issue sequence.
//!
//! Loading never fails the caller: a missing file, unreadable file, or
//! malformed blob all yield an empty replica. Corruption is logged and
//! discarded — startup must not be blocked by a bad blob.

use std::fs;
use std::io;
use std::path::Path;

use tracing::warn;

use crate::error::ErrorCode;
use crate::model::Issue;

/// Errors from writing the replica blob.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("replica write failed: {0}")]
    Io(#[from] io::Error),

    #[error("replica encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Read the persisted issue sequence from `path`.
#[must_use]
pub fn load(path: &Path) -> Vec<Issue> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(error) => {
            warn!(
                code = %ErrorCode::ReplicaBlobMalformed.code(),
                %error,
                path = %path.display(),
                "replica blob unreadable; starting empty"
            );
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(issues) => issues,
        Err(error) => {
            warn!(
                code = %ErrorCode::ReplicaBlobMalformed.code(),
                %error,
                path = %path.display(),
                "discarding malformed replica blob"
            );
            Vec::new()
        }
    }
}

/// Write the issue sequence to `path`, creating parent directories as needed.
pub fn save(path: &Path, issues: &[Issue]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let blob = serde_json::to_string_pretty(issues)?;
    fs::write(path, blob)?;
    Ok(())
}
