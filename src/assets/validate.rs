//! Staged artifact validation
//!
//! Three checks: the file exists, it meets the minimum size (a proxy for
//! "not a truncated or empty build"), and on non-Windows targets it
//! carries the executable permission bit.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::platform;
use crate::product::MIN_ARTIFACT_SIZE;

/// Reason a staged artifact failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("file not found")]
    Missing,

    #[error("file too small ({size} bytes, minimum {minimum})")]
    TooSmall { size: u64, minimum: u64 },

    #[error("file not executable")]
    NotExecutable,
}

/// Validate a staged artifact for the given target platform.
pub fn validate_artifact(path: &Path, platform: &str) -> Result<(), ArtifactError> {
    let metadata = match fs::metadata(path) {
        Ok(m) if m.is_file() => m,
        _ => return Err(ArtifactError::Missing),
    };

    let size = metadata.len();
    if size < MIN_ARTIFACT_SIZE {
        return Err(ArtifactError::TooSmall {
            size,
            minimum: MIN_ARTIFACT_SIZE,
        });
    }

    if !platform::is_windows(platform) && !is_executable(&metadata) {
        return Err(ArtifactError::NotExecutable);
    }

    Ok(())
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    // Cannot consult permission bits on this host; size check already ran
    true
}
