//! Staging located executables into the release-assets directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;

/// Copy a located executable into `assets_dir` under its release name.
///
/// Non-Windows artifacts get mode `0755`; the copy does not preserve the
/// source permissions reliably across filesystems, so the bit is set
/// explicitly.
pub fn stage_artifact(
    source: &Path,
    assets_dir: &Path,
    version: &str,
    platform: &str,
) -> Result<PathBuf> {
    let target = assets_dir.join(platform::artifact_file_name(version, platform));

    fs::copy(source, &target).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            target.display()
        )
    })?;

    if !platform::is_windows(platform) {
        set_executable(&target)?;
    }

    Ok(target)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn staged_artifact_gets_release_name() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("RewindSubtitleDisplayerForPlex.exe");
        fs::write(&source, b"binary").unwrap();
        let assets = temp_dir.path().join("release-assets");
        fs::create_dir(&assets).unwrap();

        let target = stage_artifact(&source, &assets, "1.2.3", "win-x64").unwrap();

        assert_eq!(
            target,
            assets.join("RewindSubtitleDisplayerForPlex_1.2.3_win-x64.exe")
        );
        assert_eq!(fs::read(&target).unwrap(), b"binary");
    }

    #[cfg(unix)]
    #[test]
    fn staged_unix_artifact_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("RewindSubtitleDisplayerForPlex");
        fs::write(&source, b"binary").unwrap();
        let assets = temp_dir.path().join("release-assets");
        fs::create_dir(&assets).unwrap();

        let target = stage_artifact(&source, &assets, "1.2.3", "linux-x64").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o755, 0o755);
    }

    #[test]
    fn staging_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = stage_artifact(&missing, temp_dir.path(), "1.2.3", "linux-x64");
        assert!(result.is_err());
    }
}
