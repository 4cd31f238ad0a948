//! Locating the built executable in a publish directory
//!
//! The publish directory also contains debug symbols and config files, so
//! the executable is picked out by product name plus a platform-specific
//! filter: `.exe` extension on the Windows family, executable permission
//! bit elsewhere.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::product::PRODUCT_NAME;

/// Find the product executable under `publish_dir` for the given platform.
///
/// Returns `Ok(None)` when the directory exists but holds no matching
/// executable, so the caller can attach a directory listing to its report.
pub fn find_executable(publish_dir: &Path, platform: &str) -> Result<Option<PathBuf>> {
    if platform::is_windows(platform) {
        find_by_extension(publish_dir)
    } else {
        find_by_permission(publish_dir)
    }
}

/// Windows family: glob `*.exe` and filter by product name.
fn find_by_extension(publish_dir: &Path) -> Result<Option<PathBuf>> {
    let pattern = publish_dir.join("*.exe");
    let pattern = pattern.to_string_lossy();
    let candidates = glob::glob(&pattern)
        .with_context(|| format!("Invalid glob pattern: {pattern}"))?;

    for entry in candidates {
        let path = entry.context("Failed to read glob entry")?;
        if file_name_contains(&path, PRODUCT_NAME) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Other families: walk the tree for product-named files carrying the
/// executable permission bit.
fn find_by_permission(publish_dir: &Path) -> Result<Option<PathBuf>> {
    let mut found = Vec::new();
    walk(publish_dir, &mut found)?;
    Ok(found.into_iter().next())
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if file_name_contains(&path, PRODUCT_NAME) && has_executable_bit(&path) {
            found.push(path);
        }
    }
    Ok(())
}

fn file_name_contains(path: &Path, needle: &str) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().contains(needle))
        .unwrap_or(false)
}

#[cfg(unix)]
fn has_executable_bit(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn has_executable_bit(_path: &Path) -> bool {
    // No permission bits to consult on this host; name match is enough
    true
}

/// Entries of a directory, for the diagnostic listing printed when no
/// executable was found.
pub fn directory_listing(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"stub").unwrap();
        path
    }

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn windows_lookup_matches_product_exe() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "other-tool.exe");
        touch(temp_dir.path(), "RewindSubtitleDisplayerForPlex.pdb");
        let expected = touch(temp_dir.path(), "RewindSubtitleDisplayerForPlex.exe");

        let found = find_executable(temp_dir.path(), "win-x64").unwrap();
        assert_eq!(found, Some(expected));
    }

    #[test]
    fn windows_lookup_ignores_unrelated_exes() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "installer.exe");

        let found = find_executable(temp_dir.path(), "win-x64").unwrap();
        assert_eq!(found, None);
    }

    #[cfg(unix)]
    #[test]
    fn unix_lookup_requires_executable_bit() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "RewindSubtitleDisplayerForPlex");

        // Name matches but the bit is missing
        let found = find_executable(temp_dir.path(), "linux-x64").unwrap();
        assert_eq!(found, None);

        let binary = temp_dir.path().join("RewindSubtitleDisplayerForPlex");
        make_executable(&binary);
        let found = find_executable(temp_dir.path(), "linux-x64").unwrap();
        assert_eq!(found, Some(binary));
    }

    #[cfg(unix)]
    #[test]
    fn unix_lookup_descends_into_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("publish");
        fs::create_dir(&nested).unwrap();
        let binary = touch(&nested, "RewindSubtitleDisplayerForPlex");
        make_executable(&binary);

        let found = find_executable(temp_dir.path(), "osx-x64").unwrap();
        assert_eq!(found, Some(binary));
    }

    #[test]
    fn listing_is_sorted_names() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "b.txt");
        touch(temp_dir.path(), "a.txt");

        assert_eq!(directory_listing(temp_dir.path()), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn listing_of_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        assert!(directory_listing(&missing).is_empty());
    }
}
