//! Git command runner abstraction
//!
//! Provides centralized functions for running git commands with consistent
//! error handling. The build verifier only needs git to anchor every path
//! it touches to the repository root.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Run a git command and return the raw Output.
///
/// Wraps `Command::new("git")` with `current_dir` and error context.
pub fn run_git(args: &[&str], cwd: &Path) -> Result<Output> {
    debug!(command = %format!("git {}", args.join(" ")), "running");
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .with_context(|| format!("Failed to execute: git {}", args.join(" ")))
}

/// Run a git command, check for success, and return stdout as a trimmed String.
///
/// On failure, bails with the stderr content.
pub fn run_git_checked(args: &[&str], cwd: &Path) -> Result<String> {
    let output = run_git(args, cwd)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let cmd = args.first().unwrap_or(&"");
        bail!("git {cmd} failed: {stderr}");
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Resolve the repository root containing `cwd`.
///
/// All build, publish, and asset paths hang off this root; it is resolved
/// once at startup and passed down explicitly.
pub fn repo_root(cwd: &Path) -> Result<PathBuf> {
    let root = run_git_checked(&["rev-parse", "--show-toplevel"], cwd)
        .context("Not inside a git repository")?;
    Ok(PathBuf::from(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn repo_root_resolves_in_fresh_repo() {
        let temp_dir = TempDir::new().unwrap();
        run_git(&["init"], temp_dir.path()).unwrap();

        let root = repo_root(temp_dir.path()).unwrap();
        // Compare canonicalized paths, git resolves symlinks (e.g. /tmp on macOS)
        assert_eq!(
            root.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn repo_root_fails_outside_repository() {
        let temp_dir = TempDir::new().unwrap();
        // A bare temp directory has no enclosing repository
        assert!(repo_root(temp_dir.path()).is_err());
    }
}
