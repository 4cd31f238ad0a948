//! Build toolchain invocation
//!
//! Wraps `dotnet publish` the same way the git module wraps git: one
//! command, explicit working directory, error context on failure.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Verify the build toolchain is present on PATH before any work starts.
pub fn ensure_toolchain() -> Result<()> {
    which::which("dotnet")
        .map(|_| ())
        .map_err(|_| anyhow::anyhow!("dotnet not found on PATH, install the .NET SDK to build"))
}

/// Publish a self-contained single-file release build for one platform.
///
/// Toolchain output streams straight to the console so build errors stay
/// visible. A non-zero exit is an error for this platform only; the caller
/// decides whether to continue with others.
pub fn publish(repo_root: &Path, platform: &str, version: &str) -> Result<()> {
    let version_prop = format!("-p:Version={version}");
    let args = [
        "publish",
        "-c",
        "Release",
        "-r",
        platform,
        "--self-contained",
        "true",
        "-p:PublishSingleFile=true",
        "-p:PublishTrimmed=true",
        version_prop.as_str(),
    ];

    debug!(command = %format!("dotnet {}", args.join(" ")), "running");
    let status = Command::new("dotnet")
        .args(args)
        .current_dir(repo_root)
        .status()
        .with_context(|| format!("Failed to execute: dotnet publish -r {platform}"))?;

    if !status.success() {
        bail!("Build failed for {platform}");
    }
    Ok(())
}
