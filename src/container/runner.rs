//! Docker command runner abstraction
//!
//! Provides centralized functions for running docker commands with
//! consistent error handling, reducing boilerplate across the pipeline.

use anyhow::{bail, Context, Result};
use std::process::{Command, Output};
use tracing::debug;

/// Run a docker command and return the raw Output.
///
/// Use this when you need access to both stdout and stderr, or when a
/// non-zero exit is acceptable.
pub fn run_docker(args: &[&str]) -> Result<Output> {
    debug!(command = %format!("docker {}", args.join(" ")), "running");
    Command::new("docker")
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute: docker {}", args.join(" ")))
}

/// Run a docker command, check for success, and return stdout as a
/// trimmed String. On failure, bails with the stderr content.
pub fn run_docker_checked(args: &[&str]) -> Result<String> {
    let output = run_docker(args)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let cmd = args.first().unwrap_or(&"");
        bail!("docker {cmd} failed: {}", stderr.trim());
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a docker command and return true if exit code is 0.
///
/// Silently swallows errors (both spawn failures and non-zero exits).
/// Use this for status checks like the daemon ping.
pub fn run_docker_bool(args: &[&str]) -> bool {
    run_docker(args)
        .map(|output| output.status.success())
        .unwrap_or(false)
}
