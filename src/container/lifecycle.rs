//! Test container lifecycle: start, logs, guaranteed cleanup

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use super::runner::{run_docker, run_docker_checked};
use crate::product::{CONFIG_MOUNT_PATH, TEST_DEVICE_ARGS};

/// How long to wait for the container to produce any startup logs.
const LOG_SETTLE_DEADLINE: Duration = Duration::from_secs(10);
const LOG_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Substrings that indicate trouble in startup logs. Matches are surfaced
/// as warnings only; they never change the run's exit code.
pub const LOG_ERROR_PATTERNS: &[&str] = &[
    "Error:",
    "Exception:",
    "Failed:",
    "Could not",
    "Unhandled exception",
];

/// Force-remove any container already holding the test name.
///
/// Destructive by design: the name is expected to be the test-scoped one
/// from `product::DEFAULT_CONTAINER_NAME`, never a production container.
/// Failure (usually "no such container") is ignored.
pub fn remove_existing(name: &str) {
    let _ = run_docker(&["rm", "-f", name]);
}

/// Start a detached container from the image with the config volume
/// mounted and the smoke-test argument passed. Returns the container id
/// printed by the runtime.
pub fn start_detached(image: &str, name: &str, config_dir: &Path) -> Result<String> {
    let volume = format!("{}:{}", config_dir.display(), CONFIG_MOUNT_PATH);

    let mut args = vec!["run", "-d", "--name", name, "-v", volume.as_str(), image];
    args.extend_from_slice(TEST_DEVICE_ARGS);

    let id = run_docker_checked(&args)
        .with_context(|| format!("Failed to start container {name} from {image}"))?;
    Ok(id)
}

/// Fetch the container's log stream, polling until output appears or the
/// settle deadline passes. A container that stays silent yields an empty
/// string, which is not an error.
pub fn capture_logs(name: &str) -> Result<String> {
    let start = Instant::now();

    loop {
        let output = run_docker(&["logs", name])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("docker logs failed for {name}: {}", stderr.trim());
        }

        // The runtime splits the container's stdout and stderr; the scan
        // wants both.
        let mut logs = String::from_utf8_lossy(&output.stdout).to_string();
        logs.push_str(&String::from_utf8_lossy(&output.stderr));

        if !logs.trim().is_empty() || start.elapsed() >= LOG_SETTLE_DEADLINE {
            return Ok(logs);
        }
        thread::sleep(LOG_POLL_INTERVAL);
    }
}

/// Scan logs for the known failure indicators, returning every pattern
/// that occurred.
pub fn scan_logs(logs: &str) -> Vec<&'static str> {
    LOG_ERROR_PATTERNS
        .iter()
        .copied()
        .filter(|pattern| logs.contains(pattern))
        .collect()
}

/// Drop guard that tears the test container down exactly once, on every
/// exit path. Armed before the pipeline starts so a failure in any stage
/// still triggers cleanup.
pub struct CleanupGuard {
    name: String,
    keep: bool,
}

impl CleanupGuard {
    pub fn new(name: String, keep: bool) -> Self {
        Self { name, keep }
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if self.keep {
            println!(
                "{}",
                format!("Keeping container running: {}", self.name).yellow()
            );
        } else {
            println!(
                "{}",
                format!("Stopping and removing container: {}", self.name).yellow()
            );
            // The container may never have started; both failures are fine
            let _ = run_docker(&["stop", &self.name]);
            let _ = run_docker(&["rm", &self.name]);
        }
        println!("{}", "Verification complete.".green());
    }
}
