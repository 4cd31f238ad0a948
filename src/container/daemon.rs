//! Container runtime readiness
//!
//! Pings the daemon with `docker info`; when it is down, attempts one
//! start and polls for readiness with backoff instead of a single fixed
//! sleep, so a slow daemon start does not flake the whole run.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs::File;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::runner::run_docker_bool;

/// How long to keep polling after a daemon start attempt.
const READY_DEADLINE: Duration = Duration::from_secs(15);

/// Initial poll interval; doubles up to `MAX_POLL_INTERVAL`.
const POLL_INTERVAL: Duration = Duration::from_millis(500);
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Check the daemon is reachable, starting it once if it is not.
///
/// Unrecoverable failure here is fatal for the whole run; nothing is
/// pulled against a dead daemon.
pub fn ensure_running() -> Result<()> {
    which::which("docker")
        .map_err(|_| anyhow::anyhow!("docker not found on PATH, install a container runtime"))?;

    println!("{}", "Checking if the container runtime is running...".yellow());
    if ping() {
        println!("{}", "Container runtime is running.".green());
        return Ok(());
    }

    eprintln!(
        "{}",
        "Warning: container runtime is not running, attempting to start it".yellow()
    );
    start_daemon()?;

    if wait_until_ready(READY_DEADLINE) {
        println!("{}", "Container runtime is running.".green());
        Ok(())
    } else {
        bail!(
            "Container runtime still unreachable {}s after the start attempt, start it manually",
            READY_DEADLINE.as_secs()
        )
    }
}

fn ping() -> bool {
    run_docker_bool(&["info"])
}

/// Spawn the daemon in the background, output redirected to a log file
/// under the system temp directory.
fn start_daemon() -> Result<()> {
    let log_path = std::env::temp_dir().join("dockerd-start.log");
    let stdout = File::create(&log_path)
        .with_context(|| format!("Failed to create daemon log at {}", log_path.display()))?;
    let stderr = stdout
        .try_clone()
        .context("Failed to clone daemon log handle")?;

    Command::new("sudo")
        .arg("dockerd")
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .spawn()
        .context("Failed to spawn dockerd")?;

    println!("Waiting for the runtime to start (log: {})", log_path.display());
    Ok(())
}

/// Poll the daemon until it answers or the deadline passes.
fn wait_until_ready(deadline: Duration) -> bool {
    let start = Instant::now();
    let mut interval = POLL_INTERVAL;

    while start.elapsed() < deadline {
        thread::sleep(interval);
        if ping() {
            return true;
        }
        interval = (interval * 2).min(MAX_POLL_INTERVAL);
    }
    false
}
