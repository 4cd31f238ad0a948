//! Container image verification command
//! Usage: relcheck docker [--version <v>] [--image <name>] [--container-name <name>]
//!        [--config-dir <path>] [--keep-container]

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::container::daemon;
use crate::container::image::{self, ImageDetails};
use crate::container::lifecycle::{self, CleanupGuard};

/// Execute the docker command
///
/// Ordered pipeline: readiness, pull, inspect, run, log scan. The first
/// four stages are fatal on failure; log-scan matches are warnings only.
/// The cleanup guard is armed before the first stage so teardown runs on
/// every exit path unless the caller asked to keep the container.
pub fn execute(
    version: String,
    image_name: Option<String>,
    container_name: String,
    config_dir: PathBuf,
    keep_container: bool,
) -> Result<()> {
    let image_name = image_name.unwrap_or_else(|| image::default_image(&version));

    println!(
        "{}",
        format!("Verifying container image: {image_name}").yellow()
    );

    // Armed before the first fallible step so teardown runs on every path
    let _guard = CleanupGuard::new(container_name.clone(), keep_container);

    fs::create_dir_all(&config_dir).with_context(|| {
        format!("Failed to create config directory {}", config_dir.display())
    })?;
    let config_dir = config_dir.canonicalize().with_context(|| {
        format!("Failed to resolve config directory {}", config_dir.display())
    })?;

    verify_image(&image_name, &container_name, &config_dir)?;

    println!("\n{}", "Container image verification successful!".green());
    Ok(())
}

fn verify_image(image_name: &str, container_name: &str, config_dir: &Path) -> Result<()> {
    daemon::ensure_running()?;

    println!("{}", format!("Pulling image: {image_name}").yellow());
    image::pull(image_name)?;
    println!("{}", "Image pulled successfully.".green());

    println!("{}", format!("Inspecting image: {image_name}").yellow());
    let details = image::inspect(image_name)?;
    print_details(&details);

    println!(
        "{}",
        format!("Running container from image: {image_name}").yellow()
    );
    lifecycle::remove_existing(container_name);
    let container_id = lifecycle::start_detached(image_name, container_name, config_dir)?;
    println!(
        "{}",
        format!("Container started with ID: {container_id}").green()
    );

    println!("{}", "Checking container logs...".yellow());
    let logs = lifecycle::capture_logs(container_name)?;
    println!("{}", "Container logs:".blue());
    println!("{logs}");
    for pattern in lifecycle::scan_logs(&logs) {
        eprintln!(
            "{}",
            format!("Warning: found potential error in logs: '{pattern}'").yellow()
        );
    }

    Ok(())
}

fn print_details(details: &ImageDetails) {
    println!("Image ID: {}", details.id);
    println!("Created: {}", details.created.to_rfc3339());
    println!(
        "Size: {} bytes ({:.2} MB)",
        details.size,
        details.size_mib()
    );
    println!("\nImage Labels:");
    for (key, value) in details.labels() {
        println!("  {key}: {value}");
    }
}
