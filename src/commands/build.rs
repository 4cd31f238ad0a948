//! Build-asset verification command
//! Usage: relcheck build [--version <v>] [--platforms <p>...]

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::assets::{locate, publish, stage, validate, BuildReport, PlatformOutcome};
use crate::git;
use crate::platform;
use crate::product::{ASSETS_DIR, PUBLISH_ROOT};

/// Directories the whole pass hangs off. Resolved once at startup and
/// passed down explicitly; no step re-derives them ambiently.
struct BuildPaths {
    repo_root: PathBuf,
    publish_root: PathBuf,
    assets_dir: PathBuf,
}

impl BuildPaths {
    fn new(repo_root: PathBuf) -> Self {
        let publish_root = PUBLISH_ROOT
            .iter()
            .fold(repo_root.clone(), |path, part| path.join(part));
        let assets_dir = repo_root.join(ASSETS_DIR);
        Self {
            repo_root,
            publish_root,
            assets_dir,
        }
    }
}

/// Execute the build command
///
/// Builds, stages, and validates one artifact per requested platform.
/// A platform failing any step fails the aggregate but never stops the
/// remaining platforms.
pub fn execute(version: String, platforms: Vec<String>) -> Result<()> {
    publish::ensure_toolchain()?;
    warn_on_loose_version(&version);

    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    let paths = BuildPaths::new(git::repo_root(&cwd)?);

    fs::create_dir_all(&paths.assets_dir).with_context(|| {
        format!(
            "Failed to create assets directory {}",
            paths.assets_dir.display()
        )
    })?;

    println!(
        "{}",
        format!("Verifying build assets for version {version}").yellow()
    );

    let mut report = BuildReport::default();
    for platform_name in &platforms {
        if !platform::is_known(platform_name) {
            eprintln!(
                "{}",
                format!("Warning: unknown platform {platform_name}").yellow()
            );
        }

        match verify_platform(platform_name, &version, &paths) {
            Ok(artifact) => report.push(PlatformOutcome::passed(platform_name.clone(), artifact)),
            Err(e) => {
                eprintln!("{}", format!("ERROR: {e:#}").red());
                report.push(PlatformOutcome::failed(platform_name.clone(), format!("{e:#}")));
            }
        }
    }

    if report.all_passed() {
        println!("\n{}", "All build assets verified successfully!".green());
        println!(
            "Release assets are available in: {}",
            paths.assets_dir.display()
        );
        for item in locate::directory_listing(&paths.assets_dir) {
            println!("  {item}");
        }
        Ok(())
    } else {
        println!(
            "\n{}",
            "Verification failed for one or more platforms".red()
        );
        bail!(
            "verification failed for: {}",
            report.failed_platforms().join(", ")
        )
    }
}

/// Run the publish, locate, stage, validate sequence for one platform.
fn verify_platform(platform_name: &str, version: &str, paths: &BuildPaths) -> Result<PathBuf> {
    println!("\n{}", format!("Building for {platform_name}...").yellow());
    publish::publish(&paths.repo_root, platform_name, version)?;

    let publish_dir = paths.publish_root.join(platform_name).join("publish");
    let executable = match locate::find_executable(&publish_dir, platform_name)? {
        Some(path) => path,
        None => {
            println!("Contents of publish directory:");
            for item in locate::directory_listing(&publish_dir) {
                println!("  {item}");
            }
            bail!(
                "Could not find executable for {platform_name} in {}",
                publish_dir.display()
            );
        }
    };
    println!("Found executable: {}", executable.display());

    let staged = stage::stage_artifact(&executable, &paths.assets_dir, version, platform_name)?;

    print!("Checking {platform_name} executable: ");
    match validate::validate_artifact(&staged, platform_name) {
        Ok(()) => {
            println!("{}", "PASSED".green());
            Ok(staged)
        }
        Err(reason) => {
            println!("{}", format!("FAILED - {reason}").red());
            bail!("{platform_name} artifact failed validation: {reason}")
        }
    }
}

/// A version that does not parse as semver is suspicious but not fatal;
/// the toolchain accepts arbitrary version strings.
fn warn_on_loose_version(version: &str) {
    if semver::Version::parse(version).is_err() {
        eprintln!(
            "{}",
            format!("Warning: '{version}' is not a semantic version").yellow()
        );
    }
}
