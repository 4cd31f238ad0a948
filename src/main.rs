use anyhow::Result;
use clap::{Parser, Subcommand};
use relcheck::commands::{build, docker};
use relcheck::{platform, product};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relcheck")]
#[command(about = "Release artifact and container image verification CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build platform executables and validate the staged release assets
    Build {
        /// Version to stamp into the builds
        #[arg(long, default_value = product::DEFAULT_VERSION)]
        version: String,

        /// Platforms to build for
        #[arg(long, num_args = 1.., default_values_t = platform::KNOWN_PLATFORMS.iter().map(|p| p.to_string()))]
        platforms: Vec<String>,
    },

    /// Pull, inspect, and smoke-test the published container image
    Docker {
        /// Image version tag to verify
        #[arg(long, default_value = product::DEFAULT_IMAGE_TAG)]
        version: String,

        /// Full image reference (default: the product registry path plus the version tag)
        #[arg(long)]
        image: Option<String>,

        /// Name for the throwaway test container
        #[arg(long, default_value = product::DEFAULT_CONTAINER_NAME)]
        container_name: String,

        /// Host directory mounted as the container's config volume
        #[arg(long, default_value = product::DEFAULT_CONFIG_DIR)]
        config_dir: PathBuf,

        /// Leave the test container running after verification
        #[arg(long)]
        keep_container: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RELCHECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { version, platforms } => build::execute(version, platforms),
        Commands::Docker {
            version,
            image,
            container_name,
            config_dir,
            keep_container,
        } => docker::execute(version, image, container_name, config_dir, keep_container),
    }
}
