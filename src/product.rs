//! Fixed identity of the product under verification
//!
//! Both subcommands verify release outputs of the same upstream project,
//! so its name, registry path, and layout conventions are compiled in.

/// Identifier embedded in every built executable's file name.
pub const PRODUCT_NAME: &str = "RewindSubtitleDisplayerForPlex";

/// Version stamped into test builds when none is given.
pub const DEFAULT_VERSION: &str = "0.0.1-test";

/// Artifacts below this size are treated as truncated or empty builds.
pub const MIN_ARTIFACT_SIZE: u64 = 1_000_000;

/// Publish output root, relative to the repository root.
pub const PUBLISH_ROOT: &[&str] = &["bin", "Release", "net9.0"];

/// Directory the renamed release artifacts are staged into, relative to
/// the repository root.
pub const ASSETS_DIR: &str = "release-assets";

/// Registry path of the published container image.
pub const IMAGE_REPOSITORY: &str = "ghcr.io/thetechnetwork/plex-show-subtitles-on-rewind";

/// Image tag used when no version is given.
pub const DEFAULT_IMAGE_TAG: &str = "latest";

/// Name of the throwaway smoke-test container. Anything holding this name
/// is force-removed at the start of a run, so it must stay clearly
/// test-scoped.
pub const DEFAULT_CONTAINER_NAME: &str = "plex-subtitles-test";

/// Host directory mounted into the container, relative to the caller's
/// working directory by default.
pub const DEFAULT_CONFIG_DIR: &str = "./docker-test-config";

/// Path inside the container where it expects its config directory.
pub const CONFIG_MOUNT_PATH: &str = "/app/config";

/// Extra arguments passed to the container entrypoint for the smoke test.
pub const TEST_DEVICE_ARGS: &[&str] = &["-auth-device-name", "DockerTest"];
