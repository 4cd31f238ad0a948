//! Target platform identifiers and naming rules
//!
//! Platforms are plain runtime identifier strings (`win-x64`, `linux-x64`,
//! `osx-x64`). Unknown identifiers are still usable, they just carry no
//! guarantee that the toolchain knows them.

use crate::product::PRODUCT_NAME;

/// Platforms release builds are normally produced for.
pub const KNOWN_PLATFORMS: &[&str] = &["win-x64", "linux-x64", "osx-x64"];

/// Whether the identifier is one of the platforms we normally build.
pub fn is_known(platform: &str) -> bool {
    KNOWN_PLATFORMS.contains(&platform)
}

/// Whether the identifier belongs to the Windows platform family.
///
/// Windows targets get a `.exe` suffix and no executable-bit handling.
pub fn is_windows(platform: &str) -> bool {
    platform.starts_with("win-")
}

/// File extension of a built executable for the platform, `""` elsewhere.
pub fn artifact_extension(platform: &str) -> &'static str {
    if is_windows(platform) {
        ".exe"
    } else {
        ""
    }
}

/// File name a staged release artifact gets in the assets directory.
///
/// Embeds product, version, and platform so artifacts from different
/// builds never collide.
pub fn artifact_file_name(version: &str, platform: &str) -> String {
    format!(
        "{PRODUCT_NAME}_{version}_{platform}{}",
        artifact_extension(platform)
    )
}
