//! Image pull and metadata inspection

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

use super::runner::run_docker_checked;
use crate::product::IMAGE_REPOSITORY;

/// Image reference used when the caller gives only a version tag.
pub fn default_image(version: &str) -> String {
    format!("{IMAGE_REPOSITORY}:{version}")
}

/// Fetch the image. Any non-zero exit from the pull is fatal.
pub fn pull(image: &str) -> Result<()> {
    run_docker_checked(&["pull", image])
        .with_context(|| format!("Failed to pull image {image}"))?;
    Ok(())
}

/// Subset of `docker inspect` output the verification cares about.
///
/// The inspect format is a stable contract; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageDetails {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Created")]
    pub created: DateTime<Utc>,
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "Config", default)]
    pub config: ImageConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageConfig {
    #[serde(rename = "Labels", default)]
    pub labels: Option<BTreeMap<String, String>>,
}

impl ImageDetails {
    /// Image size in MiB, for the human-readable summary line.
    pub fn size_mib(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }

    pub fn labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.config
            .labels
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Retrieve structured metadata for the image. An empty inspect result is
/// fatal; it means the runtime does not actually hold the image.
pub fn inspect(image: &str) -> Result<ImageDetails> {
    let stdout = run_docker_checked(&["inspect", image])
        .with_context(|| format!("Failed to inspect image {image}"))?;
    parse_inspect(&stdout).with_context(|| format!("Unusable inspect output for {image}"))
}

fn parse_inspect(raw: &str) -> Result<ImageDetails> {
    let mut entries: Vec<ImageDetails> =
        serde_json::from_str(raw).context("Failed to parse inspect JSON")?;
    if entries.is_empty() {
        bail!("inspect returned no image information");
    }
    Ok(entries.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::DEFAULT_IMAGE_TAG;

    const FIXTURE: &str = r#"[
        {
            "Id": "sha256:2b4e8a6f9c11",
            "Created": "2025-04-02T18:21:07.123456789Z",
            "Size": 89128960,
            "Config": {
                "Labels": {
                    "org.opencontainers.image.source": "https://github.com/thetechnetwork/plex-show-subtitles-on-rewind",
                    "org.opencontainers.image.version": "1.2.3"
                }
            }
        }
    ]"#;

    #[test]
    fn inspect_fixture_parses_id_created_size_labels() {
        let details = parse_inspect(FIXTURE).unwrap();

        assert_eq!(details.id, "sha256:2b4e8a6f9c11");
        assert_eq!(details.created.to_rfc3339(), "2025-04-02T18:21:07.123456789+00:00");
        assert_eq!(details.size, 89128960);
        assert_eq!(details.labels().count(), 2);
        assert!((details.size_mib() - 85.0).abs() < 0.01);
    }

    #[test]
    fn empty_inspect_output_is_rejected() {
        assert!(parse_inspect("[]").is_err());
    }

    #[test]
    fn missing_labels_are_tolerated() {
        let raw = r#"[{"Id": "sha256:aa", "Created": "2025-01-01T00:00:00Z", "Size": 1, "Config": {}}]"#;
        let details = parse_inspect(raw).unwrap();
        assert_eq!(details.labels().count(), 0);
    }

    #[test]
    fn default_image_uses_registry_path_and_tag() {
        assert_eq!(
            default_image("1.2.3"),
            "ghcr.io/thetechnetwork/plex-show-subtitles-on-rewind:1.2.3"
        );
        assert_eq!(
            default_image(DEFAULT_IMAGE_TAG),
            "ghcr.io/thetechnetwork/plex-show-subtitles-on-rewind:latest"
        );
    }
}
