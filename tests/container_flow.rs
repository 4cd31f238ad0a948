//! Flow-level checks for the container pipeline pieces that run without
//! a live runtime: image reference derivation, log scanning, cleanup
//! guard discipline.

use relcheck::container::image;
use relcheck::container::lifecycle::{self, CleanupGuard};

#[test]
fn image_reference_defaults_to_registry_path_plus_tag() {
    assert_eq!(
        image::default_image("latest"),
        "ghcr.io/thetechnetwork/plex-show-subtitles-on-rewind:latest"
    );
    assert_eq!(
        image::default_image("0.9.0"),
        "ghcr.io/thetechnetwork/plex-show-subtitles-on-rewind:0.9.0"
    );
}

#[test]
fn unhandled_exception_in_logs_is_advisory() {
    let logs = "booting\nUnhandled exception while probing server\n";

    // A match is a diagnostic to print, not an error value: the scan has
    // no failure mode and the pipeline result stays whatever it was.
    let matches = lifecycle::scan_logs(logs);
    assert_eq!(matches, vec!["Unhandled exception"]);
}

#[test]
fn quiet_logs_produce_no_diagnostics() {
    assert!(lifecycle::scan_logs("").is_empty());
    assert!(lifecycle::scan_logs("all good here\n").is_empty());
}

#[test]
fn cleanup_guard_tolerates_missing_runtime() {
    // Teardown must never panic, even when docker is absent or the
    // container never existed. Both guard modes are exercised.
    drop(CleanupGuard::new("plex-subtitles-test".into(), false));
    drop(CleanupGuard::new("plex-subtitles-test".into(), true));
}
