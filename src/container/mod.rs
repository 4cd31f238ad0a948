//! Container image smoke-test pipeline
//!
//! Readiness, pull, inspect, run, log scan, cleanup. The first four
//! stages are fatal on failure; the log scan only surfaces diagnostics;
//! cleanup always runs.

pub mod daemon;
pub mod image;
pub mod lifecycle;
pub mod runner;
