//! Build-asset pipeline: publish, locate, stage, validate
//!
//! One pass per target platform. Each step hands its output path to the
//! next; any step failing marks the platform as failed without stopping
//! the remaining platforms.

pub mod locate;
pub mod publish;
pub mod result;
pub mod stage;
pub mod validate;

pub use result::{BuildReport, PlatformOutcome};
