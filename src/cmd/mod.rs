//! Command handlers for the sizesnap CLI
//!
//! `build` presents results; `workflow` holds the logic it runs.

pub mod build;
pub mod workflow;

pub use build::cmd_build;
pub use workflow::{BuildResult, BuildWorkflow};
