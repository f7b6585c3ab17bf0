//! Configuration for sizesnap
//!
//! This module provides:
//! - the asset manifest and directory layout (`sizesnap.toml`)
//! - loading with defaults when no file is present

pub mod file;
pub mod loader;

pub use file::{AssetEntry, ConfigFile, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
