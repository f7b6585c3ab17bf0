//! Configuration file loading

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::BuildError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from `sizesnap.toml` in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sizesnap::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Copying {} assets", config.assets.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_from(&project_root.join(CONFIG_FILE_NAME))
    }

    /// Load config from an explicit path
    pub fn load_from(config_path: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(config_path, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    ///
    /// A missing file yields the default configuration.
    pub fn load_with_fs<FS: FileSystem>(config_path: &Path, fs: &FS) -> Result<ConfigFile> {
        let contents = match fs.read_to_string(config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(
                    "No config at {}, using defaults",
                    config_path.display()
                );
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", config_path.display()));
            }
        };

        let config: ConfigFile =
            toml_edit::de::from_str(&contents).map_err(|e| BuildError::InvalidConfig {
                path: config_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate().map_err(|e| BuildError::InvalidConfig {
            path: config_path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(config)
    }
}
