//! Configuration file data structures

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "sizesnap.toml";

/// sizesnap configuration file structure
///
/// Every path is relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Directory holding the source assets
    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,

    /// Output directory, emptied on every build
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Location of the persisted size snapshot
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,

    /// Run the advisory markup check on HTML assets before copying
    #[serde(default = "default_validate_markup")]
    pub validate_markup: bool,

    /// Assets to copy, in order
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetEntry>,
}

/// One source → destination pair of the asset manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Path relative to the source directory
    pub source: PathBuf,
    /// Path relative to the dist directory
    pub destination: PathBuf,
}

impl AssetEntry {
    /// Asset copied under the same name it has in the source directory
    pub fn same_name(name: &str) -> Self {
        Self {
            source: PathBuf::from(name),
            destination: PathBuf::from(name),
        }
    }
}

fn default_src_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_snapshot() -> PathBuf {
    PathBuf::from("size-snapshot.json")
}

fn default_validate_markup() -> bool {
    true
}

fn default_assets() -> Vec<AssetEntry> {
    ["index.html", "index.js", "styles.css", "logo.svg"]
        .into_iter()
        .map(AssetEntry::same_name)
        .collect()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            dist_dir: default_dist_dir(),
            snapshot: default_snapshot(),
            validate_markup: default_validate_markup(),
            assets: default_assets(),
        }
    }
}

impl ConfigFile {
    /// Validate the manifest and directory settings
    ///
    /// Ensures at least one asset, relative paths that stay inside their
    /// roots, and unique destinations. The dist folder is emptied on every
    /// build, so it may not overlap the source folder or hold the snapshot.
    pub fn validate(&self) -> Result<()> {
        check_relative("src-dir", &self.src_dir)?;
        check_relative("dist-dir", &self.dist_dir)?;
        check_relative("snapshot", &self.snapshot)?;

        let src = normalized(&self.src_dir);
        let dist = normalized(&self.dist_dir);
        if dist.is_empty() {
            anyhow::bail!("dist-dir cannot be the project root");
        }
        if src.starts_with(&dist) || dist.starts_with(&src) {
            anyhow::bail!(
                "dist-dir {} overlaps src-dir {}",
                self.dist_dir.display(),
                self.src_dir.display()
            );
        }
        if normalized(&self.snapshot).starts_with(&dist) {
            anyhow::bail!(
                "snapshot {} must not live inside dist-dir {}",
                self.snapshot.display(),
                self.dist_dir.display()
            );
        }

        if self.assets.is_empty() {
            anyhow::bail!("Asset manifest is empty; list at least one [[assets]] entry");
        }

        let mut destinations = HashSet::new();
        for asset in &self.assets {
            check_relative("asset source", &asset.source)?;
            check_relative("asset destination", &asset.destination)?;
            if asset.source.components().next().is_none()
                || asset.destination.components().next().is_none()
            {
                anyhow::bail!("Asset paths cannot be empty");
            }
            if !destinations.insert(&asset.destination) {
                anyhow::bail!(
                    "Destination {} is listed more than once",
                    asset.destination.display()
                );
            }
        }

        Ok(())
    }
}

/// Path components with `.` dropped; callers have already rejected `..`
fn normalized(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| *c != Component::CurDir)
        .collect()
}

fn check_relative(field: &str, path: &Path) -> Result<()> {
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                anyhow::bail!("{} must not contain '..': {}", field, path.display())
            }
            Component::RootDir | Component::Prefix(_) => {
                anyhow::bail!("{} must be a relative path: {}", field, path.display())
            }
        }
    }
    Ok(())
}
