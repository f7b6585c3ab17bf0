//! Snapshot persistence (I/O)

use super::SizeSnapshot;
use crate::infra::FileSystem;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or writing the snapshot file
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The file exists but could not be read
    #[error("Failed to read size snapshot {}", path.display())]
    Read {
        /// Snapshot path
        path: PathBuf,
        #[source]
        /// IO error source
        source: io::Error,
    },

    /// The file is not a valid snapshot
    #[error("Size snapshot {} is malformed", path.display())]
    Malformed {
        /// Snapshot path
        path: PathBuf,
        #[source]
        /// Parse error source
        source: serde_json::Error,
    },

    /// The snapshot could not be encoded
    #[error("Failed to serialize size snapshot")]
    Serialize(#[source] serde_json::Error),

    /// The file could not be written
    #[error("Failed to write size snapshot {}", path.display())]
    Write {
        /// Snapshot path
        path: PathBuf,
        #[source]
        /// IO error source
        source: io::Error,
    },
}

/// Loads and saves the snapshot file
pub struct SnapshotStorage<FS: FileSystem> {
    path: PathBuf,
    fs: FS,
}

impl<FS: FileSystem> SnapshotStorage<FS> {
    /// Storage backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    /// Location of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, or `None` when there is no file yet
    pub fn load(&self) -> Result<Option<SizeSnapshot>, SnapshotError> {
        let contents = match self.fs.read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No size snapshot at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(SnapshotError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let snapshot = serde_json::from_str(&contents).map_err(|source| {
            SnapshotError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(Some(snapshot))
    }

    /// Replace the snapshot file with `snapshot`
    pub fn save(&self, snapshot: &SizeSnapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs
                .create_dir_all(parent)
                .map_err(|source| SnapshotError::Write {
                    path: self.path.clone(),
                    source,
                })?;
        }

        let mut contents =
            serde_json::to_string_pretty(snapshot).map_err(SnapshotError::Serialize)?;
        contents.push('\n');

        self.fs
            .write(&self.path, contents)
            .map_err(|source| SnapshotError::Write {
                path: self.path.clone(),
                source,
            })?;
        log::info!("Saved size snapshot to {}", self.path.display());
        Ok(())
    }
}
