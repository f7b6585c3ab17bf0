//! Output folder preparation

use super::error::PipelineError;
use crate::infra::FileSystem;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Make sure `dir` exists and is empty.
///
/// An existing directory is listed recursively and every entry is removed on
/// its own. Entries that vanish before their turn (children of a directory
/// already removed) are skipped.
pub fn prepare_dist_folder<FS: FileSystem>(fs: &FS, dir: &Path) -> Result<(), PipelineError> {
    if !dir.exists() {
        log::debug!("Creating {}", dir.display());
        return fs
            .create_dir_all(dir)
            .map_err(|source| PipelineError::Prepare {
                path: dir.to_path_buf(),
                source,
            });
    }

    let entries = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Removing {} entries from {}", entries.len(), dir.display());

    for entry in entries {
        let path = entry.path();
        let removed = if entry.file_type().is_dir() {
            fs.remove_dir_all(path)
        } else {
            fs.remove_file(path)
        };

        match removed {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(PipelineError::Prepare {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    Ok(())
}
