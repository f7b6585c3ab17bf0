//! Build workflow orchestration
//!
//! Holds the build logic apart from its presentation so the pipeline can be
//! driven programmatically or from the CLI.
//!
//! # Architecture
//!
//! The workflow runs in two phases:
//!
//! 1. **Static build**: empty the dist folder, copy the asset manifest into
//!    it and measure what landed there.
//!
//! 2. **Snapshot gate**: compare the measurement with the stored snapshot and
//!    only replace it when the prompter accepts.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use sizesnap::cmd::workflow::BuildWorkflow;
//! use sizesnap::config::ConfigFile;
//! use sizesnap::prompt::{Answer, FixedPrompter};
//!
//! let workflow = BuildWorkflow::new(Path::new("."), ConfigFile::default());
//! let result = workflow.build()?;
//! let outcome = workflow.guard_snapshot(&result.sizes, &FixedPrompter::new(Answer::Yes))?;
//! println!("{} files measured, {:?}", result.sizes.files.len(), outcome);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::ConfigFile;
use crate::error::BuildError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::pipeline::{self, AssetCopier, CopyOutcome};
use crate::prompt::Prompter;
use crate::snapshot::{GateOutcome, SizeSnapshot, SnapshotGate, SnapshotStorage};

/// Result of the static build phase
#[derive(Debug)]
pub struct BuildResult {
    /// One outcome per manifest entry, in manifest order
    pub copies: Vec<CopyOutcome>,
    /// Sizes of everything in the dist folder
    pub sizes: SizeSnapshot,
}

/// Build workflow orchestrator
pub struct BuildWorkflow<FS: FileSystem = RealFileSystem> {
    project_root: PathBuf,
    config: ConfigFile,
    fs: FS,
}

impl BuildWorkflow<RealFileSystem> {
    /// Create a workflow for `project_root` using the real filesystem
    pub fn new(project_root: &Path, config: ConfigFile) -> Self {
        Self::with_fs(project_root, config, RealFileSystem)
    }
}

impl<FS: FileSystem + Clone + Sync> BuildWorkflow<FS> {
    /// Create a workflow with a custom filesystem implementation
    pub fn with_fs(project_root: &Path, config: ConfigFile, fs: FS) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            fs,
        }
    }

    /// Source folder the manifest is read from
    pub fn src_dir(&self) -> PathBuf {
        self.project_root.join(&self.config.src_dir)
    }

    /// Output folder
    pub fn dist_dir(&self) -> PathBuf {
        self.project_root.join(&self.config.dist_dir)
    }

    /// Snapshot file location
    pub fn snapshot_path(&self) -> PathBuf {
        self.project_root.join(&self.config.snapshot)
    }

    /// Phase 1: prepare the dist folder, copy the manifest, measure sizes
    pub fn build(&self) -> Result<BuildResult> {
        let dist_dir = self.dist_dir();

        log::debug!("Preparing {}", dist_dir.display());
        pipeline::prepare_dist_folder(&self.fs, &dist_dir).map_err(BuildError::from)?;

        log::debug!("Copying {} assets", self.config.assets.len());
        let copies = AssetCopier::new(&self.fs, &self.src_dir(), &dist_dir)
            .with_markup_check(self.config.validate_markup)
            .copy_all(&self.config.assets)
            .map_err(BuildError::from)?;

        log::debug!("Measuring {}", dist_dir.display());
        let sizes = pipeline::compute_sizes(&self.fs, &dist_dir).map_err(BuildError::from)?;

        Ok(BuildResult { copies, sizes })
    }

    /// Phase 2: compare `sizes` with the stored snapshot and ask before
    /// replacing it
    pub fn guard_snapshot<P: Prompter>(
        &self,
        sizes: &SizeSnapshot,
        prompter: &P,
    ) -> Result<GateOutcome> {
        let storage = SnapshotStorage::new(self.snapshot_path(), self.fs.clone());
        SnapshotGate::new(&storage, prompter).check(sizes)
    }
}
