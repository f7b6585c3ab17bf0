//! Asset copying
//!
//! Copies the configured manifest from the source root into the dist root.
//! Every copy is started before any result is looked at, so one failing
//! asset never prevents the others from landing.

use super::error::PipelineError;
use super::markup::{self, MarkupIssue};
use crate::config::AssetEntry;
use crate::infra::FileSystem;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// What happened to one manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The file was copied
    Copied {
        /// Destination relative to the dist root
        destination: PathBuf,
        /// Bytes written
        bytes: u64,
        /// Advisory markup findings (empty for non-HTML assets)
        markup_issues: Vec<MarkupIssue>,
    },
    /// The markup check could not run, so the copy was not attempted
    Skipped {
        /// Destination relative to the dist root
        destination: PathBuf,
        /// Why the markup check failed
        reason: String,
    },
}

/// Copies manifest entries between two roots
pub struct AssetCopier<'a, FS: FileSystem> {
    fs: &'a FS,
    src_root: PathBuf,
    dist_root: PathBuf,
    validate_markup: bool,
}

impl<'a, FS: FileSystem + Sync> AssetCopier<'a, FS> {
    /// Create a copier reading from `src_root` and writing under `dist_root`
    pub fn new(fs: &'a FS, src_root: &Path, dist_root: &Path) -> Self {
        Self {
            fs,
            src_root: src_root.to_path_buf(),
            dist_root: dist_root.to_path_buf(),
            validate_markup: false,
        }
    }

    /// Run the markup check on HTML assets before copying them
    pub fn with_markup_check(mut self, enabled: bool) -> Self {
        self.validate_markup = enabled;
        self
    }

    /// Copy every asset concurrently.
    ///
    /// All copies finish before the aggregate is judged. If any failed, the
    /// first failure in manifest order is returned and all are logged.
    pub fn copy_all(&self, assets: &[AssetEntry]) -> Result<Vec<CopyOutcome>, PipelineError> {
        let results: Vec<Result<CopyOutcome, PipelineError>> =
            assets.par_iter().map(|asset| self.copy_one(asset)).collect();

        let failures = results.iter().filter(|r| r.is_err()).count();
        let mut outcomes = Vec::with_capacity(results.len());
        let mut first_error = None;

        for result in results {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    log::error!("{}: {}", e, source_message(&e));
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => {
                log::error!("{} of {} asset copies failed", failures, assets.len());
                Err(e)
            }
            None => Ok(outcomes),
        }
    }

    fn copy_one(&self, asset: &AssetEntry) -> Result<CopyOutcome, PipelineError> {
        let from = self.src_root.join(&asset.source);
        let to = self.dist_root.join(&asset.destination);

        let mut markup_issues = Vec::new();
        if self.validate_markup && markup::is_markup(&asset.source) {
            match markup::check_markup_file(self.fs, &from) {
                Ok(report) if report.is_valid() => {
                    log::debug!("{}: markup check passed", asset.source.display());
                }
                Ok(report) => {
                    for issue in &report.issues {
                        log::warn!("{}: {}", asset.source.display(), issue);
                    }
                    markup_issues = report.issues;
                }
                Err(e) => {
                    log::error!("Markup check failed, not copying: {}", e);
                    return Ok(CopyOutcome::Skipped {
                        destination: asset.destination.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let copy_error = |source: std::io::Error| PipelineError::Copy {
            from: from.clone(),
            to: to.clone(),
            source,
        };

        if let Some(parent) = to.parent() {
            self.fs.create_dir_all(parent).map_err(copy_error)?;
        }
        let bytes = self.fs.copy(&from, &to).map_err(copy_error)?;
        log::debug!("Copied {} ({} bytes)", asset.destination.display(), bytes);

        Ok(CopyOutcome::Copied {
            destination: asset.destination.clone(),
            bytes,
            markup_issues,
        })
    }
}

fn source_message(error: &PipelineError) -> String {
    std::error::Error::source(error)
        .map(|s| s.to_string())
        .unwrap_or_default()
}
