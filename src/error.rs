//! Top-level error types with contextual suggestions
//!
//! Each layer has its own `thiserror` enum; [`BuildError`] wraps them at the
//! command layer and adds:
//! - actionable suggestions
//! - exit codes following sysexits.h conventions
//!
//! # Examples
//!
//! ```
//! use sizesnap::error::{BuildError, ErrorFormatter};
//! use std::path::PathBuf;
//!
//! let error = anyhow::Error::new(BuildError::NoBaseline {
//!     snapshot_path: PathBuf::from("size-snapshot.json"),
//! });
//!
//! assert_eq!(ErrorFormatter::exit_code(&error), 1);
//! assert!(ErrorFormatter::format(&error).contains("size-snapshot.json"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::snapshot::{ChangeKind, SnapshotError};

/// Errors that fail a build
#[derive(Error, Debug)]
pub enum BuildError {
    /// No snapshot existed and creating one was declined
    #[error("No size snapshot at {} and creating one was declined", snapshot_path.display())]
    NoBaseline {
        /// Where the snapshot was expected
        snapshot_path: PathBuf,
    },

    /// Sizes changed and the new sizes were not accepted
    #[error("Bundle size {kind} and the change was not accepted")]
    SizeChangeRejected {
        /// Direction of the rejected change
        kind: ChangeKind,
        /// Snapshot left untouched
        snapshot_path: PathBuf,
    },

    /// The configuration file could not be used
    #[error("Invalid configuration in {}: {reason}", path.display())]
    InvalidConfig {
        /// Configuration file
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// Preparing, copying or measuring failed
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// The snapshot file could not be read or written
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl BuildError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sizesnap::error::BuildError;
    /// use sizesnap::snapshot::ChangeKind;
    /// use std::path::PathBuf;
    ///
    /// let error = BuildError::SizeChangeRejected {
    ///     kind: ChangeKind::Increase,
    ///     snapshot_path: PathBuf::from("size-snapshot.json"),
    /// };
    ///
    /// assert!(error.suggestion().unwrap().contains("interactively"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NoBaseline { .. } => Some(
                "Run the build interactively and answer 'y' to create the first snapshot"
                    .to_string(),
            ),
            Self::SizeChangeRejected { snapshot_path, .. } => Some(format!(
                "Review the size table above, then run the build interactively and accept, \
                 or revert the change. {} was left untouched",
                snapshot_path.display()
            )),
            Self::InvalidConfig { .. } => Some(
                "Fix the configuration file or remove it to use the default manifest".to_string(),
            ),
            Self::Pipeline(e) => match e {
                PipelineError::Copy { from, .. } => Some(format!(
                    "Check that {} exists and is readable",
                    from.display()
                )),
                PipelineError::ReservedName { .. } => Some(
                    "Rename the output file; 'total' is reserved for the aggregate row"
                        .to_string(),
                ),
                PipelineError::NonUtf8Name { path } => Some(format!(
                    "Rename {} to a UTF-8 file name",
                    path.display()
                )),
                _ => Some("Check file permissions on the source and dist folders".to_string()),
            },
            Self::Snapshot(SnapshotError::Malformed { path, .. }) => Some(format!(
                "Fix or delete {} and rerun the build to record a new snapshot",
                path.display()
            )),
            Self::Snapshot(_) => {
                Some("Check file permissions on the snapshot file and its folder".to_string())
            }
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes following sysexits.h conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoBaseline { .. } => 1,         // Generic error (CI should fail)
            Self::SizeChangeRejected { .. } => 1, // Generic error (CI should fail)
            Self::InvalidConfig { .. } => 78,     // EX_CONFIG
            Self::Pipeline(PipelineError::ReservedName { .. }) => 65, // EX_DATAERR
            Self::Pipeline(PipelineError::NonUtf8Name { .. }) => 65, // EX_DATAERR
            Self::Pipeline(_) => 74,              // EX_IOERR
            Self::Snapshot(SnapshotError::Malformed { .. }) => 65, // EX_DATAERR
            Self::Snapshot(SnapshotError::Serialize(_)) => 70, // EX_SOFTWARE
            Self::Snapshot(_) => 74,              // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(suggestion) = error
            .downcast_ref::<BuildError>()
            .and_then(BuildError::suggestion)
        {
            output.push_str(&format!(
                "\n{} {}\n",
                style("help:").cyan().bold(),
                suggestion
            ));
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(build_error) = error.downcast_ref::<BuildError>() {
            build_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
