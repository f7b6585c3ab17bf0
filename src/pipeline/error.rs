//! Error types for the build pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during pipeline execution
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The output directory could not be emptied or created
    #[error("Failed to prepare {}", path.display())]
    Prepare {
        /// Directory or entry being prepared
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// An asset copy failed
    #[error("Failed to copy {} to {}", from.display(), to.display())]
    Copy {
        /// Source file
        from: PathBuf,
        /// Destination file
        to: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// An output file could not be read for measuring
    #[error("Failed to read {}", path.display())]
    Read {
        /// File being read
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Compressing an output file in memory failed
    #[error("Failed to compress {}", path.display())]
    Compress {
        /// File being measured
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// An output file collides with the synthetic total key
    #[error("Output file '{name}' collides with the reserved total row")]
    ReservedName {
        /// Offending relative path
        name: String,
    },

    /// An output path cannot be used as a snapshot key
    #[error("Output file {} has a name that is not valid UTF-8", path.display())]
    NonUtf8Name {
        /// Offending file
        path: PathBuf,
    },
}
