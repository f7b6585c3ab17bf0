//! Build pipeline
//!
//! The static build runs in three steps:
//! 1. empty (or create) the dist folder
//! 2. copy the asset manifest from the source folder, concurrently
//! 3. measure raw, gzip and brotli sizes of everything that landed in dist

pub mod copier;
pub mod error;
pub mod folder;
pub mod markup;
pub mod sizes;

pub use copier::{AssetCopier, CopyOutcome};
pub use error::PipelineError;
pub use folder::prepare_dist_folder;
pub use markup::{MarkupIssue, MarkupReport};
pub use sizes::compute_sizes;
