#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! sizesnap library
//!
//! This library provides a small static-site build with bundle size
//! snapshots. It can be used programmatically in addition to the CLI
//! interface.
//!
//! # Basic Example
//!
//! Measuring and comparing two sets of sizes:
//!
//! ```
//! use sizesnap::snapshot::{ChangeKind, SizeRecord, SizeSnapshot, SnapshotDiff};
//! use std::collections::BTreeMap;
//!
//! let record = |raw| SizeRecord { raw, gzip: raw / 2, brotli: raw / 3 };
//!
//! let old = SizeSnapshot::from_files(BTreeMap::from([("a.js".to_string(), record(100))]));
//! let new = SizeSnapshot::from_files(BTreeMap::from([("a.js".to_string(), record(120))]));
//!
//! let diff = SnapshotDiff::between(&old, &new);
//! assert_eq!(diff.kind(), ChangeKind::Increase);
//! assert_eq!(diff.total_delta().raw, 20);
//! ```
//!
//! # Advanced Example: Full Workflow
//!
//! Building a site and gating its snapshot without a terminal:
//!
//! ```
//! use sizesnap::cmd::BuildWorkflow;
//! use sizesnap::config::{AssetEntry, ConfigFile};
//! use sizesnap::prompt::{Answer, FixedPrompter};
//! use sizesnap::snapshot::GateOutcome;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let site = TempDir::new().unwrap();
//! fs::create_dir_all(site.path().join("src")).unwrap();
//! fs::write(site.path().join("src/index.js"), "console.log(1);\n").unwrap();
//!
//! let config = ConfigFile {
//!     assets: vec![AssetEntry::same_name("index.js")],
//!     ..ConfigFile::default()
//! };
//! let workflow = BuildWorkflow::new(site.path(), config);
//!
//! let result = workflow.build().unwrap();
//! let outcome = workflow
//!     .guard_snapshot(&result.sizes, &FixedPrompter::new(Answer::Yes))
//!     .unwrap();
//!
//! assert_eq!(outcome, GateOutcome::Created);
//! assert!(site.path().join("size-snapshot.json").exists());
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file and manifest loading
pub mod config;
/// Top-level error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Folder preparation, asset copying and size measurement
pub mod pipeline;
/// Operator confirmation prompts
pub mod prompt;
/// Size snapshots: persistence, comparison, reporting and gating
pub mod snapshot;
/// Bordered table rendering
pub mod table;
