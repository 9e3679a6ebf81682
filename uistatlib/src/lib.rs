//! # uistatlib
//!
//! Comparative source statistics for two codebases under migration.
//!
//! ## Overview
//!
//! When one UI framework is being replaced by another, the interesting
//! numbers are relative: how much of the code, and how much of the tests,
//! still lives on the old side. This library compares two "frameworks",
//! each with a source and a test location, and reports:
//!
//! - **Files**: counted files per category, after filetype and path filters
//! - **Lines**: a per-category breakdown into source, comment, blank and
//!   TODO lines
//! - **Percentages**: each framework's share of all files and lines
//! - **Subdirectories**: an optional listing of every directory walked
//! - **Module usage**: how many import sites reference each tracked module,
//!   read from a bundler module report
//!
//! ## Pipeline
//!
//! 1. [`source`]: walk each configured path, filter, and flatten the tree
//! 2. [`data`]: classify lines, aggregate statistics, count module usage
//!
//! All functions return plain data; printing and writing files is up to
//! the caller.
//!
//! ## Example
//!
//! ```rust
//! use uistatlib::{CategoryConfig, FrameworkConfig, RunOptions, SlocClassifier, StatsAggregator, StatsConfig};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::create_dir_all(dir.path().join("old")).unwrap();
//! fs::create_dir_all(dir.path().join("new")).unwrap();
//! fs::write(dir.path().join("old/a.js"), "// legacy\nvar a = 1;\n").unwrap();
//! fs::write(dir.path().join("new/b.js"), "export const b = 2;\n").unwrap();
//!
//! let config = StatsConfig::new(
//!     FrameworkConfig::new("Old", CategoryConfig::new(dir.path().join("old")).filetypes([".js"])),
//!     FrameworkConfig::new("New", CategoryConfig::new(dir.path().join("new")).filetypes([".js"])),
//! );
//!
//! let mut aggregator = StatsAggregator::new(&SlocClassifier, RunOptions::new());
//! let report = aggregator.build_report(&config, chrono::Utc::now()).unwrap();
//!
//! assert_eq!(report.framework1.src_files, 1);
//! assert_eq!(report.framework1.src_loc.total, 2);
//! assert_eq!(report.framework1.percentage_files, 50);
//! assert_eq!(report.framework1.percentage_loc, 67);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod options;
pub mod source;

pub use config::{CategoryConfig, ConfigOptions, FrameworkConfig, StatsConfig};
pub use data::{
    aggregate_module_usage, get_percentage, load_module_report, FileLoc, FrameworkStats,
    LineClassifier, LocBreakdown, ModuleFilter, ModuleReport, ModuleUsageRecord,
    ModuleUsageReport, SlocClassifier, StatsAggregator, StatsReport, Warning,
};
pub use error::UistatError;
pub use options::{Category, FrameworkId, RunOptions};
pub use source::{flatten_tree, walk_tree, Filetypes, FlattenedTree, PathFilter, TreeNode};

/// Result type for uistatlib operations
pub type Result<T> = std::result::Result<T, UistatError>;
