//! Data collection: count lines and aggregate statistics.
//!
//! This module handles the second stage of the pipeline:
//!
//! - **Classification**: the [`LineClassifier`] seam and the built-in
//!   [`SlocClassifier`]
//! - **Counting**: per-file line breakdowns with the unconditional fallback
//! - **Aggregation**: per-framework statistics and percentages
//! - **Module usage**: reference counts from a bundler module report
//!
//! ## Example
//!
//! ```rust,ignore
//! use uistatlib::data::{SlocClassifier, StatsAggregator};
//!
//! let mut aggregator = StatsAggregator::new(&SlocClassifier, config.run_options());
//! let report = aggregator.build_report(&config, chrono::Utc::now())?;
//! ```

pub mod aggregator;
pub mod classifier;
pub mod counter;
pub mod loc;
pub mod modules;
pub mod sloc;
pub mod stats;

pub use aggregator::{finalize, get_percentage, StatsAggregator, Warning};
pub use classifier::LineClassifier;
pub use counter::{count_raw_lines, FileLoc, LocCounter};
pub use loc::LocBreakdown;
pub use modules::{
    aggregate_module_usage, load_module_report, ModuleFilter, ModuleReason, ModuleReport,
    ModuleUsageRecord, ModuleUsageReport, ReportModule,
};
pub use sloc::{syntax_for, CommentSyntax, SlocClassifier};
pub use stats::{FrameworkStats, StatsReport};
