//! Building framework statistics.
//!
//! For every configured category of a framework the aggregator:
//!
//! 1. Checks the path exists (a missing path aborts the whole run)
//! 2. Walks the tree restricted to the category's filetypes, counting files
//!    that pass the category's path filter
//! 3. Flattens the tree with the same filter to get the subdirectory listing
//!    and the files to count
//! 4. Reads every listed file and accumulates its line breakdown
//!
//! Once both frameworks are built, [`finalize`] fills in each framework's
//! share of the combined file and line totals.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use super::classifier::LineClassifier;
use super::counter::LocCounter;
use super::loc::LocBreakdown;
use super::stats::{FrameworkStats, StatsReport};
use crate::config::{CategoryConfig, FrameworkConfig, StatsConfig};
use crate::error::UistatError;
use crate::options::{Category, FrameworkId, RunOptions};
use crate::source::{flatten_tree, walk_tree, FileEntry, FlattenedTree};
use crate::Result;

/// A file that was skipped because its language is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub path: PathBuf,
    pub extension: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unsupported language {}, skipped {}. Set unconditionalLoc in config to include this file.",
            self.extension,
            self.path.display()
        )
    }
}

/// Builds [`FrameworkStats`] and collects non-fatal warnings along the way.
pub struct StatsAggregator<'a> {
    counter: LocCounter<&'a dyn LineClassifier>,
    options: RunOptions,
    warnings: Vec<Warning>,
}

impl<'a> StatsAggregator<'a> {
    pub fn new(classifier: &'a dyn LineClassifier, options: RunOptions) -> Self {
        Self {
            counter: LocCounter::new(classifier, options.unconditional_loc),
            options,
            warnings: Vec::new(),
        }
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    /// Build the statistics of one framework.
    ///
    /// Percentages stay zero until [`finalize`] runs.
    pub fn build(
        &mut self,
        id: FrameworkId,
        config: &FrameworkConfig,
        include_subdirectories: bool,
    ) -> Result<FrameworkStats> {
        let mut stats = FrameworkStats::new(config, include_subdirectories);

        for category in Category::ALL {
            match config.category(category) {
                Some(category_config) => self.count_category(
                    category,
                    category_config,
                    include_subdirectories,
                    &mut stats,
                )?,
                None => debug!("{} ({}) has no {} path configured", id, config.name, category),
            }
        }

        info!(
            "{} ({}): {} src / {} test files",
            id, config.name, stats.src_files, stats.test_files
        );

        Ok(stats)
    }

    fn count_category(
        &mut self,
        category: Category,
        config: &CategoryConfig,
        include_subdirectories: bool,
        stats: &mut FrameworkStats,
    ) -> Result<()> {
        if !config.path.exists() {
            return Err(UistatError::PathNotFound(config.path.clone()));
        }

        let filter = config.path_filter()?;
        let mut files = 0u64;

        let tree = walk_tree(&config.path, &config.allowed_filetypes(), |node| {
            if filter.should_include(&node.path) {
                files += 1;
            }
        })?;
        *stats.files_mut(category) += files;

        let FlattenedTree { children, files } = tree
            .map(|root| flatten_tree(&root, &filter))
            .unwrap_or_default();
        debug!(
            "{} {:?}: {} directories, {} files",
            category,
            config.path,
            children.len(),
            files.len()
        );

        if include_subdirectories {
            stats.set_subdirectories(category, children);
        }

        let mut loc = LocBreakdown::new();
        for file in &files {
            loc += self.count_file(file)?;
        }
        stats.set_loc(category, loc);

        Ok(())
    }

    fn count_file(&mut self, file: &FileEntry) -> Result<LocBreakdown> {
        let bytes = fs::read(&file.path).map_err(|e| UistatError::FileRead {
            path: file.path.clone(),
            source: e,
        })?;
        let contents = String::from_utf8_lossy(&bytes);

        let result = self.counter.count(&contents, &file.extension);
        if result.is_unsupported() {
            let warning = Warning {
                path: file.path.clone(),
                extension: file.extension.clone(),
            };
            warn!("{}", warning);
            self.warnings.push(warning);
        }

        Ok(result.breakdown())
    }

    /// Build both frameworks and compute their percentages.
    ///
    /// Any fatal error aborts the run; no partial report is returned.
    pub fn build_report(
        &mut self,
        config: &StatsConfig,
        timestamp: DateTime<Utc>,
    ) -> Result<StatsReport> {
        let subdirectories = self.options.subdirectories;
        let mut framework1 =
            self.build(FrameworkId::Framework1, &config.framework1, subdirectories)?;
        let mut framework2 =
            self.build(FrameworkId::Framework2, &config.framework2, subdirectories)?;

        finalize(&mut framework1, &mut framework2);

        Ok(StatsReport {
            timestamp,
            framework1,
            framework2,
        })
    }
}

/// `round((first + second) * 100 / total)`; zero when `total` is zero.
///
/// Each framework is rounded on its own, so the percentages of the two
/// frameworks need not add up to 100.
pub fn get_percentage(first: u64, second: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((first + second) as f64 * 100.0 / total as f64).round() as u64
}

/// Default missing test counts and fill in both frameworks' percentages.
pub fn finalize(framework1: &mut FrameworkStats, framework2: &mut FrameworkStats) {
    for stats in [&mut *framework1, &mut *framework2] {
        stats.test_loc.get_or_insert_with(LocBreakdown::new);
    }

    let total_files = framework1.total_files() + framework2.total_files();
    let total_loc = framework1.total_loc() + framework2.total_loc();

    for stats in [framework1, framework2] {
        let test_total = stats.test_loc.map_or(0, |loc| loc.total);
        stats.percentage_files = get_percentage(stats.src_files, stats.test_files, total_files);
        stats.percentage_loc = get_percentage(stats.src_loc.total, test_total, total_loc);
    }
}
