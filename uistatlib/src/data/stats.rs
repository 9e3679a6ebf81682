//! Statistics records for a comparison run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::loc::LocBreakdown;
use crate::config::FrameworkConfig;
use crate::options::{Category, FrameworkId};
use crate::source::DirectoryEntry;

/// File and line statistics for one framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkStats {
    pub name: String,
    pub src_path: PathBuf,
    pub src_filetypes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_filetypes: Option<Vec<String>>,
    pub src_files: u64,
    pub test_files: u64,
    /// Share of all counted files (both frameworks), rounded
    pub percentage_files: u64,
    pub src_loc: LocBreakdown,
    /// `None` until test code has been counted; zeroed by finalization
    pub test_loc: Option<LocBreakdown>,
    /// Share of all counted lines (both frameworks), rounded
    pub percentage_loc: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_subdirectories: Option<Vec<DirectoryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_subdirectories: Option<Vec<DirectoryEntry>>,
}

impl FrameworkStats {
    /// A zeroed record for `config`.
    ///
    /// Subdirectory lists start out empty when `include_subdirectories` is
    /// set and absent otherwise.
    pub fn new(config: &FrameworkConfig, include_subdirectories: bool) -> Self {
        let listing = || include_subdirectories.then(Vec::new);

        Self {
            name: config.name.clone(),
            src_path: config.src.path.clone(),
            src_filetypes: config.src.filetypes.clone(),
            test_path: config.test.as_ref().map(|t| t.path.clone()),
            test_filetypes: config.test.as_ref().map(|t| t.filetypes.clone()),
            src_files: 0,
            test_files: 0,
            percentage_files: 0,
            src_loc: LocBreakdown::new(),
            test_loc: None,
            percentage_loc: 0,
            src_subdirectories: listing(),
            test_subdirectories: listing(),
        }
    }

    /// Counted files in both categories.
    pub fn total_files(&self) -> u64 {
        self.src_files + self.test_files
    }

    /// Counted lines in both categories.
    pub fn total_loc(&self) -> u64 {
        self.src_loc.total + self.test_loc.map_or(0, |loc| loc.total)
    }

    pub fn files_mut(&mut self, category: Category) -> &mut u64 {
        match category {
            Category::Src => &mut self.src_files,
            Category::Test => &mut self.test_files,
        }
    }

    pub fn set_loc(&mut self, category: Category, loc: LocBreakdown) {
        match category {
            Category::Src => self.src_loc = loc,
            Category::Test => self.test_loc = Some(loc),
        }
    }

    pub fn set_subdirectories(&mut self, category: Category, dirs: Vec<DirectoryEntry>) {
        match category {
            Category::Src => self.src_subdirectories = Some(dirs),
            Category::Test => self.test_subdirectories = Some(dirs),
        }
    }
}

/// The result of a comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub timestamp: DateTime<Utc>,
    pub framework1: FrameworkStats,
    pub framework2: FrameworkStats,
}

impl StatsReport {
    pub fn framework(&self, id: FrameworkId) -> &FrameworkStats {
        match id {
            FrameworkId::Framework1 => &self.framework1,
            FrameworkId::Framework2 => &self.framework2,
        }
    }
}
