//! Run options and the enumerations that key statistics.
//!
//! These replace string-keyed lookups: every place that needs to know which
//! framework or which category it is working on receives one of these values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two compared codebases a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameworkId {
    Framework1,
    Framework2,
}

impl FrameworkId {
    /// Both frameworks, in report order.
    pub const ALL: [FrameworkId; 2] = [FrameworkId::Framework1, FrameworkId::Framework2];

    /// Stable key used in configuration and output.
    pub fn key(&self) -> &'static str {
        match self {
            FrameworkId::Framework1 => "framework1",
            FrameworkId::Framework2 => "framework2",
        }
    }
}

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// File classification bucket tracked per framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Production source
    Src,
    /// Test code
    Test,
}

impl Category {
    /// Both categories, in processing order.
    pub const ALL: [Category; 2] = [Category::Src, Category::Test];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Src => "src",
            Category::Test => "test",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Options that change how statistics are gathered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Store the flattened subdirectory listing on each framework
    pub subdirectories: bool,
    /// Count raw lines of files the classifier does not recognize
    pub unconditional_loc: bool,
}

impl RunOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: include subdirectory listings
    pub fn with_subdirectories(mut self, include: bool) -> Self {
        self.subdirectories = include;
        self
    }

    /// Builder: count unrecognized files line by line
    pub fn with_unconditional_loc(mut self, enabled: bool) -> Self {
        self.unconditional_loc = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(FrameworkId::Framework1.key(), "framework1");
        assert_eq!(FrameworkId::Framework2.to_string(), "framework2");
        assert_eq!(Category::Src.key(), "src");
        assert_eq!(Category::Test.to_string(), "test");
    }

    #[test]
    fn test_run_options_builder() {
        let opts = RunOptions::new()
            .with_subdirectories(true)
            .with_unconditional_loc(true);
        assert!(opts.subdirectories);
        assert!(opts.unconditional_loc);
        assert_eq!(RunOptions::default(), RunOptions::new());
    }
}
