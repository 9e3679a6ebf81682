//! Path filtering with exclude / include-only regular expressions.
//!
//! Each category of a framework may carry an `exclude` pattern and an
//! `includeOnly` pattern. Both are optional; a missing pattern places no
//! constraint on that side.

use std::path::Path;

use regex::Regex;

use crate::error::UistatError;
use crate::Result;

/// Decides whether a path should be counted.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    /// Paths matching this are dropped
    pub exclude: Option<Regex>,
    /// When set, only paths matching this are kept
    pub include_only: Option<Regex>,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| UistatError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

impl PathFilter {
    /// Build a filter from optional pattern strings.
    pub fn new(exclude: Option<&str>, include_only: Option<&str>) -> Result<Self> {
        Ok(Self {
            exclude: exclude.map(compile).transpose()?,
            include_only: include_only.map(compile).transpose()?,
        })
    }

    /// A filter that accepts every path.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Check if a path passes the filter.
    ///
    /// Excludes win over includes. Patterns search anywhere in the path
    /// string; anchor them with `^`/`$` to match whole components.
    pub fn should_include(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if let Some(exclude) = &self.exclude {
            if exclude.is_match(&path_str) {
                return false;
            }
        }

        if let Some(include_only) = &self.include_only {
            if !include_only.is_match(&path_str) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_patterns_includes_everything() {
        let filter = PathFilter::allow_all();
        assert!(filter.should_include(Path::new("src/app.js")));
        assert!(filter.should_include(Path::new("")));
    }

    #[test]
    fn test_exclude_pattern() {
        let filter = PathFilter::new(Some("test"), None).unwrap();
        assert!(filter.should_include(Path::new("src/views/table.js")));
        assert!(!filter.should_include(Path::new("src/test/table.js")));
        assert!(!filter.should_include(Path::new("src/views/tableTest.js")));
    }

    #[test]
    fn test_include_only_pattern() {
        let filter = PathFilter::new(None, Some("overview")).unwrap();
        assert!(filter.should_include(Path::new("tests/overview/spec.js")));
        assert!(!filter.should_include(Path::new("tests/details/spec.js")));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter = PathFilter::new(Some(r"\.json$"), Some("overview")).unwrap();
        assert!(filter.should_include(Path::new("overview/a.js")));
        assert!(!filter.should_include(Path::new("overview/a.json")));
        assert!(!filter.should_include(Path::new("other/a.js")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PathFilter::new(Some("(unclosed"), None);

        if let Err(UistatError::InvalidPattern { pattern, .. }) = result {
            assert_eq!(pattern, "(unclosed");
        } else {
            panic!("Expected InvalidPattern error");
        }
    }
}
