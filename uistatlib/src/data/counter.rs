//! Per-file line counting on top of a [`LineClassifier`].
//!
//! Files whose extension the classifier recognizes are classified. Other
//! files are either counted raw (unconditional mode) or reported as
//! unsupported so the caller can warn about them.

use super::classifier::LineClassifier;
use super::loc::LocBreakdown;

/// Outcome of counting one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLoc {
    /// The classifier recognized the extension
    Classified(LocBreakdown),
    /// Counted raw in unconditional mode: `{total: N, unrecognized: N}`
    Unrecognized(LocBreakdown),
    /// Unknown extension and unconditional mode is off; contributes nothing
    Unsupported,
}

impl FileLoc {
    /// The breakdown this file contributes to its category.
    pub fn breakdown(&self) -> LocBreakdown {
        match self {
            FileLoc::Classified(loc) | FileLoc::Unrecognized(loc) => *loc,
            FileLoc::Unsupported => LocBreakdown::new(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, FileLoc::Unsupported)
    }
}

/// Count raw lines: the number of `'\n'`-separated segments.
///
/// The last line counts even without a trailing newline, and a trailing
/// newline leaves an empty final segment that is counted too.
pub fn count_raw_lines(contents: &str) -> u64 {
    contents.split('\n').count() as u64
}

/// Adapter from file contents to a [`FileLoc`].
pub struct LocCounter<C> {
    classifier: C,
    unconditional: bool,
}

impl<C: LineClassifier> LocCounter<C> {
    pub fn new(classifier: C, unconditional: bool) -> Self {
        Self {
            classifier,
            unconditional,
        }
    }

    /// Count one file's contents.
    pub fn count(&self, contents: &str, extension: &str) -> FileLoc {
        if self.classifier.supports(extension) {
            if let Some(loc) = self.classifier.classify(contents, extension) {
                return FileLoc::Classified(loc);
            }
        }

        if self.unconditional {
            FileLoc::Unrecognized(LocBreakdown::unrecognized(count_raw_lines(contents)))
        } else {
            FileLoc::Unsupported
        }
    }
}
