//! The line classification seam.
//!
//! Counting blank, comment and code lines is delegated to a
//! [`LineClassifier`]. The crate ships [`SlocClassifier`](super::sloc::SlocClassifier);
//! callers can plug in their own.

use super::loc::LocBreakdown;

/// Per-extension line categorizer.
pub trait LineClassifier {
    /// Whether files with this extension (without dot) can be classified.
    fn supports(&self, extension: &str) -> bool;

    /// Classify `contents`, or `None` if the extension is not supported.
    fn classify(&self, contents: &str, extension: &str) -> Option<LocBreakdown>;
}

impl<T: LineClassifier + ?Sized> LineClassifier for &T {
    fn supports(&self, extension: &str) -> bool {
        (**self).supports(extension)
    }

    fn classify(&self, contents: &str, extension: &str) -> Option<LocBreakdown> {
        (**self).classify(contents, extension)
    }
}
