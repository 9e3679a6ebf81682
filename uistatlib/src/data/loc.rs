//! Per-category line counts.
//!
//! A [`LocBreakdown`] counts lines in the categories the line classifier
//! reports:
//!
//! - **total**: every line
//! - **source**: lines containing code
//! - **comment**: lines containing a comment (`single` + `block`)
//! - **single**: comment lines using a line-comment marker
//! - **block**: lines touched by a block comment
//! - **mixed**: lines with both code and a comment (counted in `source` and `comment`)
//! - **empty**: whitespace-only lines
//! - **todo**: comment lines mentioning `TODO`
//! - **unrecognized**: lines of files counted raw because no classifier knew them

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Line counts for one file or an accumulation of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocBreakdown {
    pub total: u64,
    pub source: u64,
    pub comment: u64,
    pub single: u64,
    pub block: u64,
    pub mixed: u64,
    pub empty: u64,
    pub todo: u64,
    /// Only present once a file has been counted in unconditional mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrecognized: Option<u64>,
}

impl LocBreakdown {
    /// Create a breakdown with all zeros.
    pub fn new() -> Self {
        Self::default()
    }

    /// Breakdown for a file counted line by line without classification.
    pub fn unrecognized(lines: u64) -> Self {
        Self {
            total: lines,
            unrecognized: Some(lines),
            ..Self::default()
        }
    }
}

fn add_optional(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0) + b.unwrap_or(0)),
    }
}

impl Add for LocBreakdown {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            source: self.source + other.source,
            comment: self.comment + other.comment,
            single: self.single + other.single,
            block: self.block + other.block,
            mixed: self.mixed + other.mixed,
            empty: self.empty + other.empty,
            todo: self.todo + other.todo,
            unrecognized: add_optional(self.unrecognized, other.unrecognized),
        }
    }
}

impl AddAssign for LocBreakdown {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for LocBreakdown {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), Add::add)
    }
}
