//! Source discovery: find files to count.
//!
//! This module handles the first stage of the pipeline:
//!
//! - **Filtering**: exclude / include-only regular expressions per category
//! - **Walking**: build a directory tree restricted to allowed filetypes
//! - **Flattening**: turn the tree into directory and file lists
//!
//! ## Example
//!
//! ```rust,ignore
//! use uistatlib::source::{flatten_tree, walk_tree, Filetypes, PathFilter};
//!
//! let filter = PathFilter::new(Some("test"), None)?;
//! let tree = walk_tree("./src", &Filetypes::new([".js"]), |_| {})?;
//! let flat = flatten_tree(&tree.unwrap(), &filter);
//! ```

pub mod filter;
pub mod flatten;
pub mod tree;

pub use filter::PathFilter;
pub use flatten::{flatten_tree, DirectoryEntry, FileEntry, FlattenedTree};
pub use tree::{walk_tree, Filetypes, TreeNode};
