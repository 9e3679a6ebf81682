//! Flattening a directory tree into directory and file lists.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::filter::PathFilter;
use super::tree::TreeNode;

/// A directory in a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    /// Number of immediate children
    pub length: usize,
}

/// A file in a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Extension without the leading dot; empty when the file has none
    pub extension: String,
}

/// Directories and files of a tree, in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedTree {
    pub children: Vec<DirectoryEntry>,
    pub files: Vec<FileEntry>,
}

/// Flatten `root` into directory and file lists.
///
/// The filter only decides what is listed: traversal always descends into
/// a directory, even one the filter rejects.
pub fn flatten_tree(root: &TreeNode, filter: &PathFilter) -> FlattenedTree {
    let mut flat = FlattenedTree::default();
    let mut stack: Vec<&TreeNode> = vec![root];

    while let Some(node) = stack.pop() {
        let included = filter.should_include(&node.path);

        match &node.children {
            Some(children) => {
                if included {
                    flat.children.push(DirectoryEntry {
                        path: node.path.clone(),
                        length: children.len(),
                    });
                }
                stack.extend(children.iter().rev());
            }
            None => {
                if included {
                    flat.files.push(FileEntry {
                        path: node.path.clone(),
                        extension: node.extension.clone().unwrap_or_default(),
                    });
                }
            }
        }
    }

    flat
}
