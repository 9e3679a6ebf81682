//! Directory tree construction.
//!
//! Walks a root path and builds a [`TreeNode`] tree annotated with file
//! extensions and sizes. Only metadata is read here; file contents are read
//! later, when lines are counted.

use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::UistatError;
use crate::Result;

/// A directory or file in a walked tree.
///
/// A node with `children` is a directory; a node without is a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub path: PathBuf,
    pub name: String,
    /// File extension without the leading dot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// File size in bytes, or the sum of descendant file sizes for a directory
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Create a file node.
    pub fn file(path: PathBuf, name: String, extension: Option<String>, size: u64) -> Self {
        Self {
            path,
            name,
            extension,
            size,
            children: None,
        }
    }

    /// Create a directory node; its size is the sum of its children's sizes.
    pub fn directory(path: PathBuf, name: String, children: Vec<TreeNode>) -> Self {
        let size = children.iter().map(|c| c.size).sum();
        Self {
            path,
            name,
            extension: None,
            size,
            children: Some(children),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.children.is_some()
    }

    /// Immediate children (empty for files).
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Allow-list of file extensions.
///
/// Extensions are stored lowercased and without the leading dot, so
/// `".js"`, `"js"` and `".JS"` configure the same thing. An empty list
/// allows every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filetypes {
    extensions: Vec<String>,
}

impl Filetypes {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .collect(),
        }
    }

    /// Allow every file.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Check a lowercased extension (without dot) against the allow-list.
    pub fn allows(&self, extension: Option<&str>) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        match extension {
            Some(ext) => self.extensions.iter().any(|e| e == ext),
            None => false,
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_lowercase()
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

/// Walk `root` and build its tree.
///
/// Files whose extension is not in `filetypes` are left out of the tree and
/// never passed to `on_visit`. `on_visit` runs once for every kept file, in
/// depth-first order with a directory's contents before the directory.
/// Siblings are visited in file-name order.
///
/// Returns `Ok(None)` only when `root` is itself a file that the allow-list
/// rejects. Entries below the root that cannot be read are logged and
/// skipped.
pub fn walk_tree<F>(
    root: impl AsRef<Path>,
    filetypes: &Filetypes,
    mut on_visit: F,
) -> Result<Option<TreeNode>>
where
    F: FnMut(&TreeNode),
{
    let root = root.as_ref();

    if !root.exists() {
        return Err(UistatError::PathNotFound(root.to_path_buf()));
    }

    debug!("Walking tree at {:?}", root);

    // Contents-first order yields every child before its parent directory,
    // so `levels[d + 1]` holds exactly the finished children of the
    // directory at depth `d` when that directory comes out of the walker.
    let walker = WalkDir::new(root)
        .follow_links(true)
        .contents_first(true)
        .sort_by_file_name();

    let mut levels: Vec<Vec<TreeNode>> = vec![Vec::new()];

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        let depth = entry.depth();
        if levels.len() < depth + 2 {
            levels.resize_with(depth + 2, Vec::new);
        }

        let path = entry.path().to_path_buf();
        let name = entry.file_name().to_string_lossy().into_owned();

        if entry.file_type().is_dir() {
            let children = std::mem::take(&mut levels[depth + 1]);
            trace!("Directory {:?} with {} children", path, children.len());
            levels[depth].push(TreeNode::directory(path, name, children));
            continue;
        }

        let extension = extension_of(&path);
        if !filetypes.allows(extension.as_deref()) {
            trace!("Skipping {:?}: extension not allowed", path);
            continue;
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(err) => {
                warn!("Could not read metadata for {:?}: {}", path, err);
                0
            }
        };

        let node = TreeNode::file(path, name, extension, size);
        on_visit(&node);
        levels[depth].push(node);
    }

    Ok(levels.swap_remove(0).pop())
}
