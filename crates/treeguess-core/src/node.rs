//! File and directory node types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A regular file in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// File name (single path segment).
    pub name: CompactString,

    /// Size in bytes.
    pub size: u64,

    /// Lower-cased extension without the leading dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<CompactString>,
}

impl FileNode {
    /// Create a file node, deriving the extension from the name.
    pub fn new(name: impl Into<CompactString>, size: u64) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            name,
            size,
            extension,
        }
    }
}

/// A directory and its children, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectoryNode {
    /// Directory name (single path segment).
    pub name: CompactString,

    /// Children in the order they were read. Not sorted.
    #[serde(default)]
    pub children: Vec<TreeNode>,

    /// Set when the directory sits at the depth bound and its
    /// children were not listed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl DirectoryNode {
    /// Create an empty directory node.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            truncated: false,
        }
    }

    /// Append a child.
    pub fn push(&mut self, child: impl Into<TreeNode>) {
        self.children.push(child.into());
    }

    /// Find a direct child directory by name.
    pub fn child_dir_mut(&mut self, name: &str) -> Option<&mut DirectoryNode> {
        self.children.iter_mut().find_map(|child| match child {
            TreeNode::Directory(dir) if dir.name == name => Some(dir),
            _ => None,
        })
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// A node in the directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    File(FileNode),
    Directory(DirectoryNode),
}

impl TreeNode {
    /// Node name.
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File(file) => &file.name,
            TreeNode::Directory(dir) => &dir.name,
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }

    /// Check if this node is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, TreeNode::File(_))
    }

    /// Direct children (always empty for files).
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::File(_) => &[],
            TreeNode::Directory(dir) => &dir.children,
        }
    }

    /// Borrow as a directory, if it is one.
    pub fn as_dir(&self) -> Option<&DirectoryNode> {
        match self {
            TreeNode::Directory(dir) => Some(dir),
            TreeNode::File(_) => None,
        }
    }

    /// Borrow as a file, if it is one.
    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            TreeNode::File(file) => Some(file),
            TreeNode::Directory(_) => None,
        }
    }
}

impl From<FileNode> for TreeNode {
    fn from(file: FileNode) -> Self {
        TreeNode::File(file)
    }
}

impl From<DirectoryNode> for TreeNode {
    fn from(dir: DirectoryNode) -> Self {
        TreeNode::Directory(dir)
    }
}

/// Lower-cased extension of a file name, without the dot.
///
/// Names without a dot, ending in a dot, or whose only dot is the leading
/// one (`.gitignore`) have no extension.
pub fn extension_of(name: &str) -> Option<CompactString> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(CompactString::new(ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_node_extension() {
        assert_eq!(FileNode::new("main.RS", 1).extension.as_deref(), Some("rs"));
        assert_eq!(
            FileNode::new("archive.tar.gz", 1).extension.as_deref(),
            Some("gz")
        );
        assert_eq!(FileNode::new("Makefile", 1).extension, None);
        assert_eq!(FileNode::new(".gitignore", 1).extension, None);
        assert_eq!(FileNode::new("weird.", 1).extension, None);
    }

    #[test]
    fn test_node_kind_discrimination() {
        let file: TreeNode = FileNode::new("a.txt", 3).into();
        assert!(file.is_file());
        assert!(!file.is_dir());
        assert!(file.children().is_empty());
        assert!(file.as_dir().is_none());

        let dir: TreeNode = DirectoryNode::new("src").into();
        assert!(dir.is_dir());
        assert_eq!(dir.name(), "src");
        assert!(dir.as_file().is_none());
    }

    #[test]
    fn test_child_dir_lookup_skips_files() {
        let mut dir = DirectoryNode::new("root");
        dir.push(FileNode::new("lib", 1));
        dir.push(DirectoryNode::new("lib"));

        let found = dir.child_dir_mut("lib").unwrap();
        assert_eq!(found.name, "lib");
        assert!(dir.child_dir_mut("missing").is_none());
        assert_eq!(dir.child_count(), 2);
    }
}
