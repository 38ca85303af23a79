//! Scan results and tree statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;
use crate::node::TreeNode;

/// Summary statistics for a scanned tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total size of all files in bytes.
    pub total_size: u64,
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories, including the root.
    pub total_dirs: u64,
    /// Deepest level reached (root is 0).
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk a tree and tally its contents.
    pub fn collect(root: &TreeNode) -> Self {
        let mut stats = Self::new();
        stats.visit(root, 0);
        stats
    }

    fn visit(&mut self, node: &TreeNode, depth: u32) {
        self.max_depth = self.max_depth.max(depth);
        match node {
            TreeNode::File(file) => {
                self.total_files += 1;
                self.total_size += file.size;
            }
            TreeNode::Directory(dir) => {
                self.total_dirs += 1;
                for child in &dir.children {
                    self.visit(child, depth + 1);
                }
            }
        }
    }
}

/// Outcome of a filesystem scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Root node, or `None` if the root was ignored or unreadable.
    pub root: Option<TreeNode>,

    /// Summary statistics (all zero when `root` is `None`).
    pub stats: TreeStats,

    /// Warnings encountered during scan.
    pub warnings: Vec<ScanWarning>,

    /// Duration of the scan.
    pub scan_duration: Duration,
}

impl ScanReport {
    /// Create a report, computing statistics from the root.
    pub fn new(root: Option<TreeNode>, warnings: Vec<ScanWarning>, scan_duration: Duration) -> Self {
        let stats = root.as_ref().map(TreeStats::collect).unwrap_or_default();
        Self {
            root,
            stats,
            warnings,
            scan_duration,
        }
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{DirectoryNode, FileNode};

    #[test]
    fn test_tree_stats_default() {
        let stats = TreeStats::default();
        assert_eq!(stats.total_size, 0);
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_dirs, 0);
    }

    #[test]
    fn test_tree_stats_collect() {
        let mut src = DirectoryNode::new("src");
        src.push(FileNode::new("a.js", 10));
        let mut root = DirectoryNode::new("proj");
        root.push(src);
        root.push(FileNode::new("README.md", 2048));

        let stats = TreeStats::collect(&root.into());
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_dirs, 2);
        assert_eq!(stats.total_size, 2058);
        assert_eq!(stats.max_depth, 2);
    }
}
