//! Bounded recursive directory scanner.

use std::fs::{self, Metadata};
use std::path::Path;
use std::time::Instant;

use compact_str::CompactString;
use tracing::{debug, warn};

use treeguess_core::{
    DirectoryNode, FileNode, ScanConfig, ScanError, ScanReport, ScanWarning, TreeNode,
};

use crate::ignore::IgnoreSet;
use crate::path::{absolute_lexical, node_name};

/// Synchronous depth-bounded scanner over the local filesystem.
///
/// Children are visited in the order the OS lists them. Directories at
/// `max_depth` are kept but not listed, and are marked `truncated`.
///
/// A symbolic link to a file appears as that file under the link's name. A
/// link to a directory is descended only when `follow_symlinks` is set, and
/// otherwise appears as a file of the link's own size, as does a dangling
/// link. The root is always followed.
#[derive(Debug, Default)]
pub struct FsScanner;

impl FsScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Perform a scan of the configured root.
    ///
    /// Only an invalid ignore pattern fails the scan. Unreadable paths,
    /// including the root, become warnings and are left out of the tree.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        let ignore = IgnoreSet::new(config.effective_patterns())?;

        let mut walk = Walk {
            config,
            ignore: &ignore,
            warnings: Vec::new(),
        };

        let root = match absolute_lexical(&config.root) {
            Ok(root_path) => walk.visit(&root_path, 0),
            Err(err) => {
                walk.record(ScanWarning::metadata_error(&config.root, &err));
                None
            }
        };

        Ok(ScanReport::new(root, walk.warnings, start.elapsed()))
    }
}

/// Scan `root` with the given depth bound and ignore patterns.
pub fn scan(
    root: impl AsRef<Path>,
    max_depth: u32,
    ignore_patterns: &[String],
) -> Result<Option<TreeNode>, ScanError> {
    let config = ScanConfig {
        max_depth,
        ignore_patterns: ignore_patterns.to_vec(),
        ..ScanConfig::new(root.as_ref())
    };
    Ok(FsScanner::new().scan(&config)?.root)
}

/// Per-scan traversal state.
struct Walk<'a> {
    config: &'a ScanConfig,
    ignore: &'a IgnoreSet,
    warnings: Vec<ScanWarning>,
}

impl Walk<'_> {
    fn visit(&mut self, path: &Path, depth: u32) -> Option<TreeNode> {
        let name = node_name(path);

        if self.ignore.is_ignored(&name) {
            debug!(path = %path.display(), "ignored");
            return None;
        }

        let metadata = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(err) => {
                self.record(ScanWarning::metadata_error(path, &err));
                return None;
            }
        };

        if metadata.file_type().is_symlink() {
            return self.visit_link(path, name, &metadata, depth);
        }

        let file_type = metadata.file_type();
        if file_type.is_file() {
            Some(FileNode::new(name, metadata.len()).into())
        } else if file_type.is_dir() {
            self.visit_dir(path, name, depth).map(TreeNode::from)
        } else {
            debug!(path = %path.display(), "skipping special file");
            None
        }
    }

    fn visit_link(
        &mut self,
        path: &Path,
        name: CompactString,
        link: &Metadata,
        depth: u32,
    ) -> Option<TreeNode> {
        match fs::metadata(path) {
            Ok(target) if target.is_file() => Some(FileNode::new(name, target.len()).into()),
            Ok(target) if target.is_dir() && (depth == 0 || self.config.follow_symlinks) => {
                self.visit_dir(path, name, depth).map(TreeNode::from)
            }
            Ok(_) => Some(FileNode::new(name, link.len()).into()),
            Err(err) => {
                debug!(path = %path.display(), "dangling link: {err}");
                Some(FileNode::new(name, link.len()).into())
            }
        }
    }

    fn visit_dir(&mut self, path: &Path, name: CompactString, depth: u32) -> Option<DirectoryNode> {
        let mut node = DirectoryNode::new(name);

        if depth >= self.config.max_depth {
            node.truncated = true;
            return Some(node);
        }

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(err) => {
                self.record(ScanWarning::read_error(path, &err));
                return None;
            }
        };

        for entry in entries {
            match entry {
                Ok(entry) => {
                    if let Some(child) = self.visit(&entry.path(), depth + 1) {
                        node.children.push(child);
                    }
                }
                Err(err) => self.record(ScanWarning::read_error(path, &err)),
            }
        }

        Some(node)
    }

    fn record(&mut self, warning: ScanWarning) {
        warn!(path = %warning.path.display(), "{}", warning.message);
        self.warnings.push(warning);
    }
}
