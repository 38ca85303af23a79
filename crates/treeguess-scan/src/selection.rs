//! Folding a flat file selection into a tree.

use tracing::debug;

use treeguess_core::{DirectoryNode, FileNode};

/// A file from a directory-picker selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Path relative to the picked directory's parent, `/`-separated,
    /// starting with the picked directory's own name.
    pub relative_path: String,
    /// Size in bytes.
    pub size: u64,
}

impl SelectedFile {
    /// Create a selected file.
    pub fn new(relative_path: impl Into<String>, size: u64) -> Self {
        Self {
            relative_path: relative_path.into(),
            size,
        }
    }
}

/// Build a directory tree from a flat selection.
///
/// The first segment of the first file names the root; the leading segment
/// of every later path is assumed to be the same root. Intermediate
/// directories are created on first reference and reused afterwards.
/// Returns `None` for an empty selection.
pub fn fold_selection<I>(files: I) -> Option<DirectoryNode>
where
    I: IntoIterator<Item = SelectedFile>,
{
    let mut root: Option<DirectoryNode> = None;

    for file in files {
        let segments: Vec<&str> = file
            .relative_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let Some((first, rest)) = segments.split_first() else {
            continue;
        };
        let root = root.get_or_insert_with(|| DirectoryNode::new(*first));

        let Some((name, dirs)) = rest.split_last() else {
            debug!(path = %file.relative_path, "no file below selection root");
            continue;
        };

        insert(root, dirs, FileNode::new(*name, file.size));
    }

    root
}

fn insert(dir: &mut DirectoryNode, dirs: &[&str], file: FileNode) {
    let Some((name, rest)) = dirs.split_first() else {
        dir.push(file);
        return;
    };

    if let Some(child) = dir.child_dir_mut(name) {
        insert(child, rest, file);
        return;
    }

    let mut child = DirectoryNode::new(*name);
    insert(&mut child, rest, file);
    dir.push(child);
}

#[cfg(test)]
mod tests {
    use super::*;
    use treeguess_core::format_structure;

    #[test]
    fn test_reuses_intermediate_directories() {
        let root = fold_selection([
            SelectedFile::new("proj/src/a.js", 10),
            SelectedFile::new("proj/src/b.js", 20),
            SelectedFile::new("proj/README.md", 2048),
        ])
        .unwrap();

        assert_eq!(root.name, "proj");
        assert_eq!(root.children.len(), 2);
        let src = root.children[0].as_dir().unwrap();
        assert_eq!(src.children.len(), 2);

        assert_eq!(
            format_structure(&root.into()),
            "📁 proj/\n  📁 src/\n    - a.js (10 B)\n    - b.js (20 B)\n  - README.md (2.00 KB)\n"
        );
    }

    #[test]
    fn test_empty_selection() {
        assert!(fold_selection(Vec::<SelectedFile>::new()).is_none());
    }

    #[test]
    fn test_skips_paths_without_file_segment() {
        let root = fold_selection([
            SelectedFile::new("proj", 1),
            SelectedFile::new("proj//lib//x.rs", 3),
        ])
        .unwrap();

        assert_eq!(root.children.len(), 1);
        let lib = root.children[0].as_dir().unwrap();
        assert_eq!(lib.name, "lib");
        assert_eq!(lib.children[0].name(), "x.rs");
    }
}
