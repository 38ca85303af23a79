//! Path helpers shared by the scanner and filesystem entries.

use std::io;
use std::path::{Component, Path, PathBuf};

use compact_str::CompactString;

/// Absolute form of `path` with `.` and `..` resolved lexically.
///
/// Symbolic links are not resolved, so the last segment stays the name the
/// caller gave.
pub(crate) fn absolute_lexical(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Final path segment, or the whole path when there is none (e.g. `/`).
pub(crate) fn node_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dots_are_resolved() {
        let base = std::env::current_dir().unwrap();
        assert_eq!(absolute_lexical(Path::new(".")).unwrap(), base);
        assert_eq!(
            absolute_lexical(Path::new("a/./b/../c")).unwrap(),
            base.join("a").join("c")
        );
    }

    #[test]
    fn test_node_name_of_root_path() {
        assert_eq!(node_name(Path::new("/")), "/");
        assert_eq!(node_name(Path::new("/a/b")), "b");
    }

    #[test]
    fn test_name_of_relative_dot() {
        let base = std::env::current_dir().unwrap();
        let name = node_name(&absolute_lexical(Path::new(".")).unwrap());
        assert_eq!(name, node_name(&base));
    }
}
