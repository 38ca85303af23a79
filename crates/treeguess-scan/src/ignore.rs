//! Name-based ignore matching.

use regex::RegexSet;
use treeguess_core::ScanError;

/// Compiled set of ignore patterns.
///
/// Each pattern is an unanchored regular expression tested against an
/// entry's bare name. A match excludes the entry and its whole subtree.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    set: RegexSet,
}

impl IgnoreSet {
    /// Compile a set of patterns.
    pub fn new<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<Self, ScanError> {
        let set = RegexSet::new(patterns).map_err(|e| ScanError::InvalidPattern {
            message: e.to_string(),
        })?;
        Ok(Self { set })
    }

    /// Check whether a name matches any pattern.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.set.is_match(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_bare_name() {
        let set = IgnoreSet::new(["node_modules", r"\.log$"]).unwrap();

        assert!(set.is_ignored("node_modules"));
        assert!(set.is_ignored("debug.log"));
        assert!(!set.is_ignored("src"));
    }

    #[test]
    fn test_unanchored_search() {
        let set = IgnoreSet::new(["test"]).unwrap();
        assert!(set.is_ignored("my_tests"));
    }

    #[test]
    fn test_empty_set_ignores_nothing() {
        let set = IgnoreSet::new(std::iter::empty()).unwrap();
        assert!(!set.is_ignored("anything"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = IgnoreSet::new(["("]).unwrap_err();
        assert!(matches!(err, ScanError::InvalidPattern { .. }));
    }
}
