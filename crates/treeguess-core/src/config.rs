//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Default recursion depth below the scan root.
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Maximum depth to descend. The root is depth 0; directories at this
    /// depth are kept but not listed.
    #[builder(default = "DEFAULT_MAX_DEPTH")]
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Regular expressions tested against each entry's bare name.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Descend into symbolic links to directories. Link cycles end at
    /// `max_depth`.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl From<ScanConfigBuilderError> for ScanError {
    fn from(err: ScanConfigBuilderError) -> Self {
        ScanError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            ignore_patterns: Vec::new(),
            follow_symlinks: false,
        }
    }

    /// Ignore patterns with empty entries removed.
    ///
    /// An empty regex matches every name, which would hide the whole tree.
    pub fn effective_patterns(&self) -> impl Iterator<Item = &str> {
        self.ignore_patterns
            .iter()
            .map(|p| p.as_str())
            .filter(|p| !p.is_empty())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
