//! Core types for treeguess.
//!
//! This crate provides the tree model shared by every traversal path,
//! scan configuration, error types, and the text formatter whose output
//! is embedded in analysis prompts.

mod config;
mod error;
mod format;
mod node;
mod style;
mod tree;

pub use config::{DEFAULT_MAX_DEPTH, ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use format::{format_file_size, format_structure, format_structure_with};
pub use node::{DirectoryNode, FileNode, TreeNode, extension_of};
pub use style::{DEFAULT_STYLE, FileStyle, file_style};
pub use tree::{ScanReport, TreeStats};
