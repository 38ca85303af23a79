//! Directory traversal for treeguess.
//!
//! Two traversal paths produce the same [`TreeNode`] model:
//!
//! - **Filesystem scanning** ([`FsScanner`]) walks a local path
//!   synchronously, bounded by depth and filtered by regex ignore patterns.
//! - **Interactive reading** ([`EntryReader`]) expands a paginated,
//!   asynchronous directory handle with no limit or filtering, and
//!   [`fold_selection`] folds a flat picker selection into a tree.
//!
//! # Example
//!
//! ```rust,no_run
//! use treeguess_scan::{FsScanner, ScanConfig, format_structure};
//!
//! let config = ScanConfig::new("/path/to/project");
//! let report = FsScanner::new().scan(&config).unwrap();
//!
//! if let Some(root) = &report.root {
//!     print!("{}", format_structure(root));
//! }
//! ```
//!
//! # Interactive sources
//!
//! ```rust,no_run
//! use treeguess_scan::{EntryReader, FsEntry};
//!
//! # async fn run() -> std::io::Result<()> {
//! let entry = FsEntry::open("/path/to/project").await?.with_page_size(50);
//! let reader = EntryReader::new();
//! let mut progress_rx = reader.subscribe();
//!
//! let outcome = reader.read(entry).await;
//! while let Ok(progress) = progress_rx.try_recv() {
//!     println!("Read {} entries", progress.entries_read);
//! }
//! # Ok(())
//! # }
//! ```

mod fs_entry;
mod ignore;
mod path;
mod progress;
mod reader;
mod scanner;
mod selection;

pub use fs_entry::{DEFAULT_PAGE_SIZE, FsEntry, FsListing};
pub use ignore::IgnoreSet;
pub use progress::ReadProgress;
pub use reader::{
    DirectoryEntry, EntryKind, EntryListing, EntryReader, MAX_OPEN_LISTINGS, ReadOutcome,
};
pub use scanner::{FsScanner, scan};
pub use selection::{SelectedFile, fold_selection};

// Re-export core types for convenience
pub use treeguess_core::{
    DirectoryNode, FileNode, ScanConfig, ScanError, ScanReport, ScanWarning, TreeNode, TreeStats,
    WarningKind, format_structure,
};
