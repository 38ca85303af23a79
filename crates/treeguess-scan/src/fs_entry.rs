//! Directory handles backed by the local filesystem.

use std::io;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use futures::future::LocalBoxFuture;
use tokio::fs;
use tracing::warn;

use crate::path::{absolute_lexical, node_name};
use crate::reader::{DirectoryEntry, EntryKind, EntryListing};

/// Default number of entries per listing batch.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// A filesystem path exposed as a paginated directory handle.
///
/// A symbolic link to a file is reported as that file. Links to directories
/// and dangling links are reported as files of the link's own size, since
/// the reader has no depth bound to stop a link cycle. Special files are not
/// reported.
#[derive(Debug, Clone)]
pub struct FsEntry {
    path: PathBuf,
    name: CompactString,
    kind: EntryKind,
    page_size: usize,
}

impl FsEntry {
    /// Open a handle for `path`. The handle keeps the name given in `path`
    /// even when it is a symbolic link.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = absolute_lexical(path.as_ref())?;
        let metadata = fs::metadata(&path).await?;
        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File {
                size: metadata.len(),
            }
        };
        let name = node_name(&path);

        Ok(Self {
            path,
            name,
            kind,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Set how many entries each listing batch holds (at least one).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl DirectoryEntry for FsEntry {
    type Listing = FsListing;

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntryKind {
        self.kind
    }

    fn create_reader(&self) -> FsListing {
        FsListing {
            path: self.path.clone(),
            page_size: self.page_size,
            read_dir: None,
            done: false,
        }
    }
}

/// Paginated listing over a filesystem directory.
#[derive(Debug)]
pub struct FsListing {
    path: PathBuf,
    page_size: usize,
    read_dir: Option<fs::ReadDir>,
    done: bool,
}

impl EntryListing for FsListing {
    type Entry = FsEntry;

    fn read_entries(&mut self) -> LocalBoxFuture<'_, io::Result<Vec<FsEntry>>> {
        Box::pin(async move {
            if self.done {
                return Ok(Vec::new());
            }

            let batch = self.next_batch().await;
            if !matches!(&batch, Ok(entries) if !entries.is_empty()) {
                // Release the directory handle as soon as nothing is left.
                self.done = true;
                self.read_dir = None;
            }
            batch
        })
    }
}

impl FsListing {
    /// Collect up to one page of reportable entries.
    ///
    /// Skipped entries do not count towards the page, so a batch is only
    /// empty once the directory is exhausted.
    async fn next_batch(&mut self) -> io::Result<Vec<FsEntry>> {
        if self.read_dir.is_none() {
            self.read_dir = Some(fs::read_dir(&self.path).await?);
        }
        let Some(read_dir) = self.read_dir.as_mut() else {
            return Ok(Vec::new());
        };

        let mut batch = Vec::with_capacity(self.page_size);
        while batch.len() < self.page_size {
            let Some(entry) = read_dir.next_entry().await? else {
                break;
            };

            let path = entry.path();
            let kind = match entry_kind(&path).await {
                Ok(Some(kind)) => kind,
                Ok(None) => continue,
                Err(err) => {
                    warn!(path = %path.display(), "skipping entry: {err}");
                    continue;
                }
            };

            batch.push(FsEntry {
                name: CompactString::new(entry.file_name().to_string_lossy()),
                path,
                kind,
                page_size: self.page_size,
            });
        }

        Ok(batch)
    }
}

/// Kind of a listed path, or `None` for special files.
async fn entry_kind(path: &Path) -> io::Result<Option<EntryKind>> {
    let metadata = fs::symlink_metadata(path).await?;

    if metadata.file_type().is_symlink() {
        let size = match fs::metadata(path).await {
            Ok(target) if target.is_file() => target.len(),
            _ => metadata.len(),
        };
        return Ok(Some(EntryKind::File { size }));
    }

    Ok(if metadata.is_dir() {
        Some(EntryKind::Directory)
    } else if metadata.is_file() {
        Some(EntryKind::File {
            size: metadata.len(),
        })
    } else {
        None
    })
}
