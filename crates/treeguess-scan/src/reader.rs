//! Asynchronous reader for paginated directory handles.
//!
//! Interactive sources (drag-and-drop handles and the like) expose a
//! directory as a listing that hands out entries in batches, signalling the
//! end with an empty batch. [`EntryReader`] expands such a handle into a
//! [`DirectoryNode`], with no depth limit and no filtering.
//!
//! Every directory is one awaitable unit. A unit drains its listing, queues
//! one child unit per subdirectory as batches arrive, and resolves only once
//! all of its children have resolved. The future returned by
//! [`EntryReader::read`] therefore completes exactly when the whole subtree
//! is in memory.
//!
//! A listing is dropped as soon as it is drained, and at most
//! [`MAX_OPEN_LISTINGS`] listings are open at any time.

use std::io;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use futures::future::{self, LocalBoxFuture};
use futures::stream::FuturesOrdered;
use futures::{FutureExt, StreamExt};
use tokio::sync::{Semaphore, broadcast};
use tracing::{debug, warn};

use treeguess_core::{DirectoryNode, FileNode, ScanWarning, TreeNode};

use crate::progress::{ProgressTracker, ReadProgress};

/// What an entry is, as reported by its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file with its size in bytes.
    File { size: u64 },
    /// Directory that can be listed.
    Directory,
}

/// A file or directory handle from an interactive source.
pub trait DirectoryEntry: Sized + 'static {
    /// Paginated listing produced by [`create_reader`](Self::create_reader).
    type Listing: EntryListing<Entry = Self> + 'static;

    /// Bare entry name.
    fn name(&self) -> &str;

    /// Kind of entry.
    fn kind(&self) -> EntryKind;

    /// Open a listing over this directory's children.
    fn create_reader(&self) -> Self::Listing;
}

/// A directory listing that yields entries in batches.
pub trait EntryListing {
    /// Entry type handed out by this listing.
    type Entry;

    /// Read the next batch. An empty batch means the listing is exhausted.
    fn read_entries(&mut self) -> LocalBoxFuture<'_, io::Result<Vec<Self::Entry>>>;
}

/// Result of reading an interactive source.
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    /// Fully expanded root directory.
    pub root: DirectoryNode,
    /// Listings that failed part-way. Paths are relative to the root.
    pub warnings: Vec<ScanWarning>,
}

/// Directories whose listings may be open at the same time during one read.
pub const MAX_OPEN_LISTINGS: usize = 16;

/// A completed unit: one node plus the warnings from its subtree.
struct Expanded<N> {
    node: N,
    warnings: Vec<ScanWarning>,
}

/// State shared by every unit of one read.
struct ReadContext {
    tracker: ProgressTracker,
    listings: Semaphore,
}

/// Expands directory handles into trees.
pub struct EntryReader {
    progress_tx: broadcast::Sender<ReadProgress>,
}

impl EntryReader {
    /// Create a new reader.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to read progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ReadProgress> {
        self.progress_tx.subscribe()
    }

    /// Expand a directory handle completely.
    ///
    /// Returns `None` when `root` is not a directory.
    pub async fn read<E: DirectoryEntry>(&self, root: E) -> Option<ReadOutcome> {
        if root.kind() != EntryKind::Directory {
            return None;
        }

        let ctx = ReadContext {
            tracker: ProgressTracker::new(),
            listings: Semaphore::new(MAX_OPEN_LISTINGS),
        };
        let path = PathBuf::from(root.name());
        let Expanded { node, warnings } = self.expand(root, path, &ctx).await;

        Some(ReadOutcome {
            root: node,
            warnings,
        })
    }

    fn expand<'a, E: DirectoryEntry>(
        &'a self,
        entry: E,
        path: PathBuf,
        ctx: &'a ReadContext,
    ) -> LocalBoxFuture<'a, Expanded<DirectoryNode>> {
        Box::pin(async move {
            let mut node = DirectoryNode::new(entry.name());
            let mut warnings = Vec::new();
            let mut pending = FuturesOrdered::new();

            {
                // Held while draining only, never while awaiting children.
                let _permit = ctx.listings.acquire().await.ok();
                let mut listing = entry.create_reader();

                loop {
                    match listing.read_entries().await {
                        Ok(batch) if batch.is_empty() => break,
                        Ok(batch) => {
                            ctx.tracker.record_batch(batch.len());
                            let _ = self.progress_tx.send(ctx.tracker.snapshot(entry.name()));

                            for child in batch {
                                pending.push_back(self.child_unit(child, &path, ctx));
                            }
                        }
                        Err(err) => {
                            let warning = ScanWarning::read_error(&path, &err);
                            warn!(path = %path.display(), "{}", warning.message);
                            warnings.push(warning);
                            break;
                        }
                    }
                }
            }

            while let Some(child) = pending.next().await {
                node.children.push(child.node);
                warnings.extend(child.warnings);
            }

            ctx.tracker.record_dir();
            debug!(path = %path.display(), children = node.children.len(), "expanded");

            Expanded { node, warnings }
        })
    }

    fn child_unit<'a, E: DirectoryEntry>(
        &'a self,
        child: E,
        parent: &Path,
        ctx: &'a ReadContext,
    ) -> LocalBoxFuture<'a, Expanded<TreeNode>> {
        match child.kind() {
            EntryKind::File { size } => future::ready(Expanded {
                node: FileNode::new(CompactString::new(child.name()), size).into(),
                warnings: Vec::new(),
            })
            .boxed_local(),
            EntryKind::Directory => {
                let path = parent.join(child.name());
                self.expand(child, path, ctx)
                    .map(|dir| Expanded {
                        node: dir.node.into(),
                        warnings: dir.warnings,
                    })
                    .boxed_local()
            }
        }
    }
}

impl Default for EntryReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    thread_local! {
        static OPEN_LISTINGS: Cell<usize> = const { Cell::new(0) };
        static PEAK_LISTINGS: Cell<usize> = const { Cell::new(0) };
    }

    /// In-memory handle that serves its children `page` at a time.
    #[derive(Clone)]
    struct MemEntry {
        name: &'static str,
        kind: EntryKind,
        children: Rc<Vec<MemEntry>>,
        page: usize,
        fail_after: Option<usize>,
    }

    impl MemEntry {
        fn file(name: &'static str, size: u64) -> Self {
            Self {
                name,
                kind: EntryKind::File { size },
                children: Rc::new(Vec::new()),
                page: 1,
                fail_after: None,
            }
        }

        fn dir(name: &'static str, page: usize, children: Vec<MemEntry>) -> Self {
            Self {
                name,
                kind: EntryKind::Directory,
                children: Rc::new(children),
                page,
                fail_after: None,
            }
        }
    }

    struct MemListing {
        children: Rc<Vec<MemEntry>>,
        page: usize,
        offset: usize,
        calls: usize,
        fail_after: Option<usize>,
    }

    impl Drop for MemListing {
        fn drop(&mut self) {
            OPEN_LISTINGS.with(|open| open.set(open.get() - 1));
        }
    }

    impl EntryListing for MemListing {
        type Entry = MemEntry;

        fn read_entries(&mut self) -> LocalBoxFuture<'_, io::Result<Vec<MemEntry>>> {
            Box::pin(async move {
                if self.fail_after == Some(self.calls) {
                    return Err(io::Error::new(io::ErrorKind::Other, "listing broke"));
                }
                self.calls += 1;
                tokio::task::yield_now().await;
                let end = (self.offset + self.page).min(self.children.len());
                let batch = self.children[self.offset..end].to_vec();
                self.offset = end;
                Ok(batch)
            })
        }
    }

    impl DirectoryEntry for MemEntry {
        type Listing = MemListing;

        fn name(&self) -> &str {
            self.name
        }

        fn kind(&self) -> EntryKind {
            self.kind
        }

        fn create_reader(&self) -> MemListing {
            let open = OPEN_LISTINGS.with(|open| {
                open.set(open.get() + 1);
                open.get()
            });
            PEAK_LISTINGS.with(|peak| peak.set(peak.get().max(open)));

            MemListing {
                children: Rc::clone(&self.children),
                page: self.page,
                offset: 0,
                calls: 0,
                fail_after: self.fail_after,
            }
        }
    }

    fn names(dir: &DirectoryNode) -> Vec<&str> {
        dir.children.iter().map(|c| c.name()).collect()
    }

    #[tokio::test]
    async fn test_reads_all_pages_before_completing() {
        let root = MemEntry::dir(
            "proj",
            2,
            vec![
                MemEntry::file("a.txt", 1),
                MemEntry::dir("src", 1, vec![
                    MemEntry::file("main.rs", 10),
                    MemEntry::dir("nested", 1, vec![MemEntry::file("deep.rs", 5)]),
                ]),
                MemEntry::file("b.txt", 2),
                MemEntry::file("c.txt", 3),
                MemEntry::file("d.txt", 4),
            ],
        );

        let outcome = EntryReader::new().read(root).await.unwrap();

        assert_eq!(names(&outcome.root), vec!["a.txt", "src", "b.txt", "c.txt", "d.txt"]);
        let src = outcome.root.children[1].as_dir().unwrap();
        assert_eq!(names(src), vec!["main.rs", "nested"]);
        let nested = src.children[1].as_dir().unwrap();
        assert_eq!(names(nested), vec!["deep.rs"]);
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_file_root_is_rejected() {
        assert!(EntryReader::new().read(MemEntry::file("x", 1)).await.is_none());
    }

    #[tokio::test]
    async fn test_failed_listing_keeps_partial_children() {
        let mut broken = MemEntry::dir("broken", 1, vec![
            MemEntry::file("first", 1),
            MemEntry::file("second", 1),
        ]);
        broken.fail_after = Some(1);
        let root = MemEntry::dir("root", 10, vec![broken]);

        let outcome = EntryReader::new().read(root).await.unwrap();

        let broken = outcome.root.children[0].as_dir().unwrap();
        assert_eq!(names(broken), vec!["first"]);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].path, PathBuf::from("root/broken"));
    }

    #[tokio::test]
    async fn test_progress_is_broadcast() {
        let reader = EntryReader::new();
        let mut rx = reader.subscribe();
        let root = MemEntry::dir("root", 1, vec![MemEntry::file("a", 1), MemEntry::file("b", 1)]);

        reader.read(root).await.unwrap();

        let mut last = ReadProgress::new();
        while let Ok(progress) = rx.try_recv() {
            last = progress;
        }
        assert_eq!(last.entries_read, 2);
        assert_eq!(last.current_dir, "root");
    }

    #[tokio::test]
    async fn test_wide_tree_bounds_open_listings() {
        let packages: Vec<MemEntry> = (0..300)
            .map(|_| {
                MemEntry::dir("pkg", 1, vec![MemEntry::dir("lib", 1, vec![MemEntry::file("x.js", 1)])])
            })
            .collect();
        let root = MemEntry::dir("node_modules", 50, packages);

        let outcome = EntryReader::new().read(root).await.unwrap();

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.root.children.len(), 300);
        for pkg in &outcome.root.children {
            let lib = pkg.children()[0].as_dir().unwrap();
            assert_eq!(names(lib), vec!["x.js"]);
        }
        assert_eq!(OPEN_LISTINGS.with(Cell::get), 0);
        let peak = PEAK_LISTINGS.with(Cell::get);
        assert!(peak <= MAX_OPEN_LISTINGS, "peak open listings {peak}");
    }
}
