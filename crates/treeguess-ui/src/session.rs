//! Interactive session state.

use std::pin::pin;

use futures::future::{self, Either};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, info};
use treeguess_analyze::Analyzer;
use treeguess_core::{TreeNode, format_structure};
use treeguess_scan::{
    DirectoryEntry, EntryKind, EntryReader, ReadOutcome, ReadProgress, SelectedFile,
    fold_selection,
};

use crate::view::{Indicator, IndicatorGuard, View};

/// Application state for one interactive session.
///
/// Every action takes `&mut self`, so at most one read or analysis is in
/// flight at a time.
pub struct Session<V: View, A: Analyzer> {
    view: V,
    analyzer: A,
    model: String,
    last_structure: Option<String>,
    last_result: Option<String>,
}

impl<V: View, A: Analyzer> Session<V, A> {
    /// Create a session that analyzes with `model`.
    pub fn new(view: V, analyzer: A, model: impl Into<String>) -> Self {
        Self {
            view,
            analyzer,
            model: model.into(),
            last_structure: None,
            last_result: None,
        }
    }

    /// Get the view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Currently selected model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Select the model used by later analyses.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    /// Plain structure sent with the most recent analysis.
    pub fn last_structure(&self) -> Option<&str> {
        self.last_structure.as_deref()
    }

    /// Text shown in the result area after the most recent analysis.
    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    /// Process dropped entries one after another.
    ///
    /// Files are ignored. Each directory is read in full while its progress
    /// is shown, then displayed and analyzed. Returns how many directories
    /// were processed.
    pub async fn handle_drop<E, I>(&mut self, entries: I) -> usize
    where
        E: DirectoryEntry,
        I: IntoIterator<Item = E>,
    {
        let mut processed = 0;

        for entry in entries {
            if entry.kind() != EntryKind::Directory {
                debug!(name = entry.name(), "ignoring dropped file");
                continue;
            }

            let outcome = {
                let _processing = IndicatorGuard::show(&self.view, Indicator::Processing);
                self.read_with_progress(entry).await
            };
            let Some(outcome) = outcome else {
                continue;
            };

            for warning in &outcome.warnings {
                self.view.show_error(&warning.message);
            }

            self.present(outcome.root.into()).await;
            processed += 1;
        }

        processed
    }

    /// Read `entry` while forwarding progress to the view.
    async fn read_with_progress<E: DirectoryEntry>(&self, entry: E) -> Option<ReadOutcome> {
        let reader = EntryReader::new();
        let mut progress_rx = reader.subscribe();

        let outcome = {
            let read = pin!(reader.read(entry));
            let forward = pin!(forward_progress(&self.view, &mut progress_rx));
            match future::select(read, forward).await {
                Either::Left((outcome, _)) => outcome,
                Either::Right(((), read)) => read.await,
            }
        };

        // Updates sent after the forwarder was last polled.
        loop {
            match progress_rx.try_recv() {
                Ok(progress) => self.view.show_progress(&progress),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }

        outcome
    }

    /// Fold a picker selection into a tree, then display and analyze it.
    ///
    /// Returns `false` without touching the view when nothing was selected.
    pub async fn handle_selection<I>(&mut self, files: I) -> bool
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        let root = {
            let _processing = IndicatorGuard::show(&self.view, Indicator::Processing);
            fold_selection(files)
        };

        match root {
            Some(root) => {
                self.present(root.into()).await;
                true
            }
            None => {
                debug!("empty selection");
                false
            }
        }
    }

    /// Display `root` and analyze it under the loading indicator.
    pub async fn present(&mut self, root: TreeNode) {
        info!(root = root.name(), model = %self.model, "analyzing structure");

        let structure: &str = self.last_structure.insert(format_structure(&root));
        self.view.show_structure(&root, structure);

        let result = {
            let _loading = IndicatorGuard::show(&self.view, Indicator::Loading);
            self.analyzer.analyze(structure, &self.model).await
        };

        self.view.show_result(&result);
        self.last_result = Some(result);
    }
}

async fn forward_progress<V: View>(view: &V, progress_rx: &mut broadcast::Receiver<ReadProgress>) {
    loop {
        match progress_rx.recv().await {
            Ok(progress) => view.show_progress(&progress),
            Err(RecvError::Lagged(skipped)) => debug!(skipped, "progress updates dropped"),
            Err(RecvError::Closed) => break,
        }
    }
}
