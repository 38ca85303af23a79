//! Entry reader progress reporting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use compact_str::CompactString;

/// Progress information while an interactive source is being read.
#[derive(Debug, Clone)]
pub struct ReadProgress {
    /// Number of entries received so far, across all batches.
    pub entries_read: u64,
    /// Number of directories fully expanded so far.
    pub dirs_expanded: u64,
    /// Name of the directory whose batch was just received.
    pub current_dir: CompactString,
    /// Time elapsed since reading started.
    pub elapsed: Duration,
}

impl ReadProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            entries_read: 0,
            dirs_expanded: 0,
            current_dir: CompactString::default(),
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate read rate in entries per second.
    pub fn entries_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.entries_read as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ReadProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal progress counters with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    entries_read: AtomicU64,
    dirs_expanded: AtomicU64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            entries_read: AtomicU64::new(0),
            dirs_expanded: AtomicU64::new(0),
        }
    }

    pub fn record_batch(&self, len: usize) {
        self.entries_read.fetch_add(len as u64, Ordering::Relaxed);
    }

    pub fn record_dir(&self) {
        self.dirs_expanded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, current_dir: &str) -> ReadProgress {
        ReadProgress {
            entries_read: self.entries_read.load(Ordering::Relaxed),
            dirs_expanded: self.dirs_expanded.load(Ordering::Relaxed),
            current_dir: CompactString::new(current_dir),
            elapsed: self.start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_snapshot() {
        let tracker = ProgressTracker::new();
        tracker.record_batch(3);
        tracker.record_batch(2);
        tracker.record_dir();

        let snap = tracker.snapshot("src");
        assert_eq!(snap.entries_read, 5);
        assert_eq!(snap.dirs_expanded, 1);
        assert_eq!(snap.current_dir, "src");
    }

    #[test]
    fn test_rate_with_zero_elapsed() {
        assert_eq!(ReadProgress::new().entries_per_second(), 0.0);
    }
}
