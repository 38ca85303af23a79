//! Terminal implementation of [`View`].

use std::cell::Cell;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::cursor::MoveToPreviousLine;
use crossterm::execute;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;
use treeguess_core::{FileNode, TreeNode, file_style, format_structure_with};
use treeguess_scan::ReadProgress;

use crate::view::{Indicator, View};

const RULE_WIDTH: usize = 50;

/// Number of writes made through [`LogWriter`].
static LOG_WRITES: AtomicU64 = AtomicU64::new(0);

/// Stderr writer for log output.
///
/// Pass `LogWriter::new` to the tracing subscriber so that [`ConsoleView`]
/// never erases a log line in place of its status line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWriter;

impl LogWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        LOG_WRITES.fetch_add(1, Ordering::Relaxed);
        io::stderr().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Prints structures and results to stdout, status and errors to stderr.
pub struct ConsoleView {
    color: bool,
    erase_status: bool,
    /// Log write count when the status line was printed, while it is the
    /// last line on stderr.
    status: Cell<Option<u64>>,
}

impl ConsoleView {
    /// Create a console view. With `color` set, file names are styled by
    /// extension.
    pub fn new(color: bool) -> Self {
        Self {
            color,
            erase_status: io::stderr().is_terminal(),
            status: Cell::new(None),
        }
    }

    /// Text printed for a structure.
    pub fn render_structure(&self, root: &TreeNode, structure: &str) -> String {
        if self.color {
            format_structure_with(root, styled_name)
        } else {
            structure.to_string()
        }
    }

    /// Text printed for an analysis result.
    pub fn render_result(text: &str) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        format!("Analysis result:\n{rule}\n{text}\n{rule}")
    }

    /// Status text while a directory is being read.
    pub fn render_progress(progress: &ReadProgress) -> String {
        format!(
            "{} {} entries ({})",
            Indicator::Processing.label(),
            progress.entries_read,
            progress.current_dir
        )
    }

    /// The status line is still the last line on stderr.
    fn status_intact(&self) -> bool {
        self.status.get() == Some(LOG_WRITES.load(Ordering::Relaxed))
    }

    fn open_status(&self, text: &str) {
        if self.color {
            eprintln!("{}", text.dark_grey());
        } else {
            eprintln!("{text}");
        }
        self.status.set(Some(LOG_WRITES.load(Ordering::Relaxed)));
    }

    fn close_status(&self) {
        let intact = self.status_intact();
        self.status.set(None);
        if !(intact && self.erase_status) {
            return;
        }
        if let Err(err) = execute!(
            io::stderr(),
            MoveToPreviousLine(1),
            Clear(ClearType::CurrentLine)
        ) {
            debug!("cannot erase status line: {err}");
        }
    }
}

impl View for ConsoleView {
    fn set_indicator(&self, indicator: Indicator, visible: bool) {
        self.close_status();
        if visible {
            self.open_status(indicator.label());
        }
    }

    fn show_progress(&self, progress: &ReadProgress) {
        // Redrawing only works in place.
        if !self.erase_status || !self.status_intact() {
            return;
        }
        self.close_status();
        self.open_status(&Self::render_progress(progress));
    }

    fn show_structure(&self, root: &TreeNode, structure: &str) {
        self.status.set(None);
        print!("{}", self.render_structure(root, structure));
        println!();
    }

    fn show_result(&self, text: &str) {
        self.status.set(None);
        println!("{}", Self::render_result(text));
    }

    fn show_error(&self, message: &str) {
        self.status.set(None);
        if self.color {
            eprintln!("{} {message}", "warning:".yellow().bold());
        } else {
            eprintln!("warning: {message}");
        }
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Icon plus name in the extension's colour.
fn styled_name(file: &FileNode) -> String {
    let style = file_style(file.extension.as_deref());
    let (r, g, b) = style.color;
    format!("{} {}", style.icon, file.name.as_str().with(Color::Rgb { r, g, b }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use treeguess_core::{DirectoryNode, format_structure};

    fn sample() -> TreeNode {
        let mut root = DirectoryNode::new("proj");
        root.push(FileNode::new("main.rs", 10));
        root.into()
    }

    #[test]
    fn test_plain_render_matches_payload() {
        let root = sample();
        let structure = format_structure(&root);
        let view = ConsoleView::new(false);
        assert_eq!(view.render_structure(&root, &structure), structure);
    }

    #[test]
    fn test_colored_render_keeps_layout() {
        let root = sample();
        let structure = format_structure(&root);
        let rendered = ConsoleView::new(true).render_structure(&root, &structure);

        assert!(rendered.starts_with("📁 proj/\n  - 🦀 "));
        assert!(rendered.contains("main.rs"));
        assert!(rendered.ends_with(" (10 B)\n"));
    }

    #[test]
    fn test_result_between_rules() {
        let rendered = ConsoleView::render_result("A web app");
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "-".repeat(RULE_WIDTH));
        assert_eq!(lines[2], "A web app");
        assert_eq!(lines[3], lines[1]);
    }

    #[test]
    fn test_progress_status_text() {
        let progress = ReadProgress {
            entries_read: 42,
            current_dir: "src".into(),
            ..ReadProgress::new()
        };
        assert_eq!(
            ConsoleView::render_progress(&progress),
            "Reading directory... 42 entries (src)"
        );
    }

    #[test]
    fn test_log_output_keeps_status_line() {
        let view = ConsoleView::new(false);
        view.set_indicator(Indicator::Processing, true);
        assert!(view.status_intact());

        LogWriter::new().write_all(b"WARN something happened\n").unwrap();
        assert!(!view.status_intact());

        view.set_indicator(Indicator::Processing, false);
        assert_eq!(view.status.get(), None);
    }
}
