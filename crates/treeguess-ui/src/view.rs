//! Presentation seam for interactive sessions.

use treeguess_core::TreeNode;
use treeguess_scan::ReadProgress;

/// Busy indicators a view can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Shown while a dropped or selected directory is being read.
    Processing,
    /// Shown while the model request is in flight.
    Loading,
}

impl Indicator {
    /// Status text for this indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Processing => "Reading directory...",
            Self::Loading => "Analyzing structure...",
        }
    }
}

/// UI effects driven by a [`Session`](crate::Session).
///
/// Methods take `&self`; implementations that record state use interior
/// mutability.
pub trait View {
    /// Show or hide a busy indicator.
    fn set_indicator(&self, indicator: Indicator, visible: bool);

    /// Display a freshly built tree along with its plain text rendering.
    fn show_structure(&self, root: &TreeNode, structure: &str);

    /// Replace the result area with `text`.
    fn show_result(&self, text: &str);

    /// Report a problem that did not stop the session.
    fn show_error(&self, message: &str);

    /// Update the processing indicator with read progress.
    fn show_progress(&self, _progress: &ReadProgress) {}
}

/// Keeps an indicator visible for as long as the guard lives.
///
/// The indicator is hidden on drop, including when the guarded work
/// panics.
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct IndicatorGuard<'a, V: View + ?Sized> {
    view: &'a V,
    indicator: Indicator,
}

impl<'a, V: View + ?Sized> IndicatorGuard<'a, V> {
    /// Show `indicator` on `view`.
    pub fn show(view: &'a V, indicator: Indicator) -> Self {
        view.set_indicator(indicator, true);
        Self { view, indicator }
    }
}

impl<V: View + ?Sized> Drop for IndicatorGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_indicator(self.indicator, false);
    }
}
