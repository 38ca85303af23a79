//! Interactive sessions for treeguess.
//!
//! A [`Session`] owns the application state of an interactive run: the
//! selected model, the last structure sent for analysis and the last result.
//! It drives a [`View`] through each action:
//!
//! - **Drop** ([`Session::handle_drop`]) - read each dropped directory,
//!   display it, then analyze it automatically
//! - **Selection** ([`Session::handle_selection`]) - fold a flat picker
//!   selection into a tree and do the same
//!
//! Busy indicators are held by an [`IndicatorGuard`] and always hidden when
//! the guarded work ends.
//!
//! # Usage
//!
//! ```rust,no_run
//! use treeguess_analyze::AnalysisClient;
//! use treeguess_scan::FsEntry;
//! use treeguess_ui::{ConsoleView, Session, Settings};
//!
//! # async fn run() -> std::io::Result<()> {
//! let settings = Settings::load();
//! let client = AnalysisClient::new(settings.analyze_config());
//! let mut session = Session::new(ConsoleView::new(true), client, settings.model);
//!
//! let entry = FsEntry::open("/path/to/project").await?;
//! session.handle_drop([entry]).await;
//! # Ok(())
//! # }
//! ```

mod console;
mod session;
mod settings;
mod view;

pub use console::{ConsoleView, LogWriter};
pub use session::Session;
pub use settings::{ENDPOINT_ENV, MODEL_ENV, Settings};
pub use view::{Indicator, IndicatorGuard, View};
