//! Model requests for treeguess.
//!
//! A formatted directory structure is embedded in a fixed prompt and sent as
//! one chat-completion request:
//!
//! ```json
//! {
//!   "model": "<model>",
//!   "messages": [{ "role": "user", "content": [{ "type": "text", "text": "<prompt>" }] }],
//!   "stream": false
//! }
//! ```
//!
//! The answer is read from `choices[0].message.content`. Requests are
//! attempted once; failures surface as a formatted message rather than a
//! panic or retry.
//!
//! ```rust,no_run
//! use treeguess_analyze::{AnalysisClient, AnalyzeConfig, Analyzer, DEFAULT_MODEL};
//!
//! # async fn run() {
//! let client = AnalysisClient::new(AnalyzeConfig::default());
//! let guess = client.analyze("📁 proj/\n  - Cargo.toml (120 B)\n", DEFAULT_MODEL).await;
//! println!("{guess}");
//! # }
//! ```

mod client;
mod error;
mod prompt;
mod wire;

pub use client::{
    AnalysisClient, AnalyzeConfig, AnalyzeConfigBuilder, Analyzer, DEFAULT_ENDPOINT, DEFAULT_MODEL,
};
pub use error::{AnalyzeError, failure_message};
pub use prompt::{PromptLanguage, build_prompt};
pub use wire::{ChatMessage, ChatRequest, ChatResponse, ContentPart};
