//! Error types for analysis requests.

use thiserror::Error;

/// Errors from a single analysis request. None of them are retried.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Connection, DNS, TLS or body-read failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not JSON or lacked `choices[0].message.content`.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// User-facing message for a failed analysis.
pub fn failure_message(err: &AnalyzeError) -> String {
    format!("Analysis failed: {err}")
}
