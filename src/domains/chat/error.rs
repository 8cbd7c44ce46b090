//! Chat-specific error types.

use thiserror::Error;

/// Errors that can occur while talking to the hosted model or relaying
/// its stream.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The model API answered with a non-success status.
    #[error("Model API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The HTTP request itself failed.
    #[error("Model request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The SSE stream broke or produced an undecodable event.
    #[error("Model stream error: {0}")]
    Stream(String),

    /// A chunk failed to parse as an OpenAI-compatible payload.
    #[error("Malformed model response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ChatError {
    pub fn stream(msg: impl Into<String>) -> Self {
        Self::Stream(msg.into())
    }
}
