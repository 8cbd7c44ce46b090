//! Error types for server startup and lifecycle.
//!
//! Domain errors are handled where they arise: the routes map `TodoError`
//! and `ChatError` to HTTP responses, and tool failures travel inside the
//! result envelope. What remains is the startup/shutdown path, which this
//! unified type covers.

use thiserror::Error;

/// A specialized Result type for server lifecycle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort server startup or shutdown.
#[derive(Debug, Error)]
pub enum Error {
    /// The database could not be opened or initialized.
    #[error("Storage error: {0}")]
    Storage(#[from] crate::domains::todos::StoreError),

    /// I/O errors from binding or serving the listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
