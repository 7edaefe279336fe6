//! Error types for snapshot synchronization.

use thiserror::Error;

/// Errors that can occur talking to a remote snapshot server.
///
/// Any of these aborts the import or upload in question; local history is
/// never touched by a failed sync.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The HTTP request itself failed (connection, DNS, timeout upstream).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a valid snapshot payload.
    #[error("malformed snapshot payload: {0}")]
    MalformedPayload(String),
}
