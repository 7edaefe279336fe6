//! Remote snapshot synchronization boundary for Mapmark.
//!
//! The history store knows nothing about networks; this crate defines the
//! seam between the two:
//!
//! - [`SnapshotTransport`] — the async contract for moving snapshot lists
//!   to and from a remote copy of the same history.
//! - [`HttpTransport`] — a JSON-over-HTTP implementation of that contract.
//! - [`import_remote`] / [`pull`] / [`push`] — the reconcile policy applied
//!   *before* the store is touched. A fetch that completes after local
//!   edits never silently overwrites them unless the chosen
//!   [`ImportPolicy`] says so; the store's `load_from_snapshots` stays
//!   all-or-nothing.
//!
//! Retries, timeouts, and authentication are deliberately absent — they
//! belong to whoever owns the transport.

mod error;
mod http;
mod session;
mod transport;

pub use error::SyncError;
pub use http::HttpTransport;
pub use session::{ImportOutcome, ImportPolicy, import_remote, pull, push};
pub use transport::SnapshotTransport;

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
