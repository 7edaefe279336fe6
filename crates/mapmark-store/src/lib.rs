//! Append-only snapshot history store for Mapmark.
//!
//! The [`HistoryStore`] records every mutation to the marker set as an
//! immutable, fully-materialized [`Snapshot`](mapmark_types::Snapshot) and
//! keeps a view cursor over the sequence. Three rules shape everything:
//!
//! - **Every content mutation is a full-state append, never a diff.**
//!   Jumping to any point in history is an O(1) indexed read, with no
//!   replay logic anywhere.
//! - **Navigation is pure.** Scrubbing through history moves only the view
//!   cursor; the editable live marker set and the snapshot sequence are
//!   untouched, so the next edit always branches from live state.
//! - **Observers get owned copies.** Events carry cloned payloads; no
//!   subscriber can reach back into the store's internals.
//!
//! # Concurrency
//!
//! The store is single-owner state: all operations are synchronous and take
//! `&mut self`. Embedders in concurrent environments must serialize access
//! (a mutex or actor-style confinement) themselves.

mod error;
mod events;
mod store;

pub use error::StoreError;
pub use events::StoreEvent;
pub use store::HistoryStore;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
