//! Error types for history store operations.

use thiserror::Error;

use mapmark_types::MarkerId;

/// Errors that can occur mutating or navigating the history store.
///
/// All of these are recoverable no-ops: the store's state is unchanged when
/// one is returned, and no snapshot is created.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A marker with this id is already live.
    ///
    /// Practically unreachable given id generation, but checked rather than
    /// left as undefined behavior.
    #[error("marker already exists: {0:?}")]
    DuplicateId(MarkerId),

    /// No live marker with this id.
    #[error("marker not found: {0:?}")]
    MarkerNotFound(MarkerId),

    /// Navigation index past the end of history.
    #[error("snapshot index {index} out of range (history has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
