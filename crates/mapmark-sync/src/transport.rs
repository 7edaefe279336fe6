//! The transport contract for snapshot synchronization.

use async_trait::async_trait;

use mapmark_types::{Marker, MarkerId, Snapshot};

use crate::Result;

/// Moves snapshot lists to and from a remote copy of the history.
///
/// Implementations own all transport mechanics (endpoints, encoding,
/// retries); callers see only ordered snapshot sequences. The two notify
/// calls are fire-and-forget hints for servers that track individual
/// marker operations — a transport may implement them as no-ops.
#[async_trait]
pub trait SnapshotTransport {
    /// Fetch the remote history, oldest snapshot first.
    async fn fetch_snapshots(&self) -> Result<Vec<Snapshot>>;

    /// Replace the remote history with `snapshots`.
    async fn upload_snapshots(&self, snapshots: &[Snapshot]) -> Result<()>;

    /// Tell the remote a marker was added locally.
    async fn notify_marker_added(&self, marker: &Marker) -> Result<()>;

    /// Tell the remote a marker was deleted locally.
    async fn notify_marker_deleted(&self, id: &MarkerId) -> Result<()>;
}
