//! Events broadcast when the history store changes.

use mapmark_types::{Marker, Snapshot};

/// Notifications emitted by [`HistoryStore`](crate::HistoryStore).
///
/// Payloads are owned clones, so observers can hold them as long as they
/// like without aliasing the store.
#[derive(Clone, Debug)]
pub enum StoreEvent {
    /// What should currently be displayed changed (add, delete, restore).
    ///
    /// On add/delete this is the live marker set; on restore it is the
    /// viewed snapshot's marker set — the live set is untouched by
    /// navigation.
    MarkersChanged { markers: Vec<Marker> },

    /// A new snapshot was appended (add, delete, or manual checkpoint).
    ///
    /// Never fired on pure navigation.
    SnapshotCreated { snapshot: Snapshot },

    /// The view cursor moved, by navigation or because an append advanced
    /// it to the new latest snapshot.
    CurrentSnapshotChanged { index: usize, snapshot: Snapshot },
}
