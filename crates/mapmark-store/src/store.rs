//! The history store: live marker set + append-only snapshot sequence.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tokio::sync::broadcast;
use tracing::{debug, info};

use mapmark_types::{Marker, MarkerId, Snapshot};

use crate::{Result, StoreError, StoreEvent};

/// Versioned state engine for a named marker set.
///
/// Owns two things exclusively:
///
/// - `live_markers` — the editable working set, always equal to the content
///   of the latest snapshot immediately after any mutation;
/// - `snapshots` — the append-only history, every entry a full-content
///   capture.
///
/// A view cursor (`current_index`) selects which snapshot is displayed.
/// Mutations (`add_marker`, `delete_marker`) operate on the live set and
/// append, which also moves the cursor to the new latest entry — so editing
/// after scrubbing through history always branches from live state, never
/// from the viewed historical snapshot.
pub struct HistoryStore {
    /// Append-only, chronological. Index 0 = oldest.
    snapshots: Vec<Snapshot>,
    /// Which snapshot is being viewed. `None` until the first capture.
    current_index: Option<usize>,
    /// Editable working set, insertion-ordered.
    live_markers: IndexMap<MarkerId, Marker>,
    /// Event broadcaster.
    event_tx: broadcast::Sender<StoreEvent>,
}

impl HistoryStore {
    /// Create an empty store: no snapshots, no cursor, no markers.
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            snapshots: Vec::new(),
            current_index: None,
            live_markers: IndexMap::new(),
            event_tx,
        }
    }

    /// Subscribe to store events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    // =========================================================================
    // Marker operations
    // =========================================================================

    /// Add a marker to the live set and capture a snapshot.
    ///
    /// When `actor` is given and the marker carries no attribution, it is
    /// stamped as `created_by`. Fails with [`StoreError::DuplicateId`] if
    /// the id is already live; no snapshot is created on failure.
    ///
    /// Returns the newly appended snapshot.
    pub fn add_marker(&mut self, marker: Marker, actor: Option<&str>) -> Result<&Snapshot> {
        if self.live_markers.contains_key(marker.id()) {
            return Err(StoreError::DuplicateId(marker.id().clone()));
        }
        let marker = match actor {
            Some(actor) => marker.attributed(actor),
            None => marker,
        };
        let id = marker.id().clone();
        debug!(marker = %id, "add marker");

        self.live_markers.insert(id.clone(), marker);
        let index = self.capture(describe("added marker", &id, actor));
        self.emit_markers_changed(self.live_marker_vec());
        self.emit_snapshot_created(index);
        self.emit_cursor_moved(index);
        Ok(&self.snapshots[index])
    }

    /// Remove a live marker and capture a snapshot.
    ///
    /// Fails with [`StoreError::MarkerNotFound`] on an absent id — a benign
    /// no-op, no snapshot is created. Returns the removed marker.
    pub fn delete_marker(&mut self, id: &MarkerId, actor: Option<&str>) -> Result<Marker> {
        let removed = self
            .live_markers
            .shift_remove(id)
            .ok_or_else(|| StoreError::MarkerNotFound(id.clone()))?;
        debug!(marker = %id, "delete marker");

        let index = self.capture(describe("deleted marker", id, actor));
        self.emit_markers_changed(self.live_marker_vec());
        self.emit_snapshot_created(index);
        self.emit_cursor_moved(index);
        Ok(removed)
    }

    /// Live markers, in insertion order, as owned copies.
    pub fn current_markers(&self) -> Vec<Marker> {
        self.live_marker_vec()
    }

    /// Find a live marker by id.
    pub fn find_marker(&self, id: &MarkerId) -> Option<&Marker> {
        self.live_markers.get(id)
    }

    /// Number of live markers.
    pub fn marker_count(&self) -> usize {
        self.live_markers.len()
    }

    // =========================================================================
    // Snapshot operations
    // =========================================================================

    /// Manually capture the current live set as a checkpoint.
    ///
    /// Always succeeds and advances the cursor. Usually unnecessary:
    /// add/delete capture automatically.
    pub fn create_snapshot(&mut self, description: impl Into<String>) -> &Snapshot {
        let index = self.capture(description.into());
        self.emit_snapshot_created(index);
        self.emit_cursor_moved(index);
        &self.snapshots[index]
    }

    /// Move the view cursor to the snapshot at `index`.
    ///
    /// A pure view operation: neither the snapshot sequence nor the live
    /// marker set changes. The emitted `MarkersChanged` carries the viewed
    /// snapshot's markers for display; the live set stays as it was, and
    /// the next mutation branches from it.
    pub fn restore_snapshot(&mut self, index: usize) -> Result<&Snapshot> {
        let len = self.snapshots.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        debug!(index, "restore snapshot");
        self.current_index = Some(index);
        self.emit_markers_changed(self.snapshots[index].markers().to_vec());
        self.emit_cursor_moved(index);
        Ok(&self.snapshots[index])
    }

    /// Move the cursor back to the latest snapshot.
    ///
    /// A no-op (no events) when the history is empty or the cursor is
    /// already at the latest entry.
    pub fn restore_latest_snapshot(&mut self) {
        let Some(last) = self.snapshots.len().checked_sub(1) else {
            return;
        };
        if self.current_index == Some(last) {
            return;
        }
        // In range by construction.
        let _ = self.restore_snapshot(last);
    }

    /// Edit a snapshot's description in place.
    ///
    /// The one permitted mutation of an appended snapshot.
    pub fn describe_snapshot(&mut self, index: usize, description: impl Into<String>) -> Result<()> {
        let len = self.snapshots.len();
        let snapshot = self
            .snapshots
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        snapshot.set_description(description);
        Ok(())
    }

    /// The full history, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Number of snapshots in the history.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// The snapshot at `index`, if in range.
    pub fn snapshot_at(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Index of the snapshot currently being viewed. `None` while empty.
    pub fn current_snapshot_index(&self) -> Option<usize> {
        self.current_index
    }

    /// The snapshot currently being viewed.
    pub fn viewed_snapshot(&self) -> Option<&Snapshot> {
        self.current_index.and_then(|i| self.snapshots.get(i))
    }

    /// True when no snapshot has ever been captured.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    // =========================================================================
    // Import / export (sync adapter surface)
    // =========================================================================

    /// Wholesale replacement of the history from an external source.
    ///
    /// All-or-nothing: the sequence becomes `snapshots` (trusted to be in
    /// chronological order — not re-sorted), the live set becomes the last
    /// snapshot's content (or empty), and the cursor moves to the last
    /// index (or none). Any reconcile-or-overwrite decision belongs to the
    /// caller; see `mapmark-sync`.
    pub fn load_from_snapshots(&mut self, snapshots: Vec<Snapshot>) {
        info!(count = snapshots.len(), "load history from snapshots");
        self.snapshots = snapshots;
        self.live_markers = self
            .snapshots
            .last()
            .map(|s| {
                s.markers()
                    .iter()
                    .map(|m| (m.id().clone(), m.clone()))
                    .collect()
            })
            .unwrap_or_default();
        self.current_index = self.snapshots.len().checked_sub(1);

        self.emit_markers_changed(self.live_marker_vec());
        if let Some(index) = self.current_index {
            self.emit_cursor_moved(index);
        }
    }

    /// The full history as an independent deep copy, for transmission.
    ///
    /// Later local mutation cannot alias the exported data.
    pub fn export_snapshots(&self) -> Vec<Snapshot> {
        self.snapshots.clone()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Capture the live set as a new snapshot, advance the cursor, and
    /// return the new index.
    fn capture(&mut self, description: String) -> usize {
        let snapshot = Snapshot::new(self.next_timestamp(), self.live_marker_vec(), description);
        self.snapshots.push(snapshot);
        let index = self.snapshots.len() - 1;
        self.current_index = Some(index);
        index
    }

    /// Wall clock, clamped so snapshot timestamps never decrease across the
    /// sequence even if the system clock steps backwards.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.snapshots.last() {
            Some(last) if last.timestamp() > now => last.timestamp(),
            _ => now,
        }
    }

    fn live_marker_vec(&self) -> Vec<Marker> {
        self.live_markers.values().cloned().collect()
    }

    fn emit_markers_changed(&self, markers: Vec<Marker>) {
        let _ = self.event_tx.send(StoreEvent::MarkersChanged { markers });
    }

    fn emit_snapshot_created(&self, index: usize) {
        let _ = self.event_tx.send(StoreEvent::SnapshotCreated {
            snapshot: self.snapshots[index].clone(),
        });
    }

    fn emit_cursor_moved(&self, index: usize) {
        let _ = self.event_tx.send(StoreEvent::CurrentSnapshotChanged {
            index,
            snapshot: self.snapshots[index].clone(),
        });
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(action: &str, id: &MarkerId, actor: Option<&str>) -> String {
    match actor {
        Some(actor) if !actor.is_empty() => format!("{action} {id} by {actor}"),
        _ => format!("{action} {id}"),
    }
}

// ============================================================================
// Tests
// ============================================================================
