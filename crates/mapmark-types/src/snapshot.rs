//! Full-content history snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Marker, MarkerId, MarkerRecord, ModelError, Result, SnapshotId};

/// An immutable capture of the entire marker set at one instant.
///
/// Like a commit that stores complete content: `markers` is the full set,
/// not a diff against the previous snapshot, so restoring any point in
/// history is a direct read with no replay. Once constructed, only the
/// description may change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRecord", into = "SnapshotRecord")]
pub struct Snapshot {
    snapshot_id: SnapshotId,
    timestamp: DateTime<Utc>,
    markers: Vec<Marker>,
    description: String,
}

impl Snapshot {
    /// Capture `markers` as a new snapshot taken at `timestamp`.
    pub fn new(
        timestamp: DateTime<Utc>,
        markers: Vec<Marker>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            snapshot_id: SnapshotId::generate(timestamp),
            timestamp,
            markers,
            description: description.into(),
        }
    }

    pub fn id(&self) -> &SnapshotId {
        &self.snapshot_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The complete marker set at this instant.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Edit the description in place.
    ///
    /// The one permitted mutation: it affects neither ordering nor identity.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Find a marker captured in this snapshot.
    pub fn find_marker(&self, id: &MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id() == id)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    // ── Records ─────────────────────────────────────────────────────────

    /// Build from a wire record, validating every contained marker.
    ///
    /// Any malformed marker fails the whole snapshot.
    pub fn from_record(record: SnapshotRecord) -> Result<Self> {
        if record.snapshot_id.is_empty() {
            return Err(ModelError::MalformedRecord("snapshot id is empty".into()));
        }
        let timestamp = DateTime::parse_from_rfc3339(&record.timestamp)
            .map_err(|e| {
                ModelError::MalformedRecord(format!(
                    "snapshot {}: bad timestamp {:?}: {e}",
                    record.snapshot_id, record.timestamp
                ))
            })?
            .with_timezone(&Utc);
        let markers = record
            .markers
            .into_iter()
            .map(Marker::from_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            snapshot_id: SnapshotId::from(record.snapshot_id),
            timestamp,
            markers,
            description: record.description,
        })
    }

    /// Convert to the wire record. Lossless with [`Snapshot::from_record`].
    pub fn to_record(&self) -> SnapshotRecord {
        SnapshotRecord {
            snapshot_id: self.snapshot_id.as_str().to_string(),
            timestamp: self.timestamp.to_rfc3339(),
            description: self.description.clone(),
            markers: self.markers.iter().map(Marker::to_record).collect(),
        }
    }
}

impl TryFrom<SnapshotRecord> for Snapshot {
    type Error = ModelError;

    fn try_from(record: SnapshotRecord) -> Result<Self> {
        Self::from_record(record)
    }
}

impl From<Snapshot> for SnapshotRecord {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.to_record()
    }
}

/// Wire shape for [`Snapshot`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub snapshot_id: String,
    /// ISO-8601 capture time.
    pub timestamp: String,
    /// May be empty.
    pub description: String,
    /// Marker records in capture order.
    pub markers: Vec<MarkerRecord>,
}

// ============================================================================
// Tests
// ============================================================================
