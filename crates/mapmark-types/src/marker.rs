//! Map markers — annotated points in normalized coordinates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Color, MarkerId, ModelError, Position, PositionRecord, Result};

/// One annotated point on the map.
///
/// Markers are immutable by replacement: the `with_*` methods return a new
/// value with one field swapped, so a marker captured inside a historical
/// snapshot can never change underneath it. `id`, `create_time`, and
/// `created_by` are fixed for the marker's lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MarkerRecord", into = "MarkerRecord")]
pub struct Marker {
    id: MarkerId,
    position: Position,
    note: String,
    color: Color,
    create_time: DateTime<Utc>,
    created_by: String,
}

impl Marker {
    /// Create a marker with a fresh id, stamped `Utc::now()`, no attribution.
    pub fn new(position: Position, note: impl Into<String>, color: Color) -> Self {
        Self::with_details(position, note, color, Utc::now(), String::new())
    }

    /// Full constructor for callers that supply creation time and author.
    pub fn with_details(
        position: Position,
        note: impl Into<String>,
        color: Color,
        create_time: DateTime<Utc>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: MarkerId::generate(create_time),
            position,
            note: note.into(),
            color,
            create_time,
            created_by: created_by.into(),
        }
    }

    pub fn id(&self) -> &MarkerId {
        &self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn create_time(&self) -> DateTime<Utc> {
        self.create_time
    }

    /// Attribution string; empty means unknown/anonymous.
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    // ── Value replacement ───────────────────────────────────────────────

    /// A copy of this marker moved to `position`.
    pub fn with_position(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// A copy of this marker with a new note.
    pub fn with_note(self, note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            ..self
        }
    }

    /// A copy of this marker with a new display color.
    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    /// Stamp attribution if the marker has none; otherwise unchanged.
    ///
    /// One-time: an existing non-empty `created_by` is never overwritten.
    pub fn attributed(self, actor: impl Into<String>) -> Self {
        if self.created_by.is_empty() {
            Self {
                created_by: actor.into(),
                ..self
            }
        } else {
            self
        }
    }

    // ── Records ─────────────────────────────────────────────────────────

    /// Build from a wire record, validating position and timestamp.
    pub fn from_record(record: MarkerRecord) -> Result<Self> {
        if record.id.is_empty() {
            return Err(ModelError::MalformedRecord("marker id is empty".into()));
        }
        let position = Position::new(record.position.x, record.position.y).map_err(|_| {
            ModelError::MalformedRecord(format!(
                "marker {}: position ({}, {}) out of range",
                record.id, record.position.x, record.position.y
            ))
        })?;
        let create_time = DateTime::parse_from_rfc3339(&record.create_time)
            .map_err(|e| {
                ModelError::MalformedRecord(format!(
                    "marker {}: bad createTime {:?}: {e}",
                    record.id, record.create_time
                ))
            })?
            .with_timezone(&Utc);

        Ok(Self {
            id: MarkerId::from(record.id),
            position,
            note: record.note,
            color: Color::new(record.color),
            create_time,
            created_by: record.created_by,
        })
    }

    /// Convert to the wire record. Lossless with [`Marker::from_record`].
    pub fn to_record(&self) -> MarkerRecord {
        MarkerRecord {
            id: self.id.as_str().to_string(),
            position: self.position.into(),
            note: self.note.clone(),
            color: self.color.as_str().to_string(),
            create_time: self.create_time.to_rfc3339(),
            created_by: self.created_by.clone(),
        }
    }
}

impl TryFrom<MarkerRecord> for Marker {
    type Error = ModelError;

    fn try_from(record: MarkerRecord) -> Result<Self> {
        Self::from_record(record)
    }
}

impl From<Marker> for MarkerRecord {
    fn from(marker: Marker) -> Self {
        marker.to_record()
    }
}

/// Wire shape for [`Marker`].
///
/// Field names match the original JSON contract (`createTime` etc.); all
/// fields are required and missing ones fail deserialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerRecord {
    pub id: String,
    pub position: PositionRecord,
    pub note: String,
    pub color: String,
    /// ISO-8601 creation time.
    pub create_time: String,
    /// Attribution; may be empty.
    pub created_by: String,
}

// ============================================================================
// Tests
// ============================================================================
