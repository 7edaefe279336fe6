//! Marker and snapshot data model for Mapmark.
//!
//! Everything here is a plain immutable value. The versioned history engine
//! in `mapmark-store` works because these types hold that line:
//!
//! - **Marker**: one annotated point in normalized map coordinates. Edits
//!   replace the value (`with_*` methods) instead of mutating in place, so a
//!   marker captured inside a snapshot can never change underneath it.
//! - **Snapshot**: a full-content capture of the entire marker set at one
//!   instant — like a commit that stores complete content rather than a
//!   diff. Restoring any snapshot is a direct indexed read, never a replay.
//! - **Records**: the wire shapes (`MarkerRecord`, `SnapshotRecord`) used
//!   for sync import/export. Deserialization validates; a corrupt record is
//!   a reported [`ModelError::MalformedRecord`], never a panic.
//!
//! # Coordinates
//!
//! Positions are fractions of map width/height in `[0.0, 1.0]`, independent
//! of the rendered image resolution. Out-of-range input is rejected at
//! construction — see [`Position::new`].

mod color;
mod error;
mod ids;
mod marker;
mod position;
mod snapshot;

pub use color::Color;
pub use error::ModelError;
pub use ids::{MarkerId, SnapshotId};
pub use marker::{Marker, MarkerRecord};
pub use position::{Position, PositionRecord};
pub use snapshot::{Snapshot, SnapshotRecord};

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
