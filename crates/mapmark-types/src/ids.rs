//! Typed string identifiers for markers and snapshots.
//!
//! Both IDs are opaque strings on the wire and display as-is for logging.
//! Generation combines a millisecond timestamp with a random suffix, so an
//! id is never reused within a history even when two values are created in
//! the same millisecond — a deleted marker's id stays retired forever.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A marker identifier (`marker-<epoch-millis>-<6-digit-random>`).
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(String);

/// A snapshot identifier (`snap-<YYYYMMDD-HHMMSS-mmm>-<4-hex-random>`).
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(String);

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_string_id {
    ($T:ident, $name:literal) => {
        impl $T {
            /// The id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume into the underlying string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl From<String> for $T {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $T {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $T {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.0)
            }
        }
    };
}

impl_string_id!(MarkerId, "MarkerId");
impl_string_id!(SnapshotId, "SnapshotId");

impl MarkerId {
    /// Generate a fresh marker id for a value created at `at`.
    pub fn generate(at: DateTime<Utc>) -> Self {
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
        Self(format!("marker-{}-{:06}", at.timestamp_millis(), suffix))
    }
}

impl SnapshotId {
    /// Generate a fresh snapshot id for a snapshot taken at `at`.
    ///
    /// The timestamp alone has millisecond resolution; the random suffix
    /// keeps two snapshots taken in the same millisecond distinct.
    pub fn generate(at: DateTime<Utc>) -> Self {
        let suffix: u16 = rand::thread_rng().gen_range(0..=u16::MAX);
        Self(format!(
            "snap-{}-{:04x}",
            at.format("%Y%m%d-%H%M%S-%3f"),
            suffix
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
