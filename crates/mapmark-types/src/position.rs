//! Normalized map coordinates.

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// A point on the map in normalized coordinates.
///
/// Both components are fractions of the map's width/height in `[0.0, 1.0]`,
/// so positions survive any change of rendered map resolution.
///
/// Construction validates: out-of-range or non-finite components are
/// rejected with [`ModelError::InvalidPosition`], never clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a validated position.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        if !in_range(x) || !in_range(y) {
            return Err(ModelError::InvalidPosition { x, y });
        }
        Ok(Self { x, y })
    }

    /// Horizontal fraction, `0.0` = left edge, `1.0` = right edge.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical fraction, `0.0` = top edge, `1.0` = bottom edge.
    pub fn y(&self) -> f64 {
        self.y
    }
}

fn in_range(v: f64) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

/// Unvalidated wire shape for [`Position`].
///
/// Records deserialize through this and validate in `from_record`, so a
/// parsed `Position` is always in range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub x: f64,
    pub y: f64,
}

impl From<Position> for PositionRecord {
    fn from(p: Position) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl TryFrom<PositionRecord> for Position {
    type Error = ModelError;

    fn try_from(r: PositionRecord) -> Result<Self> {
        Self::new(r.x, r.y)
    }
}
