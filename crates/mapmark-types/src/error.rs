//! Error types for the marker data model.

use thiserror::Error;

/// Errors that can occur constructing or deserializing model values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A coordinate fell outside the normalized `[0.0, 1.0]` range.
    #[error("position ({x}, {y}) outside normalized range [0.0, 1.0]")]
    InvalidPosition { x: f64, y: f64 },

    /// A record was missing required fields or carried invalid values.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}
