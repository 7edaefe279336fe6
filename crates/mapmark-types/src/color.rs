//! Marker display colors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A marker display color.
///
/// Stored as an opaque string (typically `#rrggbb` or `#rrggbbaa`) and
/// carried through serialization untouched. The engine never interprets it;
/// only the renderer does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Wrap an arbitrary display string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Format an opaque RGB color as `#rrggbb`.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}"))
    }

    /// Format an RGBA color as `#rrggbbaa`.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
    }

    /// The color as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    /// The default marker color (red).
    fn default() -> Self {
        Self::rgb(255, 0, 0)
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_formatting() {
        assert_eq!(Color::rgb(255, 59, 48).as_str(), "#ff3b30");
        assert_eq!(Color::rgba(0, 0, 0, 128).as_str(), "#00000080");
    }

    #[test]
    fn test_arbitrary_strings_pass_through() {
        // Carried untouched — even values the renderer may not understand.
        let c = Color::new("tomato");
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"tomato\"");
        let parsed: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }
}
