//! Error types for emojipick.

use std::fmt;
use std::io;

/// Result type alias for emojipick operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for emojipick operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal or file operations.
    Io(io::Error),
    /// Dataset JSON could not be parsed.
    Dataset(serde_json::Error),
    /// A dataset record failed validation.
    InvalidRecord { index: usize, reason: String },
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
    /// Widget or buffer dimension error (e.g., zero width/height).
    InvalidDimensions { width: u32, height: u32 },
    /// Card or header sizes that do not fit the grid.
    InvalidMetrics {
        card_width: u32,
        card_height: u32,
        header_height: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Dataset(e) => write!(f, "malformed emoji dataset: {e}"),
            Self::InvalidRecord { index, reason } => {
                write!(f, "invalid emoji record #{index}: {reason}")
            }
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            Self::InvalidMetrics {
                card_width,
                card_height,
                header_height,
            } => write!(
                f,
                "layout metrics do not fit the grid: card {card_width}x{card_height}, header {header_height}"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Dataset(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Dataset(e)
    }
}
