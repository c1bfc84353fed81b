//! Error types for the fallible edges of the crate
//!
//! Store operations never fail. Only config loading, preset parsing and
//! reading source files from disk can return an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CropperError {
    /// A file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config or preset JSON was malformed
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A preset loaded from config has an unusable aspect ratio
    #[error("preset '{name}' has invalid aspect ratio {value}")]
    InvalidPreset { name: String, value: f64 },
}

pub type Result<T> = std::result::Result<T, CropperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = CropperError::Io {
            path: PathBuf::from("/tmp/missing.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/tmp/missing.json"));
    }

    #[test]
    fn test_invalid_preset_message() {
        let err = CropperError::InvalidPreset {
            name: "Broken".to_string(),
            value: -1.0,
        };
        assert_eq!(err.to_string(), "preset 'Broken' has invalid aspect ratio -1");
    }
}
