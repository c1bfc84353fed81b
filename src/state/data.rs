//! Shared data structures for the application state
//!
//! These structs describe an uploaded image, the crops derived from it and
//! the coordinates of each crop. They carry no behaviour beyond construction
//! helpers; the store owns the lifecycle.

use bytes::Bytes;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use ulid::Ulid;

use super::preset::AspectRatioPreset;
use crate::error::{CropperError, Result};

/// MIME type used when neither the content nor the name identify the file
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Mint a fresh, sortable id for images and crops
pub(crate) fn new_id() -> String {
    Ulid::new().to_string()
}

/// Social network a crop is meant for
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Instagram, Platform::Facebook];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format of a crop within its platform
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Square,
    Portrait,
    Landscape,
    Stories,
    Custom,
}

impl CropType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Square => "square",
            CropType::Portrait => "portrait",
            CropType::Landscape => "landscape",
            CropType::Stories => "stories",
            CropType::Custom => "custom",
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectangle in source-image pixel space
///
/// Values are expected to be non-negative but are not checked here; the
/// cropping widget that produces them is responsible for keeping them sane.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct CropCoordinates {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl CropCoordinates {
    pub fn new(width: f64, height: f64, left: f64, top: f64) -> Self {
        Self {
            width,
            height,
            left,
            top,
        }
    }

    /// Width over height, or `None` for a zero-height rectangle
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0.0 {
            None
        } else {
            Some(self.width / self.height)
        }
    }
}

/// One cropped variant of a processed image
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageCrop {
    pub id: String,
    pub platform: Platform,
    #[serde(rename = "type")]
    pub crop_type: CropType,
    /// Target width / height ratio
    pub aspect_ratio: f64,
    pub coordinates: CropCoordinates,
    /// Rendered preview of the crop, if the UI produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl ImageCrop {
    /// Create a crop for a preset with a freshly minted id
    pub fn from_preset(preset: &AspectRatioPreset, coordinates: CropCoordinates) -> Self {
        Self {
            id: new_id(),
            platform: preset.platform,
            crop_type: preset.crop_type,
            aspect_ratio: preset.value,
            coordinates,
            preview: None,
        }
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The original file a processed image was created from
///
/// `bytes` is reference counted, so clones share the same buffer.
#[derive(Clone, PartialEq)]
pub struct SourceFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl SourceFile {
    /// Wrap raw bytes, sniffing the MIME type from content then file name
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        let mime_type = sniff_mime_type(&name, &bytes);
        Self {
            name,
            mime_type,
            bytes,
        }
    }

    /// Read a local file into memory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| CropperError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        tracing::debug!(path = %path.display(), size = data.len(), "Read source file");
        Ok(Self::new(name, data))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

fn sniff_mime_type(name: &str, bytes: &[u8]) -> String {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(name))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| DEFAULT_MIME_TYPE.to_string())
}

/// An uploaded image together with the crops derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    pub id: String,
    pub original_file: SourceFile,
    /// Preview resource handle; empty when the image holds none
    pub preview_url: String,
    pub crops: Vec<ImageCrop>,
}

impl ProcessedImage {
    pub fn new(
        id: impl Into<String>,
        original_file: SourceFile,
        preview_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            original_file,
            preview_url: preview_url.into(),
            crops: Vec::new(),
        }
    }

    pub fn with_crops(mut self, crops: Vec<ImageCrop>) -> Self {
        self.crops = crops;
        self
    }

    /// Whether this image holds a preview handle that must be released
    pub fn has_preview(&self) -> bool {
        !self.preview_url.is_empty()
    }
}
