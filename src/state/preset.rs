//! Aspect-ratio presets for each social platform
//!
//! Presets are static configuration: the built-in catalog covers the common
//! Instagram and Facebook formats, and a JSON file can replace it.

use serde::{Deserialize, Serialize};

use super::data::{CropType, Platform};
use crate::error::{CropperError, Result};

/// A named target ratio for one platform format
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AspectRatioPreset {
    /// Label shown in the UI (e.g. "Square 1:1")
    pub name: String,
    /// Width / height
    pub value: f64,
    pub platform: Platform,
    #[serde(rename = "type")]
    pub crop_type: CropType,
}

impl AspectRatioPreset {
    pub fn new(name: impl Into<String>, value: f64, platform: Platform, crop_type: CropType) -> Self {
        Self {
            name: name.into(),
            value,
            platform,
            crop_type,
        }
    }
}

/// Ordered, immutable collection of presets
///
/// Serialized as a bare JSON array. Deserializing goes through
/// [`PresetCatalog::new`], so bad ratios are rejected either way.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(
    into = "Vec<AspectRatioPreset>",
    try_from = "Vec<AspectRatioPreset>"
)]
pub struct PresetCatalog {
    presets: Vec<AspectRatioPreset>,
}

impl TryFrom<Vec<AspectRatioPreset>> for PresetCatalog {
    type Error = CropperError;

    fn try_from(presets: Vec<AspectRatioPreset>) -> Result<Self> {
        Self::new(presets)
    }
}

impl From<PresetCatalog> for Vec<AspectRatioPreset> {
    fn from(catalog: PresetCatalog) -> Self {
        catalog.presets
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetCatalog {
    /// The presets shipped with the crate
    pub fn builtin() -> Self {
        use CropType::*;
        use Platform::*;

        Self {
            presets: vec![
                AspectRatioPreset::new("Square 1:1", 1.0, Instagram, Square),
                AspectRatioPreset::new("Portrait 4:5", 4.0 / 5.0, Instagram, Portrait),
                AspectRatioPreset::new("Landscape 1.91:1", 1.91, Instagram, Landscape),
                AspectRatioPreset::new("Stories 9:16", 9.0 / 16.0, Instagram, Stories),
                AspectRatioPreset::new("Square 1:1", 1.0, Facebook, Square),
                AspectRatioPreset::new("Portrait 4:5", 4.0 / 5.0, Facebook, Portrait),
                AspectRatioPreset::new("Landscape 16:9", 16.0 / 9.0, Facebook, Landscape),
                AspectRatioPreset::new("Stories 9:16", 9.0 / 16.0, Facebook, Stories),
            ],
        }
    }

    /// Build a catalog from caller-supplied presets
    ///
    /// Every ratio must be finite and positive.
    pub fn new(presets: Vec<AspectRatioPreset>) -> Result<Self> {
        if let Some(bad) = presets
            .iter()
            .find(|p| !p.value.is_finite() || p.value <= 0.0)
        {
            return Err(CropperError::InvalidPreset {
                name: bad.name.clone(),
                value: bad.value,
            });
        }
        Ok(Self { presets })
    }

    /// Parse a JSON array of presets
    pub fn from_json(json: &str) -> Result<Self> {
        let presets: Vec<AspectRatioPreset> = serde_json::from_str(json)?;
        Self::new(presets)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AspectRatioPreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Presets for one platform, in catalog order
    pub fn for_platform(&self, platform: Platform) -> impl Iterator<Item = &AspectRatioPreset> {
        self.presets.iter().filter(move |p| p.platform == platform)
    }

    /// First preset matching platform and type
    pub fn find(&self, platform: Platform, crop_type: CropType) -> Option<&AspectRatioPreset> {
        self.presets
            .iter()
            .find(|p| p.platform == platform && p.crop_type == crop_type)
    }
}
