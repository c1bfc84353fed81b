//! Image state for social-media cropping UIs
//!
//! The crate keeps one uploaded image current at a time, together with the
//! crops derived from it for each platform preset, and makes sure the preview
//! handle of every image is released exactly once.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod preview;
pub mod state;

pub use config::AppConfig;
pub use context::AppContext;
pub use error::{CropperError, Result};
pub use preview::{ObjectUrlRegistry, PreviewRevoker};
pub use state::data::{CropCoordinates, CropType, ImageCrop, Platform, ProcessedImage, SourceFile};
pub use state::preset::{AspectRatioPreset, PresetCatalog};
pub use state::store::{ImageStore, StoreEvent, SubscriptionId};
