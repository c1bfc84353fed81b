//! Application root state
//!
//! `AppContext` is created once by the application and handed to UI code by
//! reference. It ties the preset catalog, the object-URL registry and the
//! image store together so uploads get a preview URL that the store later
//! releases through the same registry.

use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::preview::ObjectUrlRegistry;
use crate::state::data::{new_id, CropCoordinates, CropType, ImageCrop, Platform, ProcessedImage, SourceFile};
use crate::state::preset::PresetCatalog;
use crate::state::store::ImageStore;

#[derive(Debug)]
pub struct AppContext {
    config: AppConfig,
    presets: PresetCatalog,
    registry: ObjectUrlRegistry,
    store: ImageStore<ObjectUrlRegistry>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        let presets = config.preset_catalog()?;
        let registry = ObjectUrlRegistry::new();
        let store = ImageStore::new(registry.clone());

        info!(presets = presets.len(), "Application context ready");
        Ok(Self {
            config,
            presets,
            registry,
            store,
        })
    }

    /// Make `file` the current image with a fresh preview URL and no crops
    pub fn load_image(&mut self, file: SourceFile) -> &ProcessedImage {
        let preview_url = self.registry.create_object_url(&file);
        info!(file = %file.name, mime = %file.mime_type, size = file.size(), "Loaded image");

        self.store
            .set_current(ProcessedImage::new(new_id(), file, preview_url))
    }

    /// Crop the current image with the preset for `platform` and `crop_type`
    ///
    /// Returns `None` when there is no current image or no matching preset.
    pub fn add_crop_from_preset(
        &mut self,
        platform: Platform,
        crop_type: CropType,
        coordinates: CropCoordinates,
    ) -> Option<&ImageCrop> {
        let preset = self.presets.find(platform, crop_type)?;
        let crop = ImageCrop::from_preset(preset, coordinates);
        if !self.store.add_crop(crop) {
            return None;
        }
        self.store.current().and_then(|image| image.crops.last())
    }

    /// Drop the current image and release its preview
    pub fn reset(&mut self) {
        self.store.clear();
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    pub fn registry(&self) -> &ObjectUrlRegistry {
        &self.registry
    }

    pub fn store(&self) -> &ImageStore<ObjectUrlRegistry> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ImageStore<ObjectUrlRegistry> {
        &mut self.store
    }
}
