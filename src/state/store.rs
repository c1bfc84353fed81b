use tracing::{debug, info};

use super::data::{ImageCrop, ProcessedImage};
use crate::preview::PreviewRevoker;

/// Handle returned by [`ImageStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// State change reported to listeners after it has happened
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// An image became current while the store was empty
    Set { id: String },
    /// The current image was superseded
    Replaced { previous: String, current: String },
    /// A crop was appended to the current image
    CropAdded { image: String, crop: String },
    /// The store was emptied
    Cleared { previous: String },
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// The ImageStore holds the one image the user is currently working on.
///
/// It owns that image's preview handle: whenever the image is replaced,
/// cleared or the store itself is dropped, the handle is released through
/// `R` exactly once. The replaced image is dropped, never handed back, so a
/// released handle cannot leak back into the UI.
pub struct ImageStore<R: PreviewRevoker> {
    current: Option<ProcessedImage>,
    revoker: R,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<R: PreviewRevoker> ImageStore<R> {
    /// Create an empty store that releases previews through `revoker`
    pub fn new(revoker: R) -> Self {
        Self {
            current: None,
            revoker,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The current image, if any
    pub fn current(&self) -> Option<&ProcessedImage> {
        self.current.as_ref()
    }

    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    /// Make `image` the current image and return it
    ///
    /// The previous image's preview is released first. If the new image
    /// carries the very same preview handle, the handle moves over instead
    /// of being released.
    pub fn set_current(&mut self, image: ProcessedImage) -> &ProcessedImage {
        let event = match self.current.take() {
            Some(previous) => {
                if previous.preview_url != image.preview_url {
                    self.release(&previous);
                }
                info!(previous = %previous.id, current = %image.id, "Replaced current image");
                StoreEvent::Replaced {
                    previous: previous.id,
                    current: image.id.clone(),
                }
            }
            None => {
                info!(id = %image.id, crops = image.crops.len(), "Set current image");
                StoreEvent::Set {
                    id: image.id.clone(),
                }
            }
        };

        let current = self.current.insert(image);
        notify(&mut self.listeners, &event);
        current
    }

    /// Drop the current image, releasing its preview
    ///
    /// Does nothing when the store is already empty.
    pub fn clear(&mut self) {
        let Some(previous) = self.current.take() else {
            debug!("Clear on empty store ignored");
            return;
        };

        self.release(&previous);
        info!(id = %previous.id, "Cleared current image");
        notify(&mut self.listeners, &StoreEvent::Cleared {
            previous: previous.id,
        });
    }

    /// Append a crop to the current image
    ///
    /// Returns `false` and leaves the store untouched when it is empty.
    pub fn add_crop(&mut self, crop: ImageCrop) -> bool {
        let Some(image) = self.current.as_mut() else {
            debug!(crop = %crop.id, "No current image to add crop to");
            return false;
        };

        let event = StoreEvent::CropAdded {
            image: image.id.clone(),
            crop: crop.id.clone(),
        };
        debug!(
            image = %image.id,
            crop = %crop.id,
            platform = %crop.platform,
            crop_type = %crop.crop_type,
            "Added crop"
        );
        image.crops.push(crop);

        notify(&mut self.listeners, &event);
        true
    }

    /// Register a listener called synchronously after every state change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn release(&self, image: &ProcessedImage) {
        if image.has_preview() {
            debug!(id = %image.id, url = %image.preview_url, "Releasing preview");
            self.revoker.revoke(&image.preview_url);
        }
    }
}

fn notify(listeners: &mut [(SubscriptionId, Listener)], event: &StoreEvent) {
    for (_, listener) in listeners.iter_mut() {
        listener(event);
    }
}

impl<R: PreviewRevoker> Drop for ImageStore<R> {
    fn drop(&mut self) {
        if let Some(image) = self.current.take() {
            self.release(&image);
        }
    }
}

// Implement Debug for better error messages
impl<R: PreviewRevoker> std::fmt::Debug for ImageStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageStore")
            .field("current", &self.current.as_ref().map(|image| &image.id))
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
