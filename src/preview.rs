//! Preview resource handles
//!
//! A preview handle is an opaque URL-style string that lets the UI display a
//! source file without copying its bytes. Whoever minted the handle must be
//! told when it is no longer needed, so the backing buffer can be freed.
//! `PreviewRevoker` is that release capability; `ObjectUrlRegistry` is the
//! in-process implementation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};
use ulid::Ulid;

use crate::state::data::SourceFile;

/// Scheme prefix of every URL minted by the registry
pub const OBJECT_URL_SCHEME: &str = "blob:";

/// Something that can release a preview handle
///
/// Releasing must be idempotent: revoking an unknown or already revoked
/// handle is a no-op. Release never reports failure.
pub trait PreviewRevoker {
    fn revoke(&self, url: &str);
}

impl<F> PreviewRevoker for F
where
    F: Fn(&str),
{
    fn revoke(&self, url: &str) {
        self(url)
    }
}

#[derive(Debug, Default)]
struct Registry {
    live: HashMap<String, SourceFile>,
    /// Every revoke call, including redundant ones
    revoke_calls: usize,
    /// Revoke calls that actually freed a live URL
    released: usize,
}

/// Maps object URLs to the blobs backing them
///
/// Cloning yields another handle to the same registry, so the store and the
/// UI can share it. Single-threaded only.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new URL that resolves to `file` until revoked
    pub fn create_object_url(&self, file: &SourceFile) -> String {
        let url = format!("{}{}", OBJECT_URL_SCHEME, Ulid::new().to_string().to_lowercase());
        self.inner
            .borrow_mut()
            .live
            .insert(url.clone(), file.clone());

        debug!(url = %url, file = %file.name, size = file.size(), "Created object URL");
        url
    }

    /// Release `url`; unknown or already revoked URLs are ignored
    pub fn revoke_object_url(&self, url: &str) {
        let mut registry = self.inner.borrow_mut();
        registry.revoke_calls += 1;
        if registry.live.remove(url).is_some() {
            registry.released += 1;
            debug!(url = %url, "Revoked object URL");
        } else {
            trace!(url = %url, "Ignoring revoke of unknown object URL");
        }
    }

    /// Blob behind a live URL
    pub fn resolve(&self, url: &str) -> Option<SourceFile> {
        self.inner.borrow().live.get(url).cloned()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.inner.borrow().live.contains_key(url)
    }

    /// Number of URLs minted and not yet revoked
    pub fn live_count(&self) -> usize {
        self.inner.borrow().live.len()
    }

    /// Number of URLs freed so far
    pub fn released_count(&self) -> usize {
        self.inner.borrow().released
    }

    /// Number of revoke calls so far, counting redundant ones
    ///
    /// Equal to `released_count()` when every owner releases exactly once.
    pub fn revoke_calls(&self) -> usize {
        self.inner.borrow().revoke_calls
    }
}

impl PreviewRevoker for ObjectUrlRegistry {
    fn revoke(&self, url: &str) {
        self.revoke_object_url(url);
    }
}
