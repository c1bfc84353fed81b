//! Property-based tests for the image store
//!
//! Drives an `ImageStore` backed by a real `ObjectUrlRegistry` through
//! arbitrary operation sequences and checks the lifecycle invariants after
//! every step.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use social_cropper::{
    CropCoordinates, CropType, ImageCrop, ImageStore, ObjectUrlRegistry, Platform, PreviewRevoker,
    ProcessedImage, SourceFile,
};

// ============================================================================
// Strategy Generators
// ============================================================================

#[derive(Debug, Clone)]
enum StoreOp {
    /// Set a new image; `true` when it carries a preview URL
    Set(bool),
    Clear,
    AddCrop(u8),
}

fn store_ops_strategy(max_ops: usize) -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => any::<bool>().prop_map(StoreOp::Set),
            2 => Just(StoreOp::Clear),
            1 => any::<u8>().prop_map(StoreOp::AddCrop),
        ],
        0..max_ops,
    )
}

fn crop_strategy() -> impl Strategy<Value = ImageCrop> {
    (
        "[a-z0-9]{1,12}",
        prop_oneof![Just(Platform::Instagram), Just(Platform::Facebook)],
        prop_oneof![
            Just(CropType::Square),
            Just(CropType::Portrait),
            Just(CropType::Landscape),
            Just(CropType::Stories),
            Just(CropType::Custom),
        ],
        0.1f64..10.0,
        (0.0f64..4000.0, 0.0f64..4000.0, 1.0f64..4000.0, 1.0f64..4000.0),
        proptest::option::of("blob:[a-z0-9]{4}"),
    )
        .prop_map(|(id, platform, crop_type, aspect_ratio, (left, top, width, height), preview)| {
            ImageCrop {
                id,
                platform,
                crop_type,
                aspect_ratio,
                coordinates: CropCoordinates::new(width, height, left, top),
                preview,
            }
        })
}

type RevokeLog = Rc<RefCell<Vec<String>>>;

/// Store that forwards releases to `registry` and logs every revoke call
fn logged_store(registry: &ObjectUrlRegistry) -> (ImageStore<impl PreviewRevoker>, RevokeLog) {
    let log: RevokeLog = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let registry = registry.clone();
    let store = ImageStore::new(move |url: &str| {
        sink.borrow_mut().push(url.to_string());
        registry.revoke(url);
    });
    (store, log)
}

fn revokes_of(log: &RevokeLog, url: &str) -> usize {
    log.borrow().iter().filter(|revoked| revoked.as_str() == url).count()
}

fn sample_file(n: usize) -> SourceFile {
    SourceFile::new(format!("upload-{n}.png"), b"\x89PNG\r\n\x1a\n".to_vec())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Only the current image's preview is ever live, and no URL is released twice
    #[test]
    fn previews_released_exactly_once(ops in store_ops_strategy(40)) {
        let registry = ObjectUrlRegistry::new();
        let (mut store, log) = logged_store(&registry);
        let mut minted = Vec::new();

        for (n, op) in ops.into_iter().enumerate() {
            match op {
                StoreOp::Set(with_preview) => {
                    let file = sample_file(n);
                    let url = if with_preview {
                        let url = registry.create_object_url(&file);
                        minted.push(url.clone());
                        url
                    } else {
                        String::new()
                    };
                    store.set_current(ProcessedImage::new(n.to_string(), file, url));
                }
                StoreOp::Clear => store.clear(),
                StoreOp::AddCrop(seed) => {
                    let crop = ImageCrop {
                        id: format!("crop-{seed}"),
                        platform: Platform::Instagram,
                        crop_type: CropType::Square,
                        aspect_ratio: 1.0,
                        coordinates: CropCoordinates::default(),
                        preview: None,
                    };
                    prop_assert_eq!(store.add_crop(crop), store.has_current());
                }
            }

            let expected_live = match store.current() {
                Some(image) if image.has_preview() => {
                    prop_assert!(registry.is_live(&image.preview_url));
                    1
                }
                _ => 0,
            };
            prop_assert_eq!(registry.live_count(), expected_live);

            for url in &minted {
                prop_assert!(revokes_of(&log, url) <= 1);
            }
            prop_assert_eq!(registry.revoke_calls(), registry.released_count());
        }

        drop(store);
        prop_assert_eq!(registry.live_count(), 0);
        prop_assert_eq!(log.borrow().len(), minted.len());
        for url in &minted {
            prop_assert_eq!(revokes_of(&log, url), 1);
        }
    }

    /// Crops come back from the store in order and unchanged
    #[test]
    fn crops_survive_store_round_trip(crops in prop::collection::vec(crop_strategy(), 0..16)) {
        let registry = ObjectUrlRegistry::new();
        let mut store = ImageStore::new(registry.clone());
        let file = sample_file(0);
        let url = registry.create_object_url(&file);
        let image = ProcessedImage::new("img", file, url).with_crops(crops.clone());

        store.set_current(image.clone());

        let current = store.current().unwrap();
        prop_assert_eq!(current, &image);
        prop_assert_eq!(&current.crops, &crops);
    }

    /// Clearing any number of times after the first releases nothing more
    #[test]
    fn repeated_clear_is_idempotent(clears in 1usize..8) {
        let registry = ObjectUrlRegistry::new();
        let (mut store, log) = logged_store(&registry);
        let file = sample_file(0);
        let url = registry.create_object_url(&file);
        store.set_current(ProcessedImage::new("img", file, url.clone()));

        for _ in 0..clears {
            store.clear();
            prop_assert!(store.current().is_none());
        }
        prop_assert_eq!(&*log.borrow(), &vec![url]);
        prop_assert_eq!(registry.revoke_calls(), 1);
    }
}
