//! State management module
//!
//! This module holds everything the cropping UI reads and mutates:
//! - The image store and its lifecycle rules (store.rs)
//! - Shared data structures for images and crops (data.rs)
//! - Aspect-ratio presets per platform (preset.rs)

pub mod data;
pub mod preset;
pub mod store;
