#![warn(missing_docs)]

//! Core UI helpers for storefront front ends => See `storefront` crate.
//!
//! Contains the per-widget state machines that do not depend on the theme:
//! optimized image loading, sentinel based pagination, list windowing and
//! keyboard navigation over dynamic lists.

/// Contains the [ImageError](error::ImageError) type.
pub mod error;

/// Contains optimized image locators, the image loader state machine and upload helpers.
pub mod image;

/// Contains the visibility observer and the infinite scroll controller.
pub mod scroll;

/// Contains fixed-height list windowing.
pub mod virtual_list;

/// Contains keyboard navigation over focusable list items.
pub mod navigation;

/// Logical size of a widget in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in logical pixels.
    pub width: f32,
    /// Height in logical pixels.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
