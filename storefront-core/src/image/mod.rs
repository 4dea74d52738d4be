//! # Optimized Images
//!
//! Images are requested from a server that can render variants on demand.
//! A variant is selected through query parameters on the image locator:
//!
//! - `q=<1..=100>`: encoding quality
//! - `blur=10`: blurred preview
//!
//! [optimize_locator] derives such a locator, [OptimizedImage] tracks the
//! fetch of one image per widget and tells the renderer what to draw, and the
//! [upload] helpers prepare user supplied images before they are sent.
//!
//! ```rust
//! use storefront_core::image::{optimize_locator, Quality, TransformOptions};
//!
//! let options = TransformOptions::new(Quality::new(50).unwrap()).with_blur(true);
//! let locator = optimize_locator("https://x/img.jpg", options).unwrap();
//! assert_eq!(locator, "https://x/img.jpg?q=50&blur=10");
//! ```

mod loader;
mod locator;

/// Contains validation and downscaling of uploaded images.
pub mod upload;

pub use loader::{FetchRequest, FetchTicket, ImageEvent, ImageLoadState, ImageView, ObjectFit, OptimizedImage, UNAVAILABLE_MESSAGE};
pub use locator::{optimize_locator, Quality, TransformOptions, BLUR_INTENSITY};
