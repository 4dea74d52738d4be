#![warn(missing_docs)]

//! Building blocks for storefront user interfaces.
//!
//! - [theme]: light and dark themes with a persisted mode
//! - [core]: optimized images, infinite scroll, list windowing and keyboard navigation
//! - [services]: backend API client and application settings (feature `services`)

pub use vello::peniko as color;

pub use storefront_core as core;
#[cfg(feature = "services")]
pub use storefront_services as services;
pub use storefront_theme as theme;

/// A "prelude" for users of the storefront crates.
///
/// Importing this module brings into scope the most common types
/// needed to theme a storefront and drive its list and image widgets.
///
/// ```rust
/// use storefront::prelude::*;
///
/// let mut context = ThemeContext::new(Preferences::new(MemoryPreferenceStore::new()));
/// assert_eq!(context.toggle(), ThemeMode::Dark);
/// ```
pub mod prelude {
    // Theme
    pub use crate::theme::config::ThemeConfig;
    pub use crate::theme::context::ThemeContext;
    pub use crate::theme::mode::ThemeMode;
    pub use crate::theme::preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences};
    pub use crate::theme::resolver::resolve;
    pub use crate::theme::theme::ResolvedTheme;

    // Images
    pub use crate::core::image::{ImageEvent, ImageLoadState, ImageView, OptimizedImage, Quality, TransformOptions};

    // Lists
    pub use crate::core::navigation::{FocusScope, KeyOutcome, KeyboardNavigator, NavKey};
    pub use crate::core::scroll::{InfiniteScroll, SentinelObserver, VisibilityObserver};
    pub use crate::core::virtual_list::VirtualList;
    pub use crate::core::Size;

    // Color
    pub use crate::color::Color;

    // Services
    #[cfg(feature = "services")]
    pub use crate::services::api::ApiClient;
    #[cfg(feature = "services")]
    pub use crate::services::config::StorefrontConfig;
    #[cfg(feature = "services")]
    pub use crate::services::session::Session;
}
