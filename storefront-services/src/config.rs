//! # Application Settings
//!
//! Settings are read from a TOML file. Every key is optional:
//!
//! ```toml
//! api_url = "https://shop.example.com"
//!
//! [image]
//! quality = 60
//! max_dimension = 1600
//! max_upload_bytes = 4194304
//!
//! [scroll]
//! threshold = 150.0
//! item_height = 72.0
//! overscan = 4
//! ```
//!
//! ## Lookup
//!
//! 1. `STOREFRONT_CONFIG`: explicit settings file
//! 2. `$XDG_CONFIG_HOME/storefront/config.toml`
//!
//! `STOREFRONT_API_URL` overrides `api_url` afterwards. A missing file means
//! defaults; an unreadable one is reported with a warning and ignored.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use storefront_core::error::ImageResult;
use storefront_core::image::upload::{self, MAX_DIMENSION, MAX_UPLOAD_BYTES};
use storefront_core::image::{Quality, TransformOptions};
use storefront_core::scroll::{InfiniteScroll, LoadMore, VisibilityObserver, DEFAULT_THRESHOLD};
use storefront_core::virtual_list::{VirtualList, DEFAULT_ITEM_HEIGHT, DEFAULT_OVERSCAN};
use xdg::BaseDirectories;

use crate::error::{ServiceError, ServiceResult};

/// Environment variable holding an explicit settings file path.
pub const CONFIG_FILE_ENV: &str = "STOREFRONT_CONFIG";
/// Environment variable overriding the backend URL.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";
/// Backend URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Image settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Quality requested for image variants.
    pub quality: u32,
    /// Edge length of the box uploads are downscaled into.
    pub max_dimension: u32,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            quality: u32::from(Quality::DEFAULT.get()),
            max_dimension: MAX_DIMENSION,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl ImageSettings {
    /// Variant options for the configured quality.
    ///
    /// An out of range quality is reported and replaced by the default.
    pub fn transform_options(&self) -> TransformOptions {
        let quality = Quality::new(self.quality).unwrap_or_else(|e| {
            log::warn!("Ignoring image quality setting: {}", e);
            Quality::default()
        });
        TransformOptions::new(quality)
    }

    /// Edge length uploads are downscaled into.
    ///
    /// Zero is reported and replaced by the default.
    pub fn upload_dimension(&self) -> u32 {
        if self.max_dimension == 0 {
            log::warn!("Ignoring image max_dimension setting: must be at least 1");
            return MAX_DIMENSION;
        }
        self.max_dimension
    }

    /// Largest accepted upload in bytes.
    ///
    /// Zero is reported and replaced by the default.
    pub fn upload_limit(&self) -> u64 {
        if self.max_upload_bytes == 0 {
            log::warn!("Ignoring image max_upload_bytes setting: must be at least 1");
            return MAX_UPLOAD_BYTES;
        }
        self.max_upload_bytes
    }

    /// Check an upload against the configured size limit.
    pub fn validate_upload(&self, bytes: &[u8]) -> ImageResult<()> {
        upload::validate_upload_bytes_with_limit(bytes, self.upload_limit())
    }

    /// Validate, downscale and re-encode an upload with the configured limits.
    pub fn optimize_upload(&self, bytes: &[u8]) -> ImageResult<Vec<u8>> {
        upload::optimize_upload_with_limit(bytes, self.upload_dimension(), self.upload_limit())
    }
}

/// List scrolling settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Height of the pagination sentinel.
    pub threshold: f32,
    /// Row height of virtualized lists.
    pub item_height: f32,
    /// Rows built beyond each edge of the viewport.
    pub overscan: usize,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            item_height: DEFAULT_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl ScrollSettings {
    /// A virtual list of `item_count` rows using these settings.
    pub fn virtual_list(&self, item_count: usize) -> VirtualList {
        VirtualList::new(item_count)
            .with_item_height(self.item_height)
            .with_overscan(self.overscan)
    }

    /// An infinite scroll controller using the configured sentinel height.
    ///
    /// A negative or non-finite threshold is reported and replaced by the default.
    pub fn infinite_scroll<O: VisibilityObserver>(&self, observer: O, load_more: LoadMore) -> InfiniteScroll<O> {
        let threshold = if self.threshold.is_finite() && self.threshold >= 0.0 {
            self.threshold
        } else {
            log::warn!("Ignoring scroll threshold setting {}", self.threshold);
            DEFAULT_THRESHOLD
        };
        InfiniteScroll::new(observer, load_more).with_threshold(threshold)
    }
}

/// Storefront application settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Base URL of the backend.
    pub api_url: String,
    /// Image settings.
    pub image: ImageSettings,
    /// Scroll settings.
    pub scroll: ScrollSettings,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            image: ImageSettings::default(),
            scroll: ScrollSettings::default(),
        }
    }
}

impl StorefrontConfig {
    /// Parse settings from TOML.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read settings from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| ServiceError::config(path, e))
    }

    /// Load settings from the standard locations and apply environment overrides.
    ///
    /// Never fails: problems are logged and the defaults are used instead.
    pub fn load() -> Self {
        let mut config = match Self::settings_path() {
            Some(path) if path.exists() => {
                log::info!("Loading settings from {:?}", path);
                Self::from_file(&path).unwrap_or_else(|e| {
                    log::warn!("Using default settings: {}", e);
                    Self::default()
                })
            },
            Some(path) => {
                log::debug!("No settings file at {:?}, using defaults", path);
                Self::default()
            },
            None => Self::default(),
        };
        config.apply_env();
        config
    }

    /// Apply `STOREFRONT_API_URL` if set.
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
    }

    fn settings_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_FILE_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        match BaseDirectories::with_prefix("storefront") {
            Ok(dirs) => Some(dirs.get_config_home().join("config.toml")),
            Err(e) => {
                log::warn!("Cannot locate settings directory: {}", e);
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use image::GenericImageView;
    use storefront_core::error::ImageError;
    use storefront_core::scroll::{Sentinel, SentinelObserver};

    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.image.quality, 75);
        assert_eq!(config.image.max_dimension, 1200);
        assert_eq!(config.image.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.scroll.threshold, 100.0);
        assert_eq!(config.scroll.item_height, 50.0);
        assert_eq!(config.scroll.overscan, 2);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = StorefrontConfig::from_toml(
            r#"
            api_url = "https://shop.example.com"

            [image]
            quality = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url, "https://shop.example.com");
        assert_eq!(config.image.quality, 60);
        assert_eq!(config.image.max_dimension, 1200);
        assert_eq!(config.scroll, ScrollSettings::default());
    }

    #[test]
    fn test_out_of_range_quality_falls_back() {
        let settings = ImageSettings {
            quality: 0,
            ..ImageSettings::default()
        };
        assert_eq!(settings.transform_options().quality, Quality::default());
    }

    #[test]
    fn test_virtual_list_from_settings() {
        let scroll = ScrollSettings {
            item_height: 100.0,
            overscan: 0,
            ..ScrollSettings::default()
        };
        assert_eq!(scroll.virtual_list(50).visible_range(0.0, 300.0), 0..3);
    }

    #[test]
    fn test_upload_limits_from_settings() {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image::RgbImage::new(64, 16))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let settings = StorefrontConfig::from_toml("[image]\nmax_dimension = 32\nmax_upload_bytes = 16\n")
            .unwrap()
            .image;
        assert!(matches!(settings.validate_upload(&bytes), Err(ImageError::TooLarge { max: 16, .. })));

        let settings = ImageSettings {
            max_dimension: 32,
            ..ImageSettings::default()
        };
        let out = settings.optimize_upload(&bytes).unwrap();
        assert_eq!(image::load_from_memory(&out).unwrap().dimensions(), (32, 8));
    }

    #[test]
    fn test_zero_upload_limits_fall_back() {
        let settings = StorefrontConfig::from_toml("[image]\nmax_dimension = 0\nmax_upload_bytes = 0\n")
            .unwrap()
            .image;
        assert_eq!(settings.upload_dimension(), MAX_DIMENSION);
        assert_eq!(settings.upload_limit(), MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_infinite_scroll_from_settings() {
        let scroll = ScrollSettings {
            threshold: 150.0,
            ..ScrollSettings::default()
        };
        let controller = scroll.infinite_scroll(SentinelObserver::new(), Rc::new(|| {}));
        assert_eq!(controller.threshold(), 150.0);
        assert_eq!(controller.observer().sentinel(), Some(Sentinel::new(150.0)));

        let broken = ScrollSettings {
            threshold: f32::NAN,
            ..ScrollSettings::default()
        };
        let controller = broken.infinite_scroll(SentinelObserver::new(), Rc::new(|| {}));
        assert_eq!(controller.threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[image]\nquality = \"high\"").unwrap();
        assert!(matches!(StorefrontConfig::from_file(&path), Err(ServiceError::Config { .. })));
    }
}
