//! # Theme Configuration
//!
//! Decides where theme preferences are stored and which mode applies before
//! anything has been persisted.
//!
//! ## Environment Variables
//!
//! - `STOREFRONT_THEME_FILE`: explicit path of the preference file
//! - `STOREFRONT_THEME_DEFAULT`: mode used when nothing is persisted (`light` or `dark`)
//!
//! Without `STOREFRONT_THEME_FILE` the file lives at
//! `$XDG_CONFIG_HOME/storefront/preferences.toml`.
//!
//! ```rust
//! use storefront_theme::config::ThemeConfig;
//! use storefront_theme::mode::ThemeMode;
//!
//! let config = ThemeConfig::new()
//!     .with_preference_file("/tmp/storefront-prefs.toml")
//!     .with_default_mode(ThemeMode::Dark);
//! assert_eq!(config.default_mode, ThemeMode::Dark);
//! ```

use std::env;
use std::path::PathBuf;

use xdg::BaseDirectories;

use crate::context::ThemeContext;
use crate::error::{ThemeError, ThemeResult};
use crate::mode::ThemeMode;
use crate::preference::{FilePreferenceStore, MemoryPreferenceStore, Preferences};

/// Environment variable holding an explicit preference file path.
pub const THEME_FILE_ENV: &str = "STOREFRONT_THEME_FILE";
/// Environment variable holding the fallback mode.
pub const THEME_DEFAULT_ENV: &str = "STOREFRONT_THEME_DEFAULT";

const XDG_PREFIX: &str = "storefront";
const PREFERENCE_FILE: &str = "preferences.toml";

/// Where theme preferences live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Explicit preference file. [None] selects the XDG location.
    pub preference_file: Option<PathBuf>,
    /// Mode used when nothing valid is persisted.
    pub default_mode: ThemeMode,
}

impl ThemeConfig {
    /// Configuration with the XDG preference file and a light default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `STOREFRONT_THEME_FILE` and `STOREFRONT_THEME_DEFAULT` on top of the defaults.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::new();

        if let Ok(path) = env::var(THEME_FILE_ENV) {
            if !path.trim().is_empty() {
                config.preference_file = Some(PathBuf::from(path));
            }
        }

        if let Ok(mode) = env::var(THEME_DEFAULT_ENV) {
            match mode.parse() {
                Ok(mode) => config.default_mode = mode,
                Err(e) => log::warn!("Ignoring {}: {}", THEME_DEFAULT_ENV, e),
            }
        }

        config
    }

    /// Use an explicit preference file.
    #[must_use]
    pub fn with_preference_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.preference_file = Some(path.into());
        self
    }

    /// Set the fallback mode.
    #[must_use]
    pub fn with_default_mode(mut self, mode: ThemeMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Path of the preference file.
    pub fn preference_path(&self) -> ThemeResult<PathBuf> {
        if let Some(path) = &self.preference_file {
            return Ok(path.clone());
        }
        let dirs = BaseDirectories::with_prefix(XDG_PREFIX).map_err(ThemeError::location)?;
        Ok(dirs.get_config_home().join(PREFERENCE_FILE))
    }

    /// Open the configured preferences.
    ///
    /// If no preference location can be determined, preferences are kept in
    /// memory for the session so that theming still works.
    pub fn open_preferences(&self) -> Preferences {
        let preferences = match self.preference_path() {
            Ok(path) => {
                log::debug!("Using preference file {:?}", path);
                Preferences::new(FilePreferenceStore::new(path))
            },
            Err(e) => {
                log::warn!("Keeping preferences in memory: {}", e);
                Preferences::new(MemoryPreferenceStore::new())
            },
        };
        preferences.with_default_mode(self.default_mode)
    }

    /// Open the preferences and build a [ThemeContext] from them.
    pub fn create_context(&self) -> ThemeContext {
        ThemeContext::new(self.open_preferences())
    }
}
