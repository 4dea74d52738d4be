//! # Preference Storage
//!
//! Persisted UI preferences live in a flat string key-value store. The store
//! is process-wide and written by one writer at a time; the last write wins.
//!
//! - **[PreferenceStore]**: the storage seam
//! - **[FilePreferenceStore]**: TOML file on disk, written synchronously
//! - **[MemoryPreferenceStore]**: in-process store, can be switched off to
//!   simulate disabled storage
//! - **[Preferences]**: typed access that never fails the caller
//!
//! ## File Format
//!
//! ```toml
//! themeMode = "dark"
//! token = "eyJhbGciOi..."
//! user = '{"id":"u1","name":"ana",...}'
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use crate::error::{ThemeError, ThemeResult};
use crate::mode::ThemeMode;

/// Key under which the theme mode is persisted.
pub const THEME_MODE_KEY: &str = "themeMode";
/// Key under which the backend session token is persisted.
pub const AUTH_TOKEN_KEY: &str = "token";
/// Key under which the signed-in user is persisted as JSON.
pub const USER_KEY: &str = "user";

/// A local key-value store for string preferences.
pub trait PreferenceStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> ThemeResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> ThemeResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> ThemeResult<()>;
}

/// Preferences persisted in a TOML file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Create a store backed by the file at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ThemeResult<IndexMap<String, String>> {
        if !self.path.exists() {
            return Ok(IndexMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| ThemeError::parse_error(&self.path, e.to_string()))
    }

    fn store(&self, entries: &IndexMap<String, String>) -> ThemeResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string(entries).map_err(|e| ThemeError::Serialization(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn load_for_update(&self) -> ThemeResult<IndexMap<String, String>> {
        match self.load() {
            Err(ThemeError::ParseError { path, details }) => {
                log::warn!("Discarding unreadable preference file {:?}: {}", path, details);
                Ok(IndexMap::new())
            },
            other => other,
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> ThemeResult<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
        let mut entries = self.load_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn remove(&self, key: &str) -> ThemeResult<()> {
        let mut entries = self.load_for_update()?;
        if entries.shift_remove(key).is_some() {
            self.store(&entries)?;
        }
        Ok(())
    }
}

/// In-process preference store.
///
/// Clones share the same entries, so a test can keep a handle and inspect
/// what a [ThemeContext](crate::context::ThemeContext) persisted.
#[derive(Debug, Clone)]
pub struct MemoryPreferenceStore {
    entries: Arc<RwLock<IndexMap<String, String>>>,
    available: Arc<AtomicBool>,
}

impl MemoryPreferenceStore {
    /// Create an empty, available store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(IndexMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Enable or disable the store. A disabled store fails every operation.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Read a value regardless of availability.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn check_available(&self) -> ThemeResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ThemeError::unavailable("storage disabled"))
        }
    }
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> ThemeResult<Option<String>> {
        self.check_available()?;
        let entries = self
            .entries
            .read()
            .map_err(|_| ThemeError::unavailable("lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
        self.check_available()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ThemeError::unavailable("lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ThemeResult<()> {
        self.check_available()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ThemeError::unavailable("lock poisoned"))?;
        entries.shift_remove(key);
        Ok(())
    }
}

/// Typed access to persisted preferences.
///
/// Every operation swallows storage failures: reads fall back to defaults and
/// writes are dropped, with a warning logged in both cases.
pub struct Preferences {
    store: Box<dyn PreferenceStore>,
    default_mode: ThemeMode,
}

impl Preferences {
    /// Wrap a store. The default mode is [ThemeMode::Light].
    pub fn new(store: impl PreferenceStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            default_mode: ThemeMode::default(),
        }
    }

    /// Use `mode` when no valid mode is persisted.
    #[must_use]
    pub fn with_default_mode(mut self, mode: ThemeMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Mode used when no valid mode is persisted.
    pub fn default_mode(&self) -> ThemeMode {
        self.default_mode
    }

    /// Persisted theme mode, or the default if absent or unreadable.
    pub fn theme_mode(&self) -> ThemeMode {
        match self.store.get(THEME_MODE_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                log::warn!("Ignoring persisted theme mode: {}", e);
                self.default_mode
            }),
            Ok(None) => self.default_mode,
            Err(e) => {
                log::warn!("Failed to read theme mode, using {}: {}", self.default_mode, e);
                self.default_mode
            },
        }
    }

    /// Persist the theme mode.
    pub fn set_theme_mode(&self, mode: ThemeMode) {
        if let Err(e) = self.store.set(THEME_MODE_KEY, mode.as_str()) {
            log::warn!("Failed to persist theme mode {}: {}", mode, e);
        }
    }

    /// Persisted backend session token.
    pub fn auth_token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY).unwrap_or_else(|e| {
            log::warn!("Failed to read session token: {}", e);
            None
        })
    }

    /// Persist the backend session token.
    pub fn set_auth_token(&self, token: &str) {
        if let Err(e) = self.store.set(AUTH_TOKEN_KEY, token) {
            log::warn!("Failed to persist session token: {}", e);
        }
    }

    /// Forget the backend session token.
    pub fn clear_auth_token(&self) {
        if let Err(e) = self.store.remove(AUTH_TOKEN_KEY) {
            log::warn!("Failed to clear session token: {}", e);
        }
    }

    /// Raw value stored under `key`.
    pub fn value(&self, key: &str) -> Option<String> {
        self.store.get(key).unwrap_or_else(|e| {
            log::warn!("Failed to read preference {:?}: {}", key, e);
            None
        })
    }

    /// Store a raw value under `key`.
    pub fn set_value(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            log::warn!("Failed to persist preference {:?}: {}", key, e);
        }
    }

    /// Remove the value stored under `key`.
    pub fn remove_value(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            log::warn!("Failed to clear preference {:?}: {}", key, e);
        }
    }
}
