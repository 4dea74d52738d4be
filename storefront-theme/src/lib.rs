#![warn(missing_docs)]

//! # Storefront Theming
//!
//! Theme modes, resolved themes and persisted UI preferences for storefront
//! front ends.
//!
//! ## Overview
//!
//! The crate is layered from leaf to composite:
//!
//! - **[Preferences](preference::Preferences)**: typed access to a local
//!   key-value [PreferenceStore](preference::PreferenceStore). Failures are
//!   logged and replaced by defaults.
//! - **[resolve](resolver::resolve)**: pure mapping from a
//!   [ThemeMode](mode::ThemeMode) to a [ResolvedTheme](theme::ResolvedTheme).
//! - **[ThemeContext](context::ThemeContext)**: the session-lifetime value
//!   threaded through the UI. It holds the current mode and resolved theme and
//!   exposes [toggle](context::ThemeContext::toggle) as its only mutator.
//! - **[ThemeConfig](config::ThemeConfig)**: where preferences live and which
//!   mode applies when nothing is persisted.
//!
//! ## Quick Start
//!
//! ```rust
//! use storefront_theme::context::ThemeContext;
//! use storefront_theme::mode::ThemeMode;
//! use storefront_theme::preference::{MemoryPreferenceStore, Preferences};
//!
//! let store = MemoryPreferenceStore::new();
//! let mut context = ThemeContext::new(Preferences::new(store.clone()));
//! assert_eq!(context.mode(), ThemeMode::Light);
//!
//! context.toggle();
//! assert_eq!(context.mode(), ThemeMode::Dark);
//! assert_eq!(store.snapshot("themeMode").as_deref(), Some("dark"));
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! export STOREFRONT_THEME_FILE=/tmp/prefs.toml   # Explicit preference file
//! export STOREFRONT_THEME_DEFAULT=dark           # Mode used when nothing is persisted
//! ```

/// Contains the [config::ThemeConfig] struct for locating preferences.
pub mod config;
/// Contains the [context::ThemeContext] holding the active theme.
pub mod context;
/// Contains the [error::ThemeError] type.
pub mod error;
/// Contains the [mode::ThemeMode] enum.
pub mod mode;
/// Contains persisted preference stores.
pub mod preference;
/// Contains the pure theme resolver.
pub mod resolver;
/// Hex string (de)serialization for colors.
pub mod serde_color;
/// Contains the [theme::ResolvedTheme] value and its parts.
pub mod theme;

pub use vello::peniko::Color;
