//! # Resolved Themes
//!
//! A [ResolvedTheme] is the fully merged style configuration that visual
//! components read from. It is produced by [resolve](crate::resolver::resolve)
//! from a [ThemeOptions] base and a set of mode-specific
//! [PaletteOverrides](palette::PaletteOverrides), and is never mutated after
//! construction: a mode change builds a new value.
//!
//! ## Structure
//!
//! - **[Palette](palette::Palette)**: primary/secondary colors with variants,
//!   backgrounds, text colors
//! - **[Typography](typography::Typography)**: font family per text role
//! - **[Shape]**: corner radius
//! - **[ComponentOverrides](components::ComponentOverrides)**: per-component
//!   style rules
//!
//! Only the palette differs between modes. Typography, shape and component
//! overrides come from the shared base.

use serde::{Deserialize, Serialize};

use crate::mode::ThemeMode;

/// Component-level style overrides.
pub mod components;
/// Palette types and merge rules.
pub mod palette;
/// Typography types.
pub mod typography;

use components::ComponentOverrides;
use palette::{Palette, PaletteOptions, PaletteOverrides};
use typography::Typography;

/// Corner rounding shared by all surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Border radius in logical pixels.
    pub border_radius: f32,
}

/// Mode-invariant theme configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeOptions {
    /// Brand and accent colors.
    pub palette: PaletteOptions,
    /// Typography.
    pub typography: Typography,
    /// Shape.
    pub shape: Shape,
    /// Component overrides.
    pub components: ComponentOverrides,
}

impl ThemeOptions {
    /// Merge mode-specific palette overrides into a [ResolvedTheme].
    pub fn resolve(&self, overrides: &PaletteOverrides) -> ResolvedTheme {
        ResolvedTheme {
            palette: self.palette.resolve(overrides),
            typography: self.typography.clone(),
            shape: self.shape,
            components: self.components.clone(),
        }
    }
}

/// Fully resolved, ready-to-apply theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTheme {
    /// Resolved palette.
    pub palette: Palette,
    /// Typography.
    pub typography: Typography,
    /// Shape.
    pub shape: Shape,
    /// Component overrides.
    pub components: ComponentOverrides,
}

impl ResolvedTheme {
    /// The mode this theme was resolved for.
    pub fn mode(&self) -> ThemeMode {
        self.palette.mode
    }

    /// Serialize the theme as pretty JSON, e.g. for handing to a web view.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
