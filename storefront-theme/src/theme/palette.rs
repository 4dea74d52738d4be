use serde::{Deserialize, Serialize};
use vello::peniko::Color;

use crate::mode::ThemeMode;

/// A color with its light/dark variants and the text color drawn on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteColor {
    /// Main shade.
    #[serde(with = "crate::serde_color")]
    pub main: Color,
    /// Lighter variant, used for hover states.
    #[serde(with = "crate::serde_color")]
    pub light: Color,
    /// Darker variant.
    #[serde(with = "crate::serde_color")]
    pub dark: Color,
    /// Text color on top of [PaletteColor::main].
    #[serde(with = "crate::serde_color")]
    pub contrast_text: Color,
}

impl PaletteColor {
    /// Apply the set fields of `overrides` on top of this color.
    #[must_use]
    pub fn merged(self, overrides: &PaletteColorOverride) -> Self {
        Self {
            main: overrides.main.unwrap_or(self.main),
            light: overrides.light.unwrap_or(self.light),
            dark: overrides.dark.unwrap_or(self.dark),
            contrast_text: overrides.contrast_text.unwrap_or(self.contrast_text),
        }
    }
}

/// Partial [PaletteColor]; unset fields keep the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaletteColorOverride {
    /// Replacement main shade.
    pub main: Option<Color>,
    /// Replacement light variant.
    pub light: Option<Color>,
    /// Replacement dark variant.
    pub dark: Option<Color>,
    /// Replacement contrast text.
    pub contrast_text: Option<Color>,
}

impl PaletteColorOverride {
    /// Override only the main shade.
    pub fn main(color: Color) -> Self {
        Self {
            main: Some(color),
            ..Self::default()
        }
    }
}

/// Page and surface backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Background {
    /// Page background.
    #[serde(with = "crate::serde_color")]
    pub default: Color,
    /// Raised surfaces such as cards and dialogs.
    #[serde(with = "crate::serde_color")]
    pub paper: Color,
}

/// Text colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextColors {
    /// Body text.
    #[serde(with = "crate::serde_color")]
    pub primary: Color,
    /// Secondary labels and captions.
    #[serde(with = "crate::serde_color")]
    pub secondary: Color,
}

/// Mode-invariant part of the palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteOptions {
    /// Brand color.
    pub primary: PaletteColor,
    /// Accent color.
    pub secondary: PaletteColor,
}

/// Mode-specific palette entries layered over [PaletteOptions].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteOverrides {
    /// The mode these overrides belong to.
    pub mode: ThemeMode,
    /// Backgrounds for the mode.
    pub background: Background,
    /// Text colors for the mode.
    pub text: TextColors,
    /// Changes to the brand color.
    pub primary: PaletteColorOverride,
    /// Changes to the accent color.
    pub secondary: PaletteColorOverride,
}

/// Fully resolved palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// The mode the palette was resolved for.
    pub mode: ThemeMode,
    /// Brand color.
    pub primary: PaletteColor,
    /// Accent color.
    pub secondary: PaletteColor,
    /// Backgrounds.
    pub background: Background,
    /// Text colors.
    pub text: TextColors,
}

impl PaletteOptions {
    /// Merge mode-specific overrides into a resolved palette.
    pub fn resolve(&self, overrides: &PaletteOverrides) -> Palette {
        Palette {
            mode: overrides.mode,
            primary: self.primary.merged(&overrides.primary),
            secondary: self.secondary.merged(&overrides.secondary),
            background: overrides.background,
            text: overrides.text,
        }
    }
}
