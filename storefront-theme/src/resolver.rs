//! # Theme Resolver
//!
//! Pure mapping from [ThemeMode] to [ResolvedTheme]. The resolver performs no
//! I/O and reads no hidden state: calling [resolve] twice with the same mode
//! yields structurally identical themes.
//!
//! ```rust
//! use storefront_theme::mode::ThemeMode;
//! use storefront_theme::resolver::resolve;
//! use storefront_theme::serde_color::to_hex;
//!
//! let light = resolve(ThemeMode::Light);
//! assert_eq!(to_hex(light.palette.primary.main), "#1A237E");
//!
//! let dark = resolve(ThemeMode::Dark);
//! assert_eq!(to_hex(dark.palette.primary.main), "#3F51B5");
//! ```

use vello::peniko::Color;

use crate::mode::ThemeMode;
use crate::theme::components::{ComponentOverrides, StyleRule};
use crate::theme::palette::{
    Background, PaletteColor, PaletteColorOverride, PaletteOptions, PaletteOverrides, TextColors,
};
use crate::theme::typography::{TextRole, TextStyle, TextTransform, Typography};
use crate::theme::{ResolvedTheme, Shape, ThemeOptions};

const BODY_FONT: &str = "\"Open Sans\", system-ui, -apple-system, sans-serif";
const HEADING_FONT: &str = "\"Poppins\", system-ui, -apple-system, sans-serif";
const SUBTITLE_FONT: &str = "\"Poppins\", \"Helvetica\", \"Arial\", sans-serif";

/// Resolve the theme for `mode`.
pub fn resolve(mode: ThemeMode) -> ResolvedTheme {
    let theme = base_options().resolve(&mode_overrides(mode));
    log::trace!("Resolved {} theme", mode);
    theme
}

/// The mode-invariant base shared by every mode.
pub fn base_options() -> ThemeOptions {
    let palette = PaletteOptions {
        // Navy blue
        primary: PaletteColor {
            main: Color::from_rgb8(0x1A, 0x23, 0x7E),
            light: Color::from_rgb8(0x4A, 0x51, 0xA8),
            dark: Color::from_rgb8(0x00, 0x00, 0x51),
            contrast_text: Color::from_rgb8(0xFF, 0xFF, 0xFF),
        },
        // Soft gold
        secondary: PaletteColor {
            main: Color::from_rgb8(0xFF, 0xCA, 0x28),
            light: Color::from_rgb8(0xFF, 0xF3, 0x50),
            dark: Color::from_rgb8(0xC7, 0x9A, 0x00),
            contrast_text: Color::from_rgb8(0x00, 0x00, 0x00),
        },
    };

    ThemeOptions {
        typography: base_typography(),
        shape: Shape { border_radius: 8.0 },
        components: base_components(&palette),
        palette,
    }
}

/// Palette entries specific to `mode`.
pub fn mode_overrides(mode: ThemeMode) -> PaletteOverrides {
    match mode {
        ThemeMode::Light => PaletteOverrides {
            mode,
            background: Background {
                default: Color::from_rgb8(0xF5, 0xF5, 0xF5),
                paper: Color::from_rgb8(0xFF, 0xFF, 0xFF),
            },
            text: TextColors {
                primary: Color::from_rgb8(0x21, 0x21, 0x21),
                secondary: Color::from_rgb8(0x75, 0x75, 0x75),
            },
            primary: PaletteColorOverride::default(),
            secondary: PaletteColorOverride::default(),
        },
        ThemeMode::Dark => PaletteOverrides {
            mode,
            background: Background {
                default: Color::from_rgb8(0x12, 0x12, 0x12),
                paper: Color::from_rgb8(0x1E, 0x1E, 0x1E),
            },
            text: TextColors {
                primary: Color::from_rgb8(0xFF, 0xFF, 0xFF),
                secondary: Color::from_rgb8(0xAA, 0xAA, 0xAA),
            },
            primary: PaletteColorOverride::main(Color::from_rgb8(0x3F, 0x51, 0xB5)),
            secondary: PaletteColorOverride::main(Color::from_rgb8(0xFF, 0xD5, 0x4F)),
        },
    }
}

fn base_typography() -> Typography {
    let heading = |weight| TextStyle::new(HEADING_FONT, weight);
    Typography::new(BODY_FONT)
        .with_role(TextRole::H1, heading(700))
        .with_role(TextRole::H2, heading(600))
        .with_role(TextRole::H3, heading(600))
        .with_role(TextRole::H4, heading(600))
        .with_role(TextRole::H5, heading(500))
        .with_role(TextRole::H6, heading(500))
        .with_role(TextRole::Subtitle1, TextStyle::new(SUBTITLE_FONT, 500))
        .with_role(TextRole::Subtitle2, TextStyle::new(SUBTITLE_FONT, 500))
        .with_role(
            TextRole::Button,
            TextStyle {
                text_transform: TextTransform::None,
                ..heading(500)
            },
        )
}

fn base_components(palette: &PaletteOptions) -> ComponentOverrides {
    ComponentOverrides::new()
        .with(
            "Button",
            "root",
            StyleRule::new()
                .with("boxShadow", "none")
                .with_state(":hover", "boxShadow", "0px 2px 4px rgba(0, 0, 0, 0.2)"),
        )
        .with(
            "Button",
            "containedPrimary",
            StyleRule::new().with_state(":hover", "backgroundColor", palette.primary.light),
        )
        .with(
            "Button",
            "containedSecondary",
            StyleRule::new().with_state(":hover", "backgroundColor", palette.secondary.light),
        )
        .with(
            "TextField",
            "root",
            StyleRule::new().with_state(
                ":hover .outlined-border",
                "borderColor",
                palette.primary.main,
            ),
        )
        .with(
            "Card",
            "root",
            StyleRule::new()
                .with("boxShadow", "0px 3px 6px rgba(0, 0, 0, 0.1)")
                .with("transition", "box-shadow 0.3s ease-in-out")
                .with_state(":hover", "boxShadow", "0px 6px 12px rgba(0, 0, 0, 0.15)"),
        )
}
