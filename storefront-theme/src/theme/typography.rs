use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Text roles that carry their own font assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    /// Running text.
    Body,
    /// Level 1 heading.
    H1,
    /// Level 2 heading.
    H2,
    /// Level 3 heading.
    H3,
    /// Level 4 heading.
    H4,
    /// Level 5 heading.
    H5,
    /// Level 6 heading.
    H6,
    /// Primary subtitle.
    Subtitle1,
    /// Secondary subtitle.
    Subtitle2,
    /// Button labels.
    Button,
}

/// Case transformation applied to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// Render text as written.
    #[default]
    None,
    /// Render text in upper case.
    Uppercase,
}

/// Font assignment for a single role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// CSS-style font family stack.
    pub font_family: String,
    /// Numeric font weight.
    pub font_weight: u16,
    /// Case transformation.
    #[serde(default)]
    pub text_transform: TextTransform,
}

impl TextStyle {
    /// Create a style without case transformation.
    pub fn new(font_family: impl Into<String>, font_weight: u16) -> Self {
        Self {
            font_family: font_family.into(),
            font_weight,
            text_transform: TextTransform::None,
        }
    }
}

/// Typography shared by both modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Family used by any role without an explicit assignment.
    pub font_family: String,
    /// Per-role assignments.
    pub roles: IndexMap<TextRole, TextStyle>,
}

impl Typography {
    /// Create typography with only a base family.
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
            roles: IndexMap::new(),
        }
    }

    /// Assign a style to a role.
    #[must_use]
    pub fn with_role(mut self, role: TextRole, style: TextStyle) -> Self {
        self.roles.insert(role, style);
        self
    }

    /// Style for `role`, falling back to the base family at regular weight.
    pub fn style(&self, role: TextRole) -> TextStyle {
        self.roles
            .get(&role)
            .cloned()
            .unwrap_or_else(|| TextStyle::new(self.font_family.clone(), 400))
    }
}
