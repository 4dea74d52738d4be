//! Component-level style overrides.
//!
//! Overrides are keyed by component name (`"Button"`), then by slot
//! (`"root"`, `"containedPrimary"`). Each slot holds plain declarations plus
//! declarations scoped to an interaction state such as `":hover"`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use vello::peniko::Color;

/// A single style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// A color, serialized as hex.
    Color(#[serde(with = "crate::serde_color")] Color),
    /// A raw CSS-like value (`"none"`, `"0px 2px 4px rgba(0, 0, 0, 0.2)"`).
    Raw(String),
}

impl From<Color> for StyleValue {
    fn from(color: Color) -> Self {
        StyleValue::Color(color)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Raw(value.to_string())
    }
}

/// Declarations for one slot of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    /// Declarations applied unconditionally.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub declarations: IndexMap<String, StyleValue>,
    /// Declarations applied in an interaction state, keyed by selector.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub states: IndexMap<String, IndexMap<String, StyleValue>>,
}

impl StyleRule {
    /// Create an empty rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unconditional declaration.
    #[must_use]
    pub fn with(mut self, property: &str, value: impl Into<StyleValue>) -> Self {
        self.declarations.insert(property.to_string(), value.into());
        self
    }

    /// Add a declaration scoped to `state`.
    #[must_use]
    pub fn with_state(mut self, state: &str, property: &str, value: impl Into<StyleValue>) -> Self {
        self.states
            .entry(state.to_string())
            .or_default()
            .insert(property.to_string(), value.into());
        self
    }

    /// Look up an unconditional declaration.
    pub fn declaration(&self, property: &str) -> Option<&StyleValue> {
        self.declarations.get(property)
    }

    /// Look up a declaration scoped to `state`.
    pub fn state(&self, state: &str, property: &str) -> Option<&StyleValue> {
        self.states.get(state).and_then(|rules| rules.get(property))
    }
}

/// Overrides for every styled component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentOverrides {
    components: IndexMap<String, IndexMap<String, StyleRule>>,
}

impl ComponentOverrides {
    /// Create an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule of `component`'s `slot`.
    #[must_use]
    pub fn with(mut self, component: &str, slot: &str, rule: StyleRule) -> Self {
        self.components
            .entry(component.to_string())
            .or_default()
            .insert(slot.to_string(), rule);
        self
    }

    /// Rule of `component`'s `slot`.
    pub fn get(&self, component: &str, slot: &str) -> Option<&StyleRule> {
        self.components.get(component).and_then(|slots| slots.get(slot))
    }

    /// Names of all overridden components, in insertion order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }
}
