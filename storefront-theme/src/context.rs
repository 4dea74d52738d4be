//! # Theme Context
//!
//! The [ThemeContext] is created once per session and handed down to every
//! consumer that needs the active theme. It replaces global mutable theme
//! state: the current mode can only change through [ThemeContext::toggle].
//!
//! A toggle runs three steps in order within one call:
//!
//! 1. flip the mode
//! 2. persist the new mode
//! 3. rebuild the [ResolvedTheme] and notify subscribers
//!
//! so a subscriber never observes a theme that has not been persisted yet.

use std::sync::Arc;

use crate::mode::ThemeMode;
use crate::preference::Preferences;
use crate::resolver::resolve;
use crate::theme::ResolvedTheme;

/// Handle returned by [ThemeContext::subscribe].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&ResolvedTheme)>;

/// Session-lifetime theme state.
pub struct ThemeContext {
    preferences: Preferences,
    mode: ThemeMode,
    theme: Arc<ResolvedTheme>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ThemeContext {
    /// Load the persisted mode and resolve its theme.
    pub fn new(preferences: Preferences) -> Self {
        let mode = preferences.theme_mode();
        log::debug!("Starting theme context in {} mode", mode);
        Self {
            preferences,
            mode,
            theme: Arc::new(resolve(mode)),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Current resolved theme.
    pub fn theme(&self) -> Arc<ResolvedTheme> {
        self.theme.clone()
    }

    /// Preferences backing this context.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Flip the mode, persist it and rebuild the theme. Returns the new mode.
    pub fn toggle(&mut self) -> ThemeMode {
        let mode = self.mode.toggled();
        self.mode = mode;
        self.preferences.set_theme_mode(mode);
        self.theme = Arc::new(resolve(mode));
        log::debug!("Theme toggled to {} mode", mode);

        for (_, listener) in &self.listeners {
            listener(&self.theme);
        }
        mode
    }

    /// Call `listener` with the new theme after every toggle.
    pub fn subscribe(&mut self, listener: impl Fn(&ResolvedTheme) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}
