//! # Keyboard Navigation
//!
//! Lets users move through a dynamic list (search suggestions, menus,
//! product grids) with the arrow keys and pick an entry with Enter or Space.
//!
//! The list is queried again on every key press, so items added or removed
//! between presses are always reflected. The cursor starts unset; the first
//! arrow press focuses the first (down) or last (up) item, and both
//! directions wrap around.
//!
//! ```rust
//! use storefront_core::navigation::{FocusScope, KeyOutcome, KeyboardNavigator, NavKey};
//!
//! struct Menu {
//!     entries: Vec<&'static str>,
//!     focused: Option<&'static str>,
//! }
//!
//! impl FocusScope for Menu {
//!     type Item = &'static str;
//!
//!     fn query_all(&self, _selector: &str) -> Vec<&'static str> {
//!         self.entries.clone()
//!     }
//!
//!     fn focus(&mut self, item: &&'static str) {
//!         self.focused = Some(*item);
//!     }
//! }
//!
//! let mut nav = KeyboardNavigator::new();
//! nav.attach(Menu { entries: vec!["Shoes", "Shirts"], focused: None }, ".entry", |_| {});
//!
//! assert_eq!(nav.handle_key(NavKey::Up), KeyOutcome::Handled);
//! assert_eq!(nav.scope().unwrap().focused, Some("Shirts"));
//! ```

use std::rc::Rc;

use winit::keyboard::{Key, NamedKey};

/// A container whose descendants can be navigated.
pub trait FocusScope {
    /// Handle to one navigable descendant.
    type Item;

    /// All descendants matching `selector`, in display order.
    fn query_all(&self, selector: &str) -> Vec<Self::Item>;

    /// Move keyboard focus to `item`.
    fn focus(&mut self, item: &Self::Item);
}

/// Keys understood by the [KeyboardNavigator].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// Move to the next item.
    Down,
    /// Move to the previous item.
    Up,
    /// Select the focused item (Enter or Space).
    Select,
    /// Any other key.
    Other,
}

impl From<&Key> for NavKey {
    fn from(key: &Key) -> Self {
        match key {
            Key::Named(NamedKey::ArrowDown) => Self::Down,
            Key::Named(NamedKey::ArrowUp) => Self::Up,
            Key::Named(NamedKey::Enter) | Key::Named(NamedKey::Space) => Self::Select,
            Key::Character(c) if c.as_str() == " " => Self::Select,
            _ => Self::Other,
        }
    }
}

/// Result of [KeyboardNavigator::handle_key].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyOutcome {
    /// The key was consumed; its default action must be suppressed.
    Handled,
    /// The key was not consumed.
    Ignored,
}

impl KeyOutcome {
    /// Whether the default action of the key must be suppressed.
    pub fn prevents_default(self) -> bool {
        self == Self::Handled
    }
}

type SelectCallback<T> = Rc<dyn Fn(&T)>;

struct Binding<S: FocusScope> {
    scope: S,
    selector: String,
    on_select: SelectCallback<S::Item>,
}

/// Arrow key navigation over the items of a [FocusScope].
pub struct KeyboardNavigator<S: FocusScope> {
    binding: Option<Binding<S>>,
    cursor: Option<usize>,
}

impl<S: FocusScope> Default for KeyboardNavigator<S> {
    fn default() -> Self {
        Self {
            binding: None,
            cursor: None,
        }
    }
}

impl<S: FocusScope> KeyboardNavigator<S> {
    /// Create a detached navigator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start handling keys for the items of `scope` matching `selector`.
    ///
    /// Replaces any previous binding and resets the cursor.
    pub fn attach(&mut self, scope: S, selector: impl Into<String>, on_select: impl Fn(&S::Item) + 'static) {
        let selector = selector.into();
        log::trace!("Keyboard navigation attached to {:?}", selector);
        self.binding = Some(Binding {
            scope,
            selector,
            on_select: Rc::new(on_select),
        });
        self.cursor = None;
    }

    /// Stop handling keys and hand back the scope.
    pub fn detach(&mut self) -> Option<S> {
        self.cursor = None;
        self.binding.take().map(|binding| binding.scope)
    }

    /// Whether a scope is attached.
    pub fn is_attached(&self) -> bool {
        self.binding.is_some()
    }

    /// The attached scope.
    pub fn scope(&self) -> Option<&S> {
        self.binding.as_ref().map(|binding| &binding.scope)
    }

    /// Mutable access to the attached scope.
    pub fn scope_mut(&mut self) -> Option<&mut S> {
        self.binding.as_mut().map(|binding| &mut binding.scope)
    }

    /// Index of the focused item, if any.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Handle a winit key press.
    pub fn handle_winit_key(&mut self, key: &Key) -> KeyOutcome {
        self.handle_key(NavKey::from(key))
    }

    /// Handle a key press.
    ///
    /// Keys are ignored while detached, while the scope has no matching items
    /// and for keys other than the arrows, Enter and Space.
    pub fn handle_key(&mut self, key: NavKey) -> KeyOutcome {
        let Some(binding) = self.binding.as_mut() else {
            return KeyOutcome::Ignored;
        };
        if key == NavKey::Other {
            return KeyOutcome::Ignored;
        }

        let items = binding.scope.query_all(&binding.selector);
        let len = items.len();
        if len == 0 {
            return KeyOutcome::Ignored;
        }

        let next = match key {
            NavKey::Down => match self.cursor {
                Some(cursor) if cursor + 1 < len => cursor + 1,
                _ => 0,
            },
            NavKey::Up => match self.cursor {
                Some(cursor) if cursor > 0 => cursor.min(len) - 1,
                _ => len - 1,
            },
            NavKey::Select => {
                if let Some(item) = self.cursor.and_then(|cursor| items.get(cursor)) {
                    log::debug!("Selecting item {:?}", self.cursor);
                    let on_select = binding.on_select.clone();
                    on_select(item);
                }
                return KeyOutcome::Handled;
            },
            NavKey::Other => return KeyOutcome::Ignored,
        };

        binding.scope.focus(&items[next]);
        self.cursor = Some(next);
        log::trace!("Focused item {} of {}", next, len);
        KeyOutcome::Handled
    }
}
