use std::ops::Range;

/// Share of the sentinel that has to be inside the viewport to count as visible.
pub const VISIBLE_RATIO: f32 = 0.1;

/// The box whose visibility is observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentinel {
    /// Height of the sentinel in logical pixels.
    pub height: f32,
}

impl Sentinel {
    /// Create a sentinel of the given height.
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

/// A visibility report for the observed sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEntry {
    /// Whether the sentinel intersects the viewport.
    pub is_intersecting: bool,
}

/// Callback receiving [VisibilityEntry] reports.
pub type VisibilityCallback = Box<dyn FnMut(VisibilityEntry)>;

/// Watches one sentinel and reports when its visibility changes.
///
/// Implementations report the current visibility once right after
/// [attach](VisibilityObserver::attach) and then on every change, until
/// [detach](VisibilityObserver::detach) is called.
pub trait VisibilityObserver {
    /// Start observing `sentinel`, replacing any previous observation.
    fn attach(&mut self, sentinel: Sentinel, callback: VisibilityCallback);

    /// Stop observing. Does nothing when not attached.
    fn detach(&mut self);

    /// Whether a sentinel is currently observed.
    fn is_attached(&self) -> bool;
}

/// A [VisibilityObserver] driven by the host's scroll container.
///
/// The host either reports layout with [update_layout](Self::update_layout)
/// or sets the visibility directly with [set_visible](Self::set_visible).
/// Visibility is remembered across attachments.
#[derive(Default)]
pub struct SentinelObserver {
    sentinel: Option<Sentinel>,
    callback: Option<VisibilityCallback>,
    visible: bool,
}

impl SentinelObserver {
    /// Create a detached observer with an invisible sentinel.
    pub fn new() -> Self {
        Self::default()
    }

    /// The observed sentinel.
    pub fn sentinel(&self) -> Option<Sentinel> {
        self.sentinel
    }

    /// Whether the sentinel is currently visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the visibility of the sentinel, reporting it if it changed.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        self.notify();
    }

    /// Recompute visibility from the viewport range and the sentinel's top edge,
    /// both in content coordinates.
    ///
    /// The sentinel counts as visible when at least a tenth of it is inside
    /// the viewport. A detached observer keeps its last visibility.
    pub fn update_layout(&mut self, viewport: Range<f32>, sentinel_top: f32) {
        let Some(sentinel) = self.sentinel else {
            return;
        };
        let bottom = sentinel_top + sentinel.height;
        let overlap = (viewport.end.min(bottom) - viewport.start.max(sentinel_top)).max(0.0);
        let visible = if sentinel.height > 0.0 {
            overlap / sentinel.height >= VISIBLE_RATIO
        } else {
            viewport.contains(&sentinel_top)
        };
        self.set_visible(visible);
    }

    fn notify(&mut self) {
        let entry = VisibilityEntry {
            is_intersecting: self.visible,
        };
        if let Some(callback) = self.callback.as_mut() {
            callback(entry);
        }
    }
}

impl VisibilityObserver for SentinelObserver {
    fn attach(&mut self, sentinel: Sentinel, callback: VisibilityCallback) {
        self.sentinel = Some(sentinel);
        self.callback = Some(callback);
        self.notify();
    }

    fn detach(&mut self) {
        self.sentinel = None;
        self.callback = None;
    }

    fn is_attached(&self) -> bool {
        self.callback.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, VisibilityCallback) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, Box::new(move |entry: VisibilityEntry| sink.borrow_mut().push(entry.is_intersecting)))
    }

    #[test]
    fn test_reports_initial_state_and_changes() {
        let mut observer = SentinelObserver::new();
        let (seen, callback) = recorder();
        observer.attach(Sentinel::new(100.0), callback);

        observer.set_visible(true);
        observer.set_visible(true);
        observer.set_visible(false);
        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }

    #[test]
    fn test_detached_observer_is_silent() {
        let mut observer = SentinelObserver::new();
        let (seen, callback) = recorder();
        observer.attach(Sentinel::new(100.0), callback);
        observer.detach();

        observer.set_visible(true);
        assert!(!observer.is_attached());
        assert_eq!(*seen.borrow(), vec![false]);
    }

    #[test]
    fn test_layout_threshold() {
        let mut observer = SentinelObserver::new();
        let (seen, callback) = recorder();
        observer.attach(Sentinel::new(100.0), callback);

        // 5px of a 100px sentinel is not enough.
        observer.update_layout(0.0..505.0, 500.0);
        assert!(!observer.is_visible());
        observer.update_layout(0.0..520.0, 500.0);
        assert!(observer.is_visible());
        observer.update_layout(700.0..1200.0, 500.0);
        assert!(!observer.is_visible());
        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }
}
