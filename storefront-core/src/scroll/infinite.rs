use std::cell::Cell;
use std::rc::Rc;

use super::observer::{Sentinel, SentinelObserver, VisibilityEntry, VisibilityObserver};

/// Default sentinel height in logical pixels.
pub const DEFAULT_THRESHOLD: f32 = 100.0;

/// Callback requesting the next page. Compared by identity.
pub type LoadMore = Rc<dyn Fn()>;

/// Requests the next page when the sentinel after a list becomes visible.
///
/// `load_more` is only called while more items exist and no page is being
/// loaded. Both flags are captured when the observation is attached, and the
/// observation is recreated whenever one of them or the callback changes.
///
/// At most one request is made per visible run of the sentinel. Recreating
/// the observation while the sentinel stays visible does not request again;
/// the sentinel has to leave the viewport first.
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use storefront_core::scroll::{InfiniteScroll, SentinelObserver};
///
/// let pages = Rc::new(Cell::new(0));
/// let counter = pages.clone();
/// let mut scroll = InfiniteScroll::new(SentinelObserver::new(), Rc::new(move || counter.set(counter.get() + 1)));
///
/// scroll.observer_mut().set_visible(true);
/// assert_eq!(pages.get(), 1);
/// ```
pub struct InfiniteScroll<O: VisibilityObserver = SentinelObserver> {
    observer: O,
    load_more: LoadMore,
    has_more: bool,
    loading: bool,
    threshold: f32,
    requested: Rc<Cell<bool>>,
}

impl<O: VisibilityObserver> InfiniteScroll<O> {
    /// Start observing with more items available and nothing loading.
    pub fn new(observer: O, load_more: LoadMore) -> Self {
        let mut scroll = Self {
            observer,
            load_more,
            has_more: true,
            loading: false,
            threshold: DEFAULT_THRESHOLD,
            requested: Rc::new(Cell::new(false)),
        };
        scroll.reattach();
        scroll
    }

    /// Use a different sentinel height.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self.reattach();
        self
    }

    /// Whether more items exist.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a page is being loaded.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Sentinel height.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether a loading indicator should be drawn inside the sentinel.
    pub fn shows_indicator(&self) -> bool {
        self.loading
    }

    /// The observer watching the sentinel.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the observer, for feeding it scroll updates.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Update whether more items exist.
    pub fn set_has_more(&mut self, has_more: bool) {
        if self.has_more != has_more {
            self.has_more = has_more;
            self.reattach();
        }
    }

    /// Update whether a page is being loaded.
    pub fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.reattach();
        }
    }

    /// Replace the callback. Nothing happens if it is the same callback.
    pub fn set_load_more(&mut self, load_more: LoadMore) {
        if !Rc::ptr_eq(&self.load_more, &load_more) {
            self.load_more = load_more;
            self.reattach();
        }
    }

    fn reattach(&mut self) {
        self.observer.detach();

        let ready = self.has_more && !self.loading;
        let load_more = self.load_more.clone();
        let requested = self.requested.clone();
        log::trace!("Observing sentinel (has_more: {}, loading: {})", self.has_more, self.loading);

        self.observer.attach(
            Sentinel::new(self.threshold),
            Box::new(move |entry: VisibilityEntry| {
                if !entry.is_intersecting {
                    requested.set(false);
                } else if ready && !requested.get() {
                    log::debug!("Sentinel visible, requesting more items");
                    requested.set(true);
                    load_more();
                }
            }),
        );
    }
}

impl<O: VisibilityObserver> Drop for InfiniteScroll<O> {
    fn drop(&mut self) {
        self.observer.detach();
    }
}
