//! Windowing for long lists of fixed-height rows.
//!
//! Only the rows intersecting the viewport, plus a few rows of overscan on
//! each side, need to be built and drawn.

use std::ops::Range;

/// Default row height in logical pixels.
pub const DEFAULT_ITEM_HEIGHT: f32 = 50.0;

/// Default number of extra rows built beyond each edge of the viewport.
pub const DEFAULT_OVERSCAN: usize = 2;

/// Layout of a list with rows of equal height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualList {
    item_count: usize,
    item_height: f32,
    overscan: usize,
}

impl VirtualList {
    /// A list of `item_count` rows with the default height and overscan.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            item_height: DEFAULT_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    /// Set the row height. Non-positive heights render nothing.
    #[must_use]
    pub fn with_item_height(mut self, item_height: f32) -> Self {
        self.item_height = item_height;
        self
    }

    /// Set the overscan.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Number of rows.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Update the number of rows, e.g. after a page was appended.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }

    /// Row height.
    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    /// Total scrollable height.
    pub fn content_height(&self) -> f32 {
        self.item_count as f32 * self.item_height
    }

    /// Top edge of the row at `index`.
    pub fn item_offset(&self, index: usize) -> f32 {
        index as f32 * self.item_height
    }

    /// Rows to build for a viewport of `viewport_height` scrolled by `scroll_offset`.
    pub fn visible_range(&self, scroll_offset: f32, viewport_height: f32) -> Range<usize> {
        if self.item_count == 0 || self.item_height <= 0.0 || viewport_height <= 0.0 {
            return 0..0;
        }
        let max_offset = (self.content_height() - viewport_height).max(0.0);
        let offset = scroll_offset.clamp(0.0, max_offset);

        let first = (offset / self.item_height).floor() as usize;
        let last = ((offset + viewport_height) / self.item_height).ceil() as usize;

        let start = first.min(self.item_count).saturating_sub(self.overscan);
        let end = last.saturating_add(self.overscan).min(self.item_count);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_of_list() {
        let list = VirtualList::new(1000);
        assert_eq!(list.visible_range(0.0, 400.0), 0..10);
    }

    #[test]
    fn test_scrolled_with_overscan() {
        let list = VirtualList::new(1000);
        assert_eq!(list.visible_range(1025.0, 400.0), 18..31);
        assert_eq!(list.item_offset(18), 900.0);
    }

    #[test]
    fn test_end_of_list_is_clamped() {
        let list = VirtualList::new(20).with_overscan(0);
        assert_eq!(list.content_height(), 1000.0);
        assert_eq!(list.visible_range(5000.0, 400.0), 12..20);
    }

    #[test]
    fn test_short_and_empty_lists() {
        assert_eq!(VirtualList::new(3).visible_range(0.0, 800.0), 0..3);
        assert_eq!(VirtualList::new(0).visible_range(0.0, 800.0), 0..0);
        assert_eq!(VirtualList::new(10).with_item_height(0.0).visible_range(0.0, 800.0), 0..0);
    }
}
