//! # Scrolling
//!
//! Pagination is driven by a sentinel: a small box placed after the last
//! list item. When the sentinel scrolls into view, the next page is
//! requested.
//!
//! - **[VisibilityObserver]**: reports visibility changes of a sentinel
//! - **[SentinelObserver]**: observer fed with scroll geometry or explicit visibility
//! - **[InfiniteScroll]**: requests more items when the sentinel appears

mod infinite;
mod observer;

pub use infinite::{InfiniteScroll, LoadMore, DEFAULT_THRESHOLD};
pub use observer::{Sentinel, SentinelObserver, VisibilityCallback, VisibilityEntry, VisibilityObserver, VISIBLE_RATIO};
