use std::fmt;

use crate::error::ImageResult;
use crate::Size;

use super::locator::{optimize_locator, TransformOptions};

/// Text shown in place of an image that could not be loaded.
pub const UNAVAILABLE_MESSAGE: &str = "Image not available";

/// Fetch state of an [OptimizedImage].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageLoadState {
    /// The variant is being fetched.
    Loading,
    /// The variant arrived and can be drawn.
    Loaded,
    /// The source was invalid or the fetch failed.
    Error,
}

impl fmt::Display for ImageLoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Loaded => write!(f, "loaded"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Identifies one fetch issued for an [OptimizedImage].
///
/// A new ticket is issued for every source, so results of fetches for an
/// outdated source are recognized and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

/// A fetch the host has to perform for an [OptimizedImage].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Locator of the requested variant.
    pub locator: String,
    /// Ticket to report the result with.
    pub ticket: FetchTicket,
}

/// Input driving an [OptimizedImage].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEvent {
    /// The fetch identified by the ticket completed.
    FetchSucceeded(FetchTicket),
    /// The fetch identified by the ticket failed.
    FetchFailed(FetchTicket),
    /// The widget was given a new source.
    SourceChanged(String),
}

/// How a loaded image fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectFit {
    /// Scale to cover the whole box and crop the overflow.
    #[default]
    Cover,
    /// Scale to fit inside the box.
    Contain,
}

/// What the renderer should draw for an [OptimizedImage].
#[derive(Debug, Clone, PartialEq)]
pub enum ImageView<'a> {
    /// Skeleton placeholder of the display size.
    Placeholder {
        /// Display size.
        size: Size,
    },
    /// The fetched image pinned to the display size.
    Image {
        /// Locator of the fetched variant.
        locator: &'a str,
        /// Accessible description.
        alt: &'a str,
        /// Display size.
        size: Size,
        /// How the image fills the size.
        fit: ObjectFit,
    },
    /// Fallback box with a short message.
    Unavailable {
        /// Display size.
        size: Size,
        /// Message to show.
        message: &'static str,
    },
}

/// Loading state machine of a single image widget.
///
/// ```text
/// Loading --FetchSucceeded--> Loaded
/// Loading --FetchFailed-----> Error
/// any     --SourceChanged---> Loading (or Error if the new source is invalid)
/// ```
///
/// Fetch results only apply while loading and only for the current ticket.
pub struct OptimizedImage {
    source: String,
    alt: String,
    size: Size,
    fit: ObjectFit,
    options: TransformOptions,
    locator: ImageResult<String>,
    state: ImageLoadState,
    ticket: FetchTicket,
}

impl OptimizedImage {
    /// Create a loader for `source` displayed at `size`.
    ///
    /// An empty or malformed source starts in [ImageLoadState::Error].
    pub fn new(source: impl Into<String>, size: Size, options: TransformOptions) -> Self {
        let source = source.into();
        let locator = optimize_locator(&source, options);
        let state = initial_state(&source, &locator);
        Self {
            source,
            alt: String::new(),
            size,
            fit: ObjectFit::default(),
            options,
            locator,
            state,
            ticket: FetchTicket(0),
        }
    }

    /// Set the accessible description.
    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    /// Set how the loaded image fills its box.
    #[must_use]
    pub fn with_fit(mut self, fit: ObjectFit) -> Self {
        self.fit = fit;
        self
    }

    /// Current state.
    pub fn state(&self) -> ImageLoadState {
        self.state
    }

    /// The untransformed source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The derived variant locator, or why it could not be derived.
    pub fn locator(&self) -> &ImageResult<String> {
        &self.locator
    }

    /// Display size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Change the display size. Does not restart loading.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// The fetch the host should perform, if the image is loading.
    pub fn fetch_request(&self) -> Option<FetchRequest> {
        match (&self.state, &self.locator) {
            (ImageLoadState::Loading, Ok(locator)) => Some(FetchRequest {
                locator: locator.clone(),
                ticket: self.ticket,
            }),
            _ => None,
        }
    }

    /// Apply an event and return the resulting state.
    pub fn handle(&mut self, event: ImageEvent) -> ImageLoadState {
        match event {
            ImageEvent::FetchSucceeded(ticket) => self.finish(ticket, ImageLoadState::Loaded),
            ImageEvent::FetchFailed(ticket) => self.finish(ticket, ImageLoadState::Error),
            ImageEvent::SourceChanged(source) => {
                if source != self.source {
                    self.source = source;
                    self.locator = optimize_locator(&self.source, self.options);
                    self.ticket = FetchTicket(self.ticket.0 + 1);
                    self.transition(initial_state(&self.source, &self.locator));
                }
            },
        }
        self.state
    }

    /// What to draw for the current state.
    pub fn view(&self) -> ImageView<'_> {
        match (&self.state, &self.locator) {
            (ImageLoadState::Loaded, Ok(locator)) => ImageView::Image {
                locator,
                alt: &self.alt,
                size: self.size,
                fit: self.fit,
            },
            (ImageLoadState::Loading, _) => ImageView::Placeholder { size: self.size },
            _ => ImageView::Unavailable {
                size: self.size,
                message: UNAVAILABLE_MESSAGE,
            },
        }
    }

    fn finish(&mut self, ticket: FetchTicket, state: ImageLoadState) {
        if ticket != self.ticket {
            log::trace!("Ignoring stale fetch result for {:?}", ticket);
            return;
        }
        if self.state == ImageLoadState::Loading {
            self.transition(state);
        }
    }

    fn transition(&mut self, state: ImageLoadState) {
        if self.state != state {
            log::debug!("Image {:?}: {} -> {}", self.source, self.state, state);
            self.state = state;
        }
    }
}

fn initial_state(source: &str, locator: &ImageResult<String>) -> ImageLoadState {
    match locator {
        Ok(_) => ImageLoadState::Loading,
        Err(e) => {
            log::warn!("Cannot load image {:?}: {}", source, e);
            ImageLoadState::Error
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Quality;

    const SIZE: Size = Size::new(300.0, 200.0);

    fn image(source: &str) -> OptimizedImage {
        OptimizedImage::new(source, SIZE, TransformOptions::default())
    }

    #[test]
    fn test_load_success() {
        let mut image = image("https://x/img.jpg").with_alt("Red shoe");
        assert_eq!(image.state(), ImageLoadState::Loading);
        assert_eq!(image.view(), ImageView::Placeholder { size: SIZE });

        let request = image.fetch_request().unwrap();
        assert_eq!(request.locator, "https://x/img.jpg?q=75");

        assert_eq!(image.handle(ImageEvent::FetchSucceeded(request.ticket)), ImageLoadState::Loaded);
        assert_eq!(
            image.view(),
            ImageView::Image {
                locator: "https://x/img.jpg?q=75",
                alt: "Red shoe",
                size: SIZE,
                fit: ObjectFit::Cover,
            }
        );
        assert_eq!(image.fetch_request(), None);
    }

    #[test]
    fn test_failed_image_stays_failed_until_source_changes() {
        let mut image = image("https://x/missing.jpg");
        let ticket = image.fetch_request().unwrap().ticket;
        assert_eq!(image.handle(ImageEvent::FetchFailed(ticket)), ImageLoadState::Error);

        assert_eq!(image.handle(ImageEvent::FetchSucceeded(ticket)), ImageLoadState::Error);
        assert_eq!(
            image.handle(ImageEvent::SourceChanged("https://x/missing.jpg".into())),
            ImageLoadState::Error
        );
        assert_eq!(
            image.view(),
            ImageView::Unavailable {
                size: SIZE,
                message: UNAVAILABLE_MESSAGE,
            }
        );

        assert_eq!(
            image.handle(ImageEvent::SourceChanged("https://x/other.jpg".into())),
            ImageLoadState::Loading
        );
    }

    #[test]
    fn test_loaded_only_leaves_on_new_source() {
        let mut image = image("https://x/a.jpg");
        let ticket = image.fetch_request().unwrap().ticket;
        image.handle(ImageEvent::FetchSucceeded(ticket));
        assert_eq!(image.handle(ImageEvent::FetchFailed(ticket)), ImageLoadState::Loaded);
        assert_eq!(image.handle(ImageEvent::SourceChanged("https://x/b.jpg".into())), ImageLoadState::Loading);
    }

    #[test]
    fn test_stale_fetch_result_is_ignored() {
        let mut image = image("https://x/a.jpg");
        let old = image.fetch_request().unwrap().ticket;
        image.handle(ImageEvent::SourceChanged("https://x/b.jpg".into()));

        assert_eq!(image.handle(ImageEvent::FetchSucceeded(old)), ImageLoadState::Loading);
        let request = image.fetch_request().unwrap();
        assert_eq!(request.locator, "https://x/b.jpg?q=75");
        assert_ne!(request.ticket, old);
    }

    #[test]
    fn test_invalid_source_fails_fast() {
        let image = image("");
        assert_eq!(image.state(), ImageLoadState::Error);
        assert!(image.locator().is_err());
        assert_eq!(image.fetch_request(), None);
        assert!(matches!(image.view(), ImageView::Unavailable { .. }));
    }

    #[test]
    fn test_blurred_variant_request() {
        let options = TransformOptions::new(Quality::new(30).unwrap()).with_blur(true);
        let image = OptimizedImage::new("/p/1.jpg", SIZE, options);
        assert_eq!(image.fetch_request().unwrap().locator, "/p/1.jpg?q=30&blur=10");
    }
}
