use thiserror::Error;

/// Errors that can occur while transforming, validating or re-encoding images.
#[derive(Error, Debug)]
pub enum ImageError {
    /// The image source was empty or only whitespace.
    #[error("Image source is empty")]
    EmptySource,

    /// The image source could not be understood as a locator.
    #[error("Malformed image source '{locator}': {reason}")]
    MalformedSource {
        /// The offending source.
        locator: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Quality outside of `1..=100`.
    #[error("Image quality must be between 1 and 100, got {0}")]
    InvalidQuality(u32),

    /// Upload with a content type that is not accepted.
    #[error("Unsupported image type '{mime}', expected JPEG, PNG or WebP")]
    UnsupportedFormat {
        /// The rejected content type.
        mime: String,
    },

    /// Upload larger than the accepted size.
    #[error("Image is {size} bytes, the limit is {max} bytes")]
    TooLarge {
        /// Size of the upload.
        size: u64,
        /// Largest accepted size.
        max: u64,
    },

    /// Decoding or encoding failed.
    #[error("Image codec error: {0}")]
    Codec(#[from] ::image::ImageError),
}

impl ImageError {
    /// Create a new malformed source error.
    pub fn malformed(locator: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedSource {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new unsupported format error.
    pub fn unsupported(mime: impl Into<String>) -> Self {
        Self::UnsupportedFormat { mime: mime.into() }
    }
}

/// Result type for image operations.
pub type ImageResult<T> = Result<T, ImageError>;
