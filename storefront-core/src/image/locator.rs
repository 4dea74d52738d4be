use std::fmt;

use url::form_urlencoded;
use url::{ParseError, Url};

use crate::error::{ImageError, ImageResult};

/// Blur strength requested for blurred previews.
pub const BLUR_INTENSITY: u8 = 10;

const QUALITY_PARAM: &str = "q";
const BLUR_PARAM: &str = "blur";

/// Encoding quality of a requested image variant, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    /// Lowest accepted quality.
    pub const MIN: Quality = Quality(1);
    /// Highest accepted quality.
    pub const MAX: Quality = Quality(100);
    /// Quality used when none is given.
    pub const DEFAULT: Quality = Quality(75);

    /// Create a quality, rejecting values outside of `1..=100`.
    pub fn new(value: u32) -> ImageResult<Self> {
        if (u32::from(Self::MIN.0)..=u32::from(Self::MAX.0)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ImageError::InvalidQuality(value))
        }
    }

    /// The quality as a plain number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variant parameters applied by [optimize_locator].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformOptions {
    /// Requested quality.
    pub quality: Quality,
    /// Request a blurred variant.
    pub blur: bool,
}

impl TransformOptions {
    /// Options with the given quality and no blur.
    pub fn new(quality: Quality) -> Self {
        Self {
            quality,
            blur: false,
        }
    }

    /// Enable or disable the blurred variant.
    #[must_use]
    pub fn with_blur(mut self, blur: bool) -> Self {
        self.blur = blur;
        self
    }
}

/// Derive the locator of an image variant from `source`.
///
/// Sets `q` and, when blur is requested, `blur`. Existing parameters with the
/// same key are overwritten in place and duplicates are dropped; all other
/// parameters keep their order. Applying the same options twice yields the
/// same locator.
///
/// Absolute URLs and relative locators (`/images/a.jpg`, `a.jpg?v=2`) are
/// accepted. Empty sources and sources that are not a valid URL reference fail.
pub fn optimize_locator(source: &str, options: TransformOptions) -> ImageResult<String> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(ImageError::EmptySource);
    }

    match Url::parse(trimmed) {
        Ok(mut url) => {
            if url.cannot_be_a_base() {
                return Err(ImageError::malformed(source, "not a hierarchical URL"));
            }
            let pairs = url.query_pairs().into_owned().collect();
            let query = encode_query(apply_options(pairs, options));
            url.set_query(Some(&query));
            Ok(url.into())
        },
        Err(ParseError::RelativeUrlWithoutBase) => optimize_relative(source, trimmed, options),
        Err(e) => Err(ImageError::malformed(source, e)),
    }
}

fn optimize_relative(source: &str, trimmed: &str, options: TransformOptions) -> ImageResult<String> {
    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ImageError::malformed(source, "relative locator contains whitespace"));
    }
    // Resolving against a throwaway base rejects references a browser would reject too.
    let base = Url::parse("http://localhost/").map_err(|e| ImageError::malformed(source, e))?;
    base.join(trimmed).map_err(|e| ImageError::malformed(source, e))?;

    let (rest, fragment) = match trimmed.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (trimmed, None),
    };
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

    let pairs = form_urlencoded::parse(query.as_bytes()).into_owned().collect();
    let mut locator = format!("{}?{}", path, encode_query(apply_options(pairs, options)));
    if let Some(fragment) = fragment {
        locator.push('#');
        locator.push_str(fragment);
    }
    Ok(locator)
}

fn apply_options(mut pairs: Vec<(String, String)>, options: TransformOptions) -> Vec<(String, String)> {
    set_param(&mut pairs, QUALITY_PARAM, options.quality.to_string());
    if options.blur {
        set_param(&mut pairs, BLUR_PARAM, BLUR_INTENSITY.to_string());
    }
    pairs
}

/// Replace the first `key` entry with `value` and drop later ones, or append.
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: String) {
    let mut found = false;
    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        if found {
            return false;
        }
        found = true;
        v.clone_from(&value);
        true
    });
    if !found {
        pairs.push((key.to_string(), value));
    }
}

fn encode_query(pairs: Vec<(String, String)>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(quality: u32, blur: bool) -> TransformOptions {
        TransformOptions::new(Quality::new(quality).unwrap()).with_blur(blur)
    }

    #[test]
    fn test_absolute_with_blur() {
        assert_eq!(
            optimize_locator("https://x/img.jpg", options(50, true)).unwrap(),
            "https://x/img.jpg?q=50&blur=10"
        );
    }

    #[test]
    fn test_default_quality_without_blur() {
        assert_eq!(
            optimize_locator("https://cdn.example.com/p/1.png", TransformOptions::default()).unwrap(),
            "https://cdn.example.com/p/1.png?q=75"
        );
    }

    #[test]
    fn test_existing_params_are_overwritten_not_duplicated() {
        let locator = optimize_locator("https://x/img.jpg?w=300&q=10&blur=2&q=20", options(60, true)).unwrap();
        assert_eq!(locator, "https://x/img.jpg?w=300&q=60&blur=10");
    }

    #[test]
    fn test_without_blur_keeps_existing_blur() {
        let locator = optimize_locator("https://x/img.jpg?blur=3", options(40, false)).unwrap();
        assert_eq!(locator, "https://x/img.jpg?blur=3&q=40");
    }

    #[test]
    fn test_idempotent() {
        let sources = [
            "https://x/img.jpg",
            "https://x/img.jpg?w=300&h=200#top",
            "http://x:8080/a%20b.png?tag=a+b",
            "/images/product.webp",
            "thumbs/a.jpg?v=2#frag",
        ];
        for source in sources {
            for (quality, blur) in [(1, false), (75, true), (100, true)] {
                let once = optimize_locator(source, options(quality, blur)).unwrap();
                let twice = optimize_locator(&once, options(quality, blur)).unwrap();
                assert_eq!(once, twice, "not idempotent for {source}");
            }
        }
    }

    #[test]
    fn test_relative_locators() {
        assert_eq!(
            optimize_locator("/images/a.jpg", options(80, false)).unwrap(),
            "/images/a.jpg?q=80"
        );
        assert_eq!(
            optimize_locator("a.jpg?v=2#frag", options(80, true)).unwrap(),
            "a.jpg?v=2&q=80&blur=10#frag"
        );
    }

    #[test]
    fn test_fragment_stays_after_query() {
        assert_eq!(
            optimize_locator("https://x/img.jpg#zoom", options(50, false)).unwrap(),
            "https://x/img.jpg?q=50#zoom"
        );
    }

    #[test]
    fn test_empty_source_fails() {
        assert!(matches!(optimize_locator("", TransformOptions::default()), Err(ImageError::EmptySource)));
        assert!(matches!(optimize_locator("   ", TransformOptions::default()), Err(ImageError::EmptySource)));
    }

    #[test]
    fn test_malformed_source_fails() {
        for source in ["http://", "https://exa mple.com/a.jpg", "not a url", "mailto:someone@example.com"] {
            assert!(
                matches!(optimize_locator(source, TransformOptions::default()), Err(ImageError::MalformedSource { .. })),
                "{source} should be rejected"
            );
        }
    }

    #[test]
    fn test_quality_bounds() {
        assert!(matches!(Quality::new(0), Err(ImageError::InvalidQuality(0))));
        assert!(matches!(Quality::new(101), Err(ImageError::InvalidQuality(101))));
        assert_eq!(Quality::new(1).unwrap(), Quality::MIN);
        assert_eq!(Quality::new(100).unwrap(), Quality::MAX);
        assert_eq!(Quality::default().get(), 75);
    }
}
