//! Checks and prepares user supplied images before upload.
//!
//! Uploads are restricted to JPEG, PNG and WebP up to [MAX_UPLOAD_BYTES].
//! Accepted images are downscaled to fit a square box and re-encoded as JPEG.

use ::image::codecs::jpeg::JpegEncoder;
use ::image::imageops::FilterType;
use ::image::GenericImageView;

use crate::error::{ImageError, ImageResult};

/// Content types accepted for upload.
pub const ACCEPTED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Largest accepted upload in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Default edge length of the box uploads are downscaled into.
pub const MAX_DIMENSION: u32 = 1200;

/// JPEG quality used when re-encoding uploads.
pub const UPLOAD_JPEG_QUALITY: u8 = 80;

/// Check the content type and size of an upload.
pub fn validate_upload(mime: &str, size: u64) -> ImageResult<()> {
    validate_upload_with_limit(mime, size, MAX_UPLOAD_BYTES)
}

/// Like [validate_upload] with a custom size limit.
pub fn validate_upload_with_limit(mime: &str, size: u64, max: u64) -> ImageResult<()> {
    let mime = mime.trim().to_ascii_lowercase();
    if !ACCEPTED_TYPES.contains(&mime.as_str()) {
        return Err(ImageError::unsupported(mime));
    }
    if size > max {
        return Err(ImageError::TooLarge { size, max });
    }
    Ok(())
}

/// Check an upload by sniffing its content type from the bytes.
pub fn validate_upload_bytes(bytes: &[u8]) -> ImageResult<()> {
    validate_upload_bytes_with_limit(bytes, MAX_UPLOAD_BYTES)
}

/// Like [validate_upload_bytes] with a custom size limit.
pub fn validate_upload_bytes_with_limit(bytes: &[u8], max: u64) -> ImageResult<()> {
    let format = ::image::guess_format(bytes).map_err(|_| ImageError::unsupported("application/octet-stream"))?;
    validate_upload_with_limit(format.to_mime_type(), bytes.len() as u64, max)
}

/// Scale `width` x `height` down to fit a `max` x `max` box, keeping the aspect ratio.
///
/// Images that already fit are returned unchanged, and a `max` of zero means
/// no limit. Neither edge drops below one pixel.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if max == 0 || (width <= max && height <= max) {
        return (width, height);
    }
    let ratio = f64::min(f64::from(max) / f64::from(width), f64::from(max) / f64::from(height));
    let scaled = |edge: u32| ((f64::from(edge) * ratio).round() as u32).clamp(1, max);
    (scaled(width), scaled(height))
}

/// Validate, downscale and re-encode an upload as JPEG.
pub fn optimize_upload(bytes: &[u8], max_dimension: u32) -> ImageResult<Vec<u8>> {
    optimize_upload_with_limit(bytes, max_dimension, MAX_UPLOAD_BYTES)
}

/// Like [optimize_upload] with a custom size limit for the input.
pub fn optimize_upload_with_limit(bytes: &[u8], max_dimension: u32, max_bytes: u64) -> ImageResult<Vec<u8>> {
    validate_upload_bytes_with_limit(bytes, max_bytes)?;

    let decoded = ::image::load_from_memory(bytes)?;
    let (width, height) = decoded.dimensions();
    let (target_width, target_height) = fit_within(width, height, max_dimension);

    let resized = if (target_width, target_height) == (width, height) {
        decoded
    } else {
        log::debug!("Downscaling upload from {}x{} to {}x{}", width, height, target_width, target_height);
        decoded.resize_exact(target_width, target_height, FilterType::Lanczos3)
    };

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, UPLOAD_JPEG_QUALITY).encode_image(&resized.to_rgb8())?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ::image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 20, 20])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload("image/jpeg", 1024).is_ok());
        assert!(validate_upload("IMAGE/PNG", MAX_UPLOAD_BYTES).is_ok());
        assert!(matches!(
            validate_upload("image/gif", 10),
            Err(ImageError::UnsupportedFormat { mime }) if mime == "image/gif"
        ));
        assert!(matches!(
            validate_upload("image/webp", MAX_UPLOAD_BYTES + 1),
            Err(ImageError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within(800, 600, 1200), (800, 600));
        assert_eq!(fit_within(2400, 600, 1200), (1200, 300));
        assert_eq!(fit_within(600, 2400, 1200), (300, 1200));
        assert_eq!(fit_within(5000, 1, 1200), (1200, 1));
    }

    #[test]
    fn test_zero_box_means_unlimited() {
        assert_eq!(fit_within(2400, 600, 0), (2400, 600));

        let out = optimize_upload(&png(40, 10), 0).unwrap();
        assert_eq!(::image::load_from_memory(&out).unwrap().dimensions(), (40, 10));
    }

    #[test]
    fn test_custom_size_limit() {
        let bytes = png(8, 8);
        let size = bytes.len() as u64;
        assert!(validate_upload_bytes_with_limit(&bytes, size).is_ok());
        assert!(matches!(
            optimize_upload_with_limit(&bytes, 100, size - 1),
            Err(ImageError::TooLarge { max, .. }) if max == size - 1
        ));
    }

    #[test]
    fn test_optimize_upload_downscales_to_jpeg() {
        let out = optimize_upload(&png(400, 100), 100).unwrap();
        assert_eq!(::image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
        let decoded = ::image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.dimensions(), (100, 25));
    }

    #[test]
    fn test_optimize_upload_rejects_unknown_bytes() {
        assert!(matches!(
            optimize_upload(b"definitely not an image", 100),
            Err(ImageError::UnsupportedFormat { .. })
        ));
    }
}
