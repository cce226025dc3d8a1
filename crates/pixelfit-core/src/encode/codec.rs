//! Per-format encoders.
//!
//! JPEG and PNG go through the `image` crate. WebP goes through libwebp (the
//! `webp` crate) when the `lossy-webp` feature is on, and through `image`'s
//! lossless encoder otherwise.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;
use thiserror::Error;

use crate::decode::{DecodeError, DecodedImage};
use crate::settings::OutputFormat;

/// Errors that can occur while producing an encoded image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The output surface exceeds the configured or addressable limit
    #[error("Surface too large: {width}x{height} exceeds the limit of {max_pixels} pixels")]
    SurfaceTooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    /// Resampling to the target size failed
    #[error("Resampling failed: {0}")]
    ResizeFailed(#[from] DecodeError),

    /// The encoder backend rejected the image
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },
}

/// Backend that turns RGB pixels into an encoded file.
///
/// The search engine only talks to this trait, so any encoder whose output
/// size grows with quality can drive the target-size search.
pub trait FormatEncoder {
    /// Encode `image` as `format` at `quality` in `[0, 1]`.
    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError>;

    /// Whether `quality` has any effect for `format`.
    fn supports_quality(&self, format: OutputFormat) -> bool;
}

/// The built-in encoder backed by `image` and libwebp.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEncoder;

impl FormatEncoder for DefaultEncoder {
    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        let quality = encoder_quality(quality);
        match format {
            OutputFormat::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, quality),
            OutputFormat::Png => encode_png(&image.pixels, image.width, image.height),
            OutputFormat::WebP => encode_webp(&image.pixels, image.width, image.height, quality),
        }
    }

    fn supports_quality(&self, format: OutputFormat) -> bool {
        match format {
            OutputFormat::Jpeg => true,
            OutputFormat::Png => false,
            OutputFormat::WebP => cfg!(feature = "lossy-webp"),
        }
    }
}

/// Map a `[0, 1]` quality onto the 1-100 scale the codecs take.
///
/// NaN maps to the lowest quality.
pub fn encoder_quality(quality: f32) -> u8 {
    let scaled = (quality.clamp(0.0, 1.0) * 100.0).round();
    if scaled.is_nan() {
        return 1;
    }
    (scaled as u8).clamp(1, 100)
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Jpeg,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

/// Encode RGB pixel data to (lossless) PNG bytes.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Png,
            message: e.to_string(),
        })?;

    Ok(buffer)
}

/// Encode RGB pixel data to lossy WebP bytes at `quality` (1-100).
#[cfg(feature = "lossy-webp")]
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;

    let memory = webp::Encoder::from_rgb(pixels, width, height)
        .encode_simple(false, quality.clamp(1, 100) as f32)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::WebP,
            message: format!("{e:?}"),
        })?;

    Ok(memory.to_vec())
}

/// Encode RGB pixel data to lossless WebP bytes. `quality` has no effect.
#[cfg(not(feature = "lossy-webp"))]
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    _quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    use image::codecs::webp::WebPEncoder;

    validate_rgb(pixels, width, height)?;

    let mut buffer = Vec::new();
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::WebP,
            message: e.to_string(),
        })?;

    Ok(buffer)
}

fn validate_rgb(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
