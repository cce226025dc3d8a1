//! Single-pass resampling used before every encode.
//!
//! The source image is never modified; every call returns a new `DecodedImage`.

use super::{DecodeError, DecodedImage, FilterType};
use crate::settings::MAX_DIMENSION;

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero-sized target,
/// `DecodeError::SurfaceTooLarge` when either side exceeds `MAX_DIMENSION` or
/// the buffer size overflows `usize`, and `DecodeError::CorruptedFile` if the
/// source buffer does not match its dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    if !surface_fits(width, height) {
        return Err(DecodeError::SurfaceTooLarge { width, height });
    }

    let source = image.as_rgb_view().ok_or_else(|| {
        DecodeError::CorruptedFile(format!(
            "pixel buffer holds {} bytes, expected {} for {}x{}",
            image.pixels.len(),
            image.expected_len(),
            image.width,
            image.height
        ))
    })?;

    // Same size: copy into a fresh buffer rather than resampling
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let resized = image::imageops::resize(&source, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Whether a `width`x`height` RGB buffer is within `MAX_DIMENSION` and its
/// byte length is addressable.
pub(crate) fn surface_fits(width: u32, height: u32) -> bool {
    width <= MAX_DIMENSION
        && height <= MAX_DIMENSION
        && (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(3))
            .is_some()
}
