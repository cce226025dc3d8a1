//! WASM-compatible wrapper types for image data.
//!
//! These wrap the core Pixelfit types and handle the conversion between Rust
//! and JavaScript data representations.

use pixelfit_core::decode::{DecodedImage, FilterType};
use pixelfit_core::settings::OutputFormat;
use wasm_bindgen::prelude::*;

/// A decoded RGB image held in WASM memory.
///
/// # Memory Management
///
/// `pixels()` copies the buffer out to a JavaScript `Uint8Array`. Keep the
/// image in WASM memory between resize/encode calls and only extract pixels
/// when a canvas needs them.
#[wasm_bindgen]
pub struct JsDecodedImage {
    inner: DecodedImage,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and RGB pixel data (3 bytes per pixel,
    /// row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            inner: DecodedImage {
                width,
                height,
                pixels,
            },
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Length of the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer also releases it.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(inner: DecodedImage) -> Self {
        Self { inner }
    }

    /// The wrapped image, for passing to core functions without a copy.
    pub(crate) fn as_decoded(&self) -> &DecodedImage {
        &self.inner
    }
}

/// Convert a u8 filter value to the core FilterType.
///
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3. Anything else is Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Parse a format label ("JPEG", "png", "WebP", ...).
pub(crate) fn format_from_str(label: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_label(label).ok_or_else(|| format!("Unsupported format: {}", label))
}
