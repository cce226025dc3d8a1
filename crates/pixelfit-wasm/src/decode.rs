//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG/PNG/WebP bytes with EXIF orientation applied
//! - [`describe_image`] - Read dimensions and byte size without decoding pixels
//! - [`resize`] - Resize an image to exact dimensions
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, describe_image } from '@pixelfit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const info = describe_image(bytes); // { width, height, byteSize }
//! const image = decode_image(bytes);
//! ```

use crate::types::{filter_from_u8, JsDecodedImage};
use pixelfit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes.
///
/// The format is detected from the content. EXIF orientation is applied so the
/// pixels match what a browser displays.
///
/// # Errors
///
/// Returns an error if the format is not recognised or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Describe an image as `{ width, height, byteSize }`.
///
/// Dimensions are post-orientation, matching [`decode_image`].
#[wasm_bindgen]
pub fn describe_image(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let descriptor = decode::describe(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&descriptor).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to exact dimensions.
///
/// `filter`: 0=Nearest, 1=Bilinear (default), 2=Lanczos3.
///
/// # Errors
///
/// Returns an error if width or height is zero or larger than the drawable
/// surface.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    let filter_type = filter_from_u8(filter);

    decode::resize(image.as_decoded(), width, height, filter_type)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
