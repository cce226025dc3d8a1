//! File naming and size display bindings.

use crate::types::format_from_str;
use pixelfit_core::export;
use wasm_bindgen::prelude::*;

/// Download name for a resized copy, e.g. `photo.jpg` -> `photo_resized.webp`.
///
/// # Errors
///
/// Returns an error if `format` is not JPEG, PNG or WebP.
#[wasm_bindgen]
pub fn output_filename(original: &str, format: &str) -> Result<String, JsValue> {
    let format = format_from_str(format).map_err(|e| JsValue::from_str(&e))?;
    Ok(export::output_filename(original, format))
}

/// Human-readable size, e.g. `1536` -> `"1.5 KB"`.
#[wasm_bindgen]
pub fn format_bytes(bytes: f64, decimals: u32) -> String {
    export::format_bytes(bytes.max(0.0) as u64, decimals as usize)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_output_filename() {
        assert_eq!(
            output_filename("photo.jpg", "WebP").unwrap(),
            "photo_resized.webp"
        );
    }

    #[wasm_bindgen_test]
    fn test_output_filename_bad_format() {
        assert!(output_filename("photo.jpg", "gif").is_err());
    }
}
