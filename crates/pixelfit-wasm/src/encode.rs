//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_image`] - Resize and encode an image per resize settings,
//!   searching quality when a target size is set
//! - [`JsEncodeResult`] - Encoded bytes plus how they relate to the target
//!
//! # Example
//!
//! ```typescript
//! import { encode_image } from '@pixelfit/wasm';
//!
//! const result = encode_image(image, settings);
//! const blob = new Blob([result.bytes()], { type: result.mime_type });
//! if (!result.target_met) {
//!   console.log(`Smallest output is ${result.shortfall} bytes over target`);
//! }
//! ```

use crate::types::JsDecodedImage;
use pixelfit_core::encode::{EncodeConfig, EncodeResult, EncodingEngine};
use pixelfit_core::settings::ResizeSettings;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// An encoded image handed back to JavaScript.
#[wasm_bindgen]
pub struct JsEncodeResult {
    inner: EncodeResult,
}

/// Plain-object view of a result, without the bytes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EncodeSummary {
    size: usize,
    quality: f32,
    width: u32,
    height: u32,
    format: String,
    target_met: bool,
    shortfall: Option<usize>,
    attempts: usize,
}

#[wasm_bindgen]
impl JsEncodeResult {
    /// Encoded bytes as Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// Encoded size in bytes
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Quality (0.0 to 1.0) the bytes were encoded at
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.inner.quality
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// "JPEG", "PNG" or "WebP"
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.format.mime_type().to_string()
    }

    /// False only when a target size was set and nothing fit it
    #[wasm_bindgen(getter)]
    pub fn target_met(&self) -> bool {
        self.inner.target_met()
    }

    /// Bytes over target when the target was unreachable
    #[wasm_bindgen(getter)]
    pub fn shortfall(&self) -> Option<usize> {
        self.inner.shortfall()
    }

    /// Everything except the bytes, as a plain object.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.summary_data())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsEncodeResult {
    pub(crate) fn from_result(inner: EncodeResult) -> Self {
        Self { inner }
    }

    fn summary_data(&self) -> EncodeSummary {
        EncodeSummary {
            size: self.inner.size(),
            quality: self.inner.quality,
            width: self.inner.width,
            height: self.inner.height,
            format: self.inner.format.to_string(),
            target_met: self.inner.target_met(),
            shortfall: self.inner.shortfall(),
            attempts: self.inner.attempts.len(),
        }
    }
}

/// Parse an optional engine config; `undefined`/`null` gives the defaults.
pub(crate) fn config_from_js(config: JsValue) -> Result<EncodeConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(EncodeConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid encode config: {}", e)))
}

/// Log a console warning when a result missed its target.
pub(crate) fn warn_if_missed(result: &EncodeResult) {
    if let Some(over) = result.shortfall() {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Target size unreachable: output is {} bytes ({} over target)",
            result.size(),
            over
        )));
    }
}

/// Resize and encode an image according to resize settings.
///
/// # Arguments
///
/// * `image` - The full-resolution source image
/// * `settings` - A resolved settings object (`width`, `height`, `format`,
///   `quality`, `targetSize`, ...)
/// * `config` - Optional engine config (`searchIterations`,
///   `fallbackQuality`, `searchWebp`, `filter`, `maxPixels`)
///
/// # Errors
///
/// Returns an error if the settings cannot be parsed, the output surface is
/// larger than `maxPixels`, or encoding fails. An
/// unreachable target is not an error; check `target_met` on the result.
#[wasm_bindgen]
pub fn encode_image(
    image: &JsDecodedImage,
    settings: JsValue,
    config: JsValue,
) -> Result<JsEncodeResult, JsValue> {
    let settings: ResizeSettings = serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;
    let engine = EncodingEngine::with_config(config_from_js(config)?);

    let result = engine
        .encode(image.as_decoded(), &settings)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    warn_if_missed(&result);
    Ok(JsEncodeResult::from_result(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelfit_core::encode::EncodeOutcome;
    use pixelfit_core::settings::OutputFormat;

    fn result(size: usize, outcome: EncodeOutcome) -> JsEncodeResult {
        JsEncodeResult::from_result(EncodeResult {
            bytes: vec![0u8; size],
            quality: 0.1,
            width: 40,
            height: 30,
            format: OutputFormat::Jpeg,
            outcome,
            attempts: Vec::new(),
        })
    }

    #[test]
    fn test_result_getters() {
        let res = result(2048, EncodeOutcome::TargetMet { target_bytes: 4096 });
        assert_eq!(res.size(), 2048);
        assert_eq!(res.format(), "JPEG");
        assert_eq!(res.mime_type(), "image/jpeg");
        assert!(res.target_met());
        assert_eq!(res.shortfall(), None);
    }

    #[test]
    fn test_unreachable_summary() {
        let res = result(
            3000,
            EncodeOutcome::TargetUnreachable { target_bytes: 1024 },
        );
        let summary = res.summary_data();
        assert!(!summary.target_met);
        assert_eq!(summary.shortfall, Some(1976));
        assert_eq!((summary.width, summary.height), (40, 30));
    }
}
