//! Resize settings and editing session bindings.
//!
//! Settings cross the boundary as plain objects in camelCase:
//!
//! ```typescript
//! import { JsResizeSession, describe_image, decode_image } from '@pixelfit/wasm';
//!
//! const session = new JsResizeSession(describe_image(bytes));
//! let settings = session.apply_patch({ width: 800 });      // height follows
//! settings = session.apply_patch({ targetSize: 150 });     // KB
//!
//! const result = session.encode(decode_image(bytes));
//! download(result.bytes(), session.output_filename(file.name));
//! ```

use crate::encode::{config_from_js, warn_if_missed, JsEncodeResult};
use crate::types::JsDecodedImage;
use pixelfit_core::encode::EncodingEngine;
use pixelfit_core::export::output_filename;
use pixelfit_core::session::{EditSession, EncodeStatus};
use pixelfit_core::settings::{reconcile_patch, ImageDescriptor, ResizeSettings, SettingsPatch};
use wasm_bindgen::prelude::*;

fn parse<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Editing session for one loaded image.
///
/// Holds the current settings and the last encode made for them. Any settings
/// change drops that encode.
#[wasm_bindgen]
pub struct JsResizeSession {
    session: EditSession,
    engine: EncodingEngine,
}

#[wasm_bindgen]
impl JsResizeSession {
    /// Start a session from an image descriptor (`{ width, height, byteSize }`)
    /// and an optional engine config.
    #[wasm_bindgen(constructor)]
    pub fn new(descriptor: JsValue, config: JsValue) -> Result<JsResizeSession, JsValue> {
        let descriptor: ImageDescriptor = parse(descriptor, "image descriptor")?;
        Ok(Self {
            session: EditSession::new(descriptor),
            engine: EncodingEngine::with_config(config_from_js(config)?),
        })
    }

    /// Current settings as a plain object.
    pub fn settings(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.settings())
    }

    /// Apply a partial update (`{ width: 800 }`, `{ isLocked: false }`, ...)
    /// and return the reconciled settings.
    pub fn apply_patch(&mut self, patch: JsValue) -> Result<JsValue, JsValue> {
        let patch: SettingsPatch = parse(patch, "settings patch")?;
        to_js(&self.session.apply_patch(&patch))
    }

    /// Bumped on every settings change.
    #[wasm_bindgen(getter)]
    pub fn revision(&self) -> f64 {
        self.session.revision() as f64
    }

    /// True when there is no encode for the current settings.
    #[wasm_bindgen(getter)]
    pub fn is_stale(&self) -> bool {
        self.session.is_stale()
    }

    /// Encode `image` with the current settings and cache the result.
    ///
    /// A missed target is logged to the console and still returned.
    pub fn encode(&mut self, image: &JsDecodedImage) -> Result<JsEncodeResult, JsValue> {
        match self.session.encode_with(&self.engine, image.as_decoded()) {
            EncodeStatus::Failed(e) => return Err(JsValue::from_str(&e.to_string())),
            EncodeStatus::Superseded => {
                return Err(JsValue::from_str("Encode superseded by a settings change"))
            }
            EncodeStatus::Ready { .. } | EncodeStatus::TargetMissed { .. } => {}
        }

        let result = self
            .session
            .result()
            .cloned()
            .ok_or_else(|| JsValue::from_str("No encode result"))?;
        warn_if_missed(&result);
        Ok(JsEncodeResult::from_result(result))
    }

    /// Bytes of the cached encode, if it is current.
    pub fn result_bytes(&self) -> Option<js_sys::Uint8Array> {
        self.session
            .result()
            .map(|result| js_sys::Uint8Array::from(result.bytes.as_slice()))
    }

    /// Size of the cached encode, if it is current.
    #[wasm_bindgen(getter)]
    pub fn result_size(&self) -> Option<usize> {
        self.session.result().map(|result| result.size())
    }

    /// Bytes the cached encode is over an unreachable target.
    #[wasm_bindgen(getter)]
    pub fn target_shortfall(&self) -> Option<usize> {
        self.session.target_shortfall()
    }

    /// Download name for the current output format.
    pub fn output_filename(&self, original: &str) -> String {
        output_filename(original, self.session.settings().format)
    }
}

/// Reconcile a partial update against explicit settings, without a session.
///
/// # Arguments
///
/// * `current` - Resolved settings object
/// * `image` - Image descriptor (`{ width, height, byteSize }`)
/// * `patch` - Partial update
#[wasm_bindgen]
pub fn reconcile_settings(
    current: JsValue,
    image: JsValue,
    patch: JsValue,
) -> Result<JsValue, JsValue> {
    let current: ResizeSettings = parse(current, "settings")?;
    let image: ImageDescriptor = parse(image, "image descriptor")?;
    let patch: SettingsPatch = parse(patch, "settings patch")?;
    to_js(&reconcile_patch(current, &image, &patch))
}

/// Default settings for a freshly loaded image.
#[wasm_bindgen]
pub fn initial_settings(image: JsValue) -> Result<JsValue, JsValue> {
    let image: ImageDescriptor = parse(image, "image descriptor")?;
    to_js(&ResizeSettings::for_image(&image))
}
