//! Pixelfit WASM - WebAssembly bindings for Pixelfit
//!
//! This crate exposes the pixelfit-core functionality to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Decoding, describing and resizing images
//! - `settings` - Resize settings reconciliation and the editing session
//! - `encode` - Encoding with optional target-size search
//! - `export` - Output file naming and size display
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, describe_image, JsResizeSession } from '@pixelfit/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsResizeSession(describe_image(bytes));
//! session.apply_patch({ percentage: 50 });
//! const result = session.encode(decode_image(bytes));
//! console.log(`Encoded ${result.size} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod export;
mod settings;
mod types;

pub use decode::{decode_image, describe_image, resize};
pub use encode::{encode_image, JsEncodeResult};
pub use export::{format_bytes, output_filename};
pub use settings::{initial_settings, reconcile_settings, JsResizeSession};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
