//! Image encoding pipeline for pixelfit.
//!
//! This module provides functionality for:
//! - Encoding RGB pixels to JPEG, PNG or WebP
//! - Resizing to the resolved settings and encoding in one call
//! - Searching encoder quality for output that fits a target byte size
//!
//! # Architecture
//!
//! `EncodingEngine` owns the resize + search logic and reaches the codecs only
//! through the `FormatEncoder` trait. All operations are synchronous; within a
//! search, encodes run strictly one after another.
//!
//! # Examples
//!
//! ```ignore
//! use pixelfit_core::encode::EncodingEngine;
//!
//! let engine = EncodingEngine::new();
//! let result = engine.encode(&decoded, &settings).unwrap();
//! if let Some(over) = result.shortfall() {
//!     println!("target missed by {} bytes", over);
//! }
//! ```

mod codec;
mod engine;

pub use codec::{
    encode_jpeg, encode_png, encode_webp, encoder_quality, DefaultEncoder, EncodeError,
    FormatEncoder,
};
pub use engine::{
    EncodeConfig, EncodeOutcome, EncodeResult, EncodingEngine, QualityAttempt,
    DEFAULT_FALLBACK_QUALITY, DEFAULT_MAX_PIXELS, DEFAULT_SEARCH_ITERATIONS,
};
