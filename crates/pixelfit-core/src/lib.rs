//! Pixelfit Core - Image resize and target-size encoding library
//!
//! This crate provides the core functionality for Pixelfit: reconciling
//! interdependent resize settings, resampling decoded pixels, and encoding
//! JPEG/PNG/WebP output, optionally searching quality to fit a byte budget.

pub mod decode;
pub mod encode;
pub mod export;
pub mod session;
pub mod settings;

pub use decode::{DecodedImage, FilterType};
pub use encode::{EncodeConfig, EncodeOutcome, EncodeResult, EncodingEngine};
pub use export::{format_bytes, output_filename};
pub use session::{EditSession, EncodeStatus, EncodeTicket};
pub use settings::{
    reconcile, ImageDescriptor, OutputFormat, ResizeSettings, SettingsEdit, SettingsPatch,
};
