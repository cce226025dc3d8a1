//! Decoded-image provider for pixelfit.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG and WebP files to upright RGB8 pixels
//! - Reading an `ImageDescriptor` (oriented dimensions + byte size)
//! - The single resampling pass the encoder runs before every encode
//!
//! # Architecture
//!
//! Decoding is kept apart from the settings and encode modules: those only
//! ever see a `DecodedImage` and an `ImageDescriptor`. All operations are
//! synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use pixelfit_core::decode::decode_with_descriptor;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let (descriptor, image) = decode_with_descriptor(&bytes).unwrap();
//! println!("{}x{}, {} bytes", descriptor.width, descriptor.height, descriptor.byte_size);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, decode_with_descriptor, describe, get_orientation};
pub(crate) use resize::surface_fits;
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
