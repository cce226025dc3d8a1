//! Resize settings and their reconciliation.
//!
//! This module provides:
//! - `ResizeSettings`, the resolved per-image settings value
//! - `ImageDescriptor`, the immutable facts about the loaded image
//! - `SettingsEdit` / `SettingsPatch`, the shapes user edits arrive in
//! - `reconcile`, which turns settings + one edit into new consistent settings
//!
//! # Examples
//!
//! ```ignore
//! use pixelfit_core::settings::{reconcile, ImageDescriptor, ResizeSettings, SettingsEdit};
//!
//! let image = ImageDescriptor::new(1000, 500, 512_000);
//! let settings = ResizeSettings::for_image(&image);
//! let settings = reconcile(settings, &image, SettingsEdit::Width(400));
//! assert_eq!(settings.height, 200);
//! ```

mod patch;
mod reconcile;
mod types;

pub use patch::{reconcile_patch, SettingsPatch};
pub use reconcile::{
    derived_percentage, reconcile, MAX_DIMENSION, MAX_PERCENTAGE, MIN_PERCENTAGE,
};
pub use types::{ImageDescriptor, OutputFormat, ResizeSettings, SettingsEdit, DEFAULT_QUALITY};
