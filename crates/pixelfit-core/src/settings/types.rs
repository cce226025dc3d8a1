//! Settings value types shared by the reconciler, the encoder and the session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quality used for a freshly loaded image.
pub const DEFAULT_QUALITY: f32 = 0.8;

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "JPEG")]
    Jpeg,
    #[serde(rename = "PNG")]
    Png,
    #[serde(rename = "WebP")]
    WebP,
}

impl OutputFormat {
    /// Lower-case file extension, e.g. `"jpeg"`.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    /// MIME type handed to the download collaborator.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// Parse the UI label (`"JPEG"`, `"PNG"`, `"WebP"`), ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::WebP => "WebP",
        })
    }
}

/// Immutable facts about a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    /// Original width in pixels.
    pub width: u32,
    /// Original height in pixels.
    pub height: u32,
    /// Size of the source file in bytes.
    pub byte_size: u64,
}

impl ImageDescriptor {
    pub fn new(width: u32, height: u32, byte_size: u64) -> Self {
        Self {
            width,
            height,
            byte_size,
        }
    }

    /// `width / height`, or `None` when either side is zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(self.width as f64 / self.height as f64)
    }

    /// Source size in KB (1 KB = 1024 bytes).
    pub fn byte_size_kb(&self) -> f64 {
        self.byte_size as f64 / 1024.0
    }
}

/// Fully resolved resize settings for one image.
///
/// This is a plain value: the reconciler takes it by copy and returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeSettings {
    /// Target width in pixels (always >= 1 once reconciled).
    pub width: u32,
    /// Target height in pixels (always >= 1 once reconciled).
    pub height: u32,
    /// Keep `width / height` equal to the original aspect ratio.
    pub is_locked: bool,
    /// `round(width / original_width * 100)`.
    pub percentage: u32,
    /// Output format.
    pub format: OutputFormat,
    /// Encoder quality in `[0, 1]`. Ignored by lossless encoders.
    pub quality: f32,
    /// Desired output size in KB. Enables the target-size search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_size: Option<f64>,
}

impl ResizeSettings {
    /// Settings for a freshly loaded image: original size, locked, 100%, JPEG at 0.8.
    pub fn for_image(image: &ImageDescriptor) -> Self {
        Self {
            width: image.width.max(1),
            height: image.height.max(1),
            is_locked: true,
            percentage: 100,
            format: OutputFormat::Jpeg,
            quality: DEFAULT_QUALITY,
            target_size: None,
        }
    }

    /// The target size in bytes, if a usable one is set.
    pub fn target_bytes(&self) -> Option<usize> {
        self.target_size
            .filter(|kb| kb.is_finite() && *kb > 0.0)
            .map(|kb| (kb * 1024.0).floor() as usize)
    }
}

/// A single user edit. Exactly one field drives each reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum SettingsEdit {
    Width(u32),
    Height(u32),
    Percentage(u32),
    LockToggle(bool),
    /// `None`, or any non-positive/non-finite size, clears the target.
    TargetSize(Option<f64>),
    Format(OutputFormat),
    Quality(f32),
}

impl SettingsEdit {
    /// Whether the edit can change width or height.
    pub fn affects_dimensions(&self) -> bool {
        !matches!(self, SettingsEdit::Format(_) | SettingsEdit::Quality(_))
    }
}
