//! Resize-and-encode with an optional target-size search.
//!
//! # Modes
//!
//! - **Direct**: resample once, encode once at `settings.quality`.
//! - **Target-size search**: resample once, then binary-search quality in
//!   `[0, 1]` for a fixed number of iterations, keeping the largest encoding
//!   that fits `target_size * 1024` bytes. When nothing fits, encode once at
//!   the fallback quality and report the real size.
//!
//! Each search step halves the quality interval, so 7 iterations resolve
//! quality to 1/128 with at most 7 encodes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{DefaultEncoder, EncodeError, FormatEncoder};
use crate::decode::{resize, surface_fits, DecodedImage, FilterType};
use crate::settings::{OutputFormat, ResizeSettings};

/// Iteration count of the quality search.
pub const DEFAULT_SEARCH_ITERATIONS: u32 = 7;
/// Quality used when no search candidate fits the target.
pub const DEFAULT_FALLBACK_QUALITY: f32 = 0.1;
/// Largest output, in pixels, the engine will allocate.
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodeConfig {
    /// Number of binary-search steps over quality.
    pub search_iterations: u32,
    /// Quality of the single encode made when the target is unreachable.
    pub fallback_quality: f32,
    /// Let WebP take part in the target-size search (JPEG always does).
    pub search_webp: bool,
    /// Resampling filter for the resize pass.
    pub filter: FilterType,
    /// Upper bound on `width * height` of the output surface.
    pub max_pixels: u64,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            search_iterations: DEFAULT_SEARCH_ITERATIONS,
            fallback_quality: DEFAULT_FALLBACK_QUALITY,
            search_webp: false,
            filter: FilterType::Bilinear,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// One encode made during a target-size search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityAttempt {
    pub quality: f32,
    pub size: usize,
    /// Whether `size` was within the target.
    pub fits: bool,
}

/// How an [`EncodeResult`] relates to the requested target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EncodeOutcome {
    /// Single encode at the configured quality; no target involved.
    Direct,
    /// The search found a quality whose output fits `target_bytes`.
    TargetMet { target_bytes: usize },
    /// Nothing fit; the result is the fallback encode and may be larger.
    TargetUnreachable { target_bytes: usize },
}

/// An encoded image. Superseded, never mutated, by the next encode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeResult {
    pub bytes: Vec<u8>,
    /// Quality the returned bytes were encoded at.
    pub quality: f32,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub outcome: EncodeOutcome,
    /// Search steps in order; empty in direct mode.
    pub attempts: Vec<QualityAttempt>,
}

impl EncodeResult {
    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// False only when a target was requested and missed.
    pub fn target_met(&self) -> bool {
        !matches!(self.outcome, EncodeOutcome::TargetUnreachable { .. })
    }

    /// Bytes over the target for an unreachable target.
    pub fn shortfall(&self) -> Option<usize> {
        match self.outcome {
            EncodeOutcome::TargetUnreachable { target_bytes } => {
                Some(self.size().saturating_sub(target_bytes))
            }
            _ => None,
        }
    }
}

/// Resizes and encodes images according to [`ResizeSettings`].
///
/// Holds no mutable state; one engine can serve any number of images.
#[derive(Debug, Clone, Default)]
pub struct EncodingEngine<E = DefaultEncoder> {
    config: EncodeConfig,
    encoder: E,
}

impl EncodingEngine<DefaultEncoder> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EncodeConfig) -> Self {
        Self::with_encoder(config, DefaultEncoder)
    }
}

impl<E: FormatEncoder> EncodingEngine<E> {
    pub fn with_encoder(config: EncodeConfig, encoder: E) -> Self {
        Self { config, encoder }
    }

    pub fn config(&self) -> &EncodeConfig {
        &self.config
    }

    /// The byte budget to search for, or `None` when direct mode applies.
    pub fn search_target(&self, settings: &ResizeSettings) -> Option<usize> {
        let target_bytes = settings.target_bytes()?;
        let searchable = self.encoder.supports_quality(settings.format)
            && (settings.format != OutputFormat::WebP || self.config.search_webp);
        searchable.then_some(target_bytes)
    }

    /// Resize `pixels` to the settings' dimensions and encode them.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::InvalidDimensions` for zero target dimensions,
    /// `EncodeError::SurfaceTooLarge` when the output would exceed
    /// `max_pixels` or the largest drawable surface (checked before anything
    /// is allocated), `EncodeError::ResizeFailed` if resampling fails, and whatever the
    /// encoder backend reports. A missed target is not an error; see
    /// [`EncodeOutcome::TargetUnreachable`].
    pub fn encode(
        &self,
        pixels: &DecodedImage,
        settings: &ResizeSettings,
    ) -> Result<EncodeResult, EncodeError> {
        if settings.width == 0 || settings.height == 0 {
            return Err(EncodeError::InvalidDimensions {
                width: settings.width,
                height: settings.height,
            });
        }
        let pixel_count = u64::from(settings.width) * u64::from(settings.height);
        if pixel_count > self.config.max_pixels || !surface_fits(settings.width, settings.height) {
            return Err(EncodeError::SurfaceTooLarge {
                width: settings.width,
                height: settings.height,
                max_pixels: self.config.max_pixels,
            });
        }

        let scaled = resize(pixels, settings.width, settings.height, self.config.filter)?;

        match self.search_target(settings) {
            Some(target_bytes) => self.search(&scaled, settings.format, target_bytes),
            None => {
                let bytes = self
                    .encoder
                    .encode(&scaled, settings.format, settings.quality)?;
                debug!(
                    format = %settings.format,
                    width = scaled.width,
                    height = scaled.height,
                    size = bytes.len(),
                    "direct encode"
                );
                Ok(self.result(
                    &scaled,
                    settings.format,
                    bytes,
                    settings.quality,
                    EncodeOutcome::Direct,
                    Vec::new(),
                ))
            }
        }
    }

    fn search(
        &self,
        scaled: &DecodedImage,
        format: OutputFormat,
        target_bytes: usize,
    ) -> Result<EncodeResult, EncodeError> {
        let mut min_quality = 0.0f32;
        let mut max_quality = 1.0f32;
        let mut best: Option<(f32, Vec<u8>)> = None;
        let mut attempts = Vec::with_capacity(self.config.search_iterations as usize);

        for iteration in 0..self.config.search_iterations {
            let quality = (min_quality + max_quality) / 2.0;
            let bytes = self.encoder.encode(scaled, format, quality)?;
            let fits = bytes.len() <= target_bytes;

            debug!(
                iteration,
                quality,
                size = bytes.len(),
                target_bytes,
                fits,
                "quality search step"
            );
            attempts.push(QualityAttempt {
                quality,
                size: bytes.len(),
                fits,
            });

            if fits {
                let larger = match &best {
                    Some((_, current)) => bytes.len() > current.len(),
                    None => true,
                };
                if larger {
                    best = Some((quality, bytes));
                }
                min_quality = quality;
            } else {
                max_quality = quality;
            }
        }

        if let Some((quality, bytes)) = best {
            return Ok(self.result(
                scaled,
                format,
                bytes,
                quality,
                EncodeOutcome::TargetMet { target_bytes },
                attempts,
            ));
        }

        let fallback = self.config.fallback_quality.clamp(0.0, 1.0);
        let bytes = self.encoder.encode(scaled, format, fallback)?;
        warn!(
            target_bytes,
            size = bytes.len(),
            fallback_quality = fallback,
            "no quality fits the target size, returning fallback encode"
        );
        Ok(self.result(
            scaled,
            format,
            bytes,
            fallback,
            EncodeOutcome::TargetUnreachable { target_bytes },
            attempts,
        ))
    }

    fn result(
        &self,
        scaled: &DecodedImage,
        format: OutputFormat,
        bytes: Vec<u8>,
        quality: f32,
        outcome: EncodeOutcome,
        attempts: Vec<QualityAttempt>,
    ) -> EncodeResult {
        EncodeResult {
            bytes,
            quality,
            width: scaled.width,
            height: scaled.height,
            format,
            outcome,
            attempts,
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
