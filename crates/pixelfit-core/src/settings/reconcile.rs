//! Settings reconciliation.
//!
//! Keeps width, height, percentage, aspect lock and target size consistent
//! after a single [`SettingsEdit`]. The rules, by driving edit:
//!
//! | Edit          | Effect                                                        |
//! |---------------|---------------------------------------------------------------|
//! | `Width`       | set width; if locked, `height = round(width / aspect)`        |
//! | `Height`      | set height; if locked, `width = round(height * aspect)`       |
//! | `Percentage`  | scale both original dimensions by `percentage / 100`          |
//! | `LockToggle`  | on lock, snap height back onto the original aspect ratio      |
//! | `TargetSize`  | scale both dimensions by `sqrt(target_kb / original_kb)`      |
//!
//! After the first four, `percentage` is re-derived from width whenever a
//! dimension changed. A target-size edit sets percentage itself.
//!
//! Clamp policy (the reconciler never fails):
//! - zero width, height or percentage inputs become 1
//! - percentage inputs above [`MAX_PERCENTAGE`] become [`MAX_PERCENTAGE`]
//! - derived dimensions never drop below 1
//! - no dimension exceeds [`MAX_DIMENSION`]; when a locked or scaled result
//!   would, both sides shrink together so the aspect ratio survives
//! - a derived percentage never drops below [`MIN_PERCENTAGE`]
//! - without a usable aspect ratio the dependent dimension is left alone
//! - a non-finite or non-positive target size clears the target and keeps dimensions
//! - a NaN quality is ignored; other qualities are clamped to `[0, 1]`

use super::{ImageDescriptor, ResizeSettings, SettingsEdit};

/// Smallest percentage an edit can request.
pub const MIN_PERCENTAGE: u32 = 1;
/// Largest percentage an edit can request.
pub const MAX_PERCENTAGE: u32 = 1000;

/// Largest width or height the reconciler produces (the common browser
/// canvas limit).
pub const MAX_DIMENSION: u32 = 16_384;

/// Percentage reported when it cannot be derived from the original width.
const FALLBACK_PERCENTAGE: u32 = 100;

/// Apply one edit to `current` and return the resolved settings.
///
/// An edit whose (clamped) value equals the current one returns `current`
/// unchanged.
pub fn reconcile(
    current: ResizeSettings,
    image: &ImageDescriptor,
    edit: SettingsEdit,
) -> ResizeSettings {
    let mut next = current;

    match edit {
        SettingsEdit::Width(width) => {
            let width = width.clamp(1, MAX_DIMENSION);
            if width == current.width {
                return current;
            }
            next.width = width;
            if next.is_locked {
                if let Some(aspect) = image.aspect_ratio() {
                    (next.width, next.height) =
                        fit_dimensions(width as f64, width as f64 / aspect);
                }
            }
        }
        SettingsEdit::Height(height) => {
            let height = height.clamp(1, MAX_DIMENSION);
            if height == current.height {
                return current;
            }
            next.height = height;
            if next.is_locked {
                if let Some(aspect) = image.aspect_ratio() {
                    (next.width, next.height) =
                        fit_dimensions(height as f64 * aspect, height as f64);
                }
            }
        }
        SettingsEdit::Percentage(percentage) => {
            // An out-of-range percentage can only come from a target-size edit;
            // echoing it back must not rescale.
            if percentage == current.percentage {
                return current;
            }
            let percentage = percentage.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE);
            if percentage == current.percentage {
                return current;
            }
            let factor = percentage as f64 / 100.0;
            (next.width, next.height) =
                fit_dimensions(image.width as f64 * factor, image.height as f64 * factor);
            next.percentage = percentage;
        }
        SettingsEdit::LockToggle(locked) => {
            if locked == current.is_locked {
                return current;
            }
            next.is_locked = locked;
            if locked {
                if let Some(aspect) = image.aspect_ratio() {
                    (next.width, next.height) =
                        fit_dimensions(next.width as f64, next.width as f64 / aspect);
                }
            }
        }
        SettingsEdit::TargetSize(target) => return apply_target_size(current, image, target),
        SettingsEdit::Format(format) => {
            next.format = format;
            return next;
        }
        SettingsEdit::Quality(quality) => {
            if quality.is_nan() {
                return current;
            }
            next.quality = quality.clamp(0.0, 1.0);
            return next;
        }
    }

    if next.width != current.width || next.height != current.height {
        next.percentage = derived_percentage(next.width, image);
    }
    next
}

/// `round(width / original_width * 100)`, at least [`MIN_PERCENTAGE`], or 100
/// when that is not finite.
pub fn derived_percentage(width: u32, image: &ImageDescriptor) -> u32 {
    let percentage = (width as f64 / image.width as f64 * 100.0).round();
    if percentage.is_finite() {
        (percentage as u32).max(MIN_PERCENTAGE)
    } else {
        FALLBACK_PERCENTAGE
    }
}

fn apply_target_size(
    current: ResizeSettings,
    image: &ImageDescriptor,
    target: Option<f64>,
) -> ResizeSettings {
    let target = target.filter(|kb| kb.is_finite() && *kb > 0.0);
    if target == current.target_size {
        return current;
    }

    let mut next = current;
    next.target_size = target;

    let Some(target_kb) = target else {
        return next;
    };

    let size_ratio = (target_kb / image.byte_size_kb()).sqrt();
    if !size_ratio.is_finite() || size_ratio <= 0.0 {
        return next;
    }

    let width = image.width as f64 * size_ratio;
    let height = image.height as f64 * size_ratio;
    (next.width, next.height) = fit_dimensions(width, height);
    next.percentage = if width > MAX_DIMENSION as f64 || height > MAX_DIMENSION as f64 {
        derived_percentage(next.width, image)
    } else {
        ((size_ratio * 100.0).round() as u32).max(MIN_PERCENTAGE)
    };
    next
}

/// Round both sides to pixel counts, scaling them down together when either
/// exceeds [`MAX_DIMENSION`].
fn fit_dimensions(width: f64, height: f64) -> (u32, u32) {
    let longest = width.max(height);
    let scale = if longest > MAX_DIMENSION as f64 {
        MAX_DIMENSION as f64 / longest
    } else {
        1.0
    };
    (to_dimension(width * scale), to_dimension(height * scale))
}

/// Round to a pixel count in `1..=MAX_DIMENSION`.
fn to_dimension(value: f64) -> u32 {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= 1.0 {
        rounded.min(MAX_DIMENSION as f64) as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::OutputFormat;

    fn image_1000x500() -> ImageDescriptor {
        ImageDescriptor::new(1000, 500, 500 * 1024)
    }

    fn initial(image: &ImageDescriptor) -> ResizeSettings {
        ResizeSettings::for_image(image)
    }

    #[test]
    fn test_percentage_edit_scales_both_sides() {
        let image = image_1000x500();
        let next = reconcile(initial(&image), &image, SettingsEdit::Percentage(50));

        assert_eq!(next.width, 500);
        assert_eq!(next.height, 250);
        assert_eq!(next.percentage, 50);
    }

    #[test]
    fn test_locked_width_edit_derives_height() {
        let image = image_1000x500();
        let next = reconcile(initial(&image), &image, SettingsEdit::Width(400));

        assert_eq!(next.width, 400);
        assert_eq!(next.height, 200);
        assert_eq!(next.percentage, 40);
    }

    #[test]
    fn test_locked_height_edit_derives_width() {
        let image = image_1000x500();
        let next = reconcile(initial(&image), &image, SettingsEdit::Height(125));

        assert_eq!(next.width, 250);
        assert_eq!(next.height, 125);
        assert_eq!(next.percentage, 25);
    }

    #[test]
    fn test_unlocked_edits_move_one_side() {
        let image = image_1000x500();
        let mut settings = initial(&image);
        settings.is_locked = false;

        let next = reconcile(settings, &image, SettingsEdit::Width(300));
        assert_eq!((next.width, next.height), (300, 500));
        assert_eq!(next.percentage, 30);

        let next = reconcile(next, &image, SettingsEdit::Height(90));
        assert_eq!((next.width, next.height), (300, 90));
        assert_eq!(next.percentage, 30);
    }

    #[test]
    fn test_lock_toggle_snaps_height() {
        let image = image_1000x500();
        let mut settings = initial(&image);
        settings.is_locked = false;
        settings = reconcile(settings, &image, SettingsEdit::Height(900));
        assert_eq!((settings.width, settings.height), (1000, 900));

        let next = reconcile(settings, &image, SettingsEdit::LockToggle(true));
        assert!(next.is_locked);
        assert_eq!((next.width, next.height), (1000, 500));
        assert_eq!(next.percentage, 100);
    }

    #[test]
    fn test_unlock_keeps_dimensions() {
        let image = image_1000x500();
        let settings = reconcile(initial(&image), &image, SettingsEdit::Width(640));
        let next = reconcile(settings, &image, SettingsEdit::LockToggle(false));

        assert!(!next.is_locked);
        assert_eq!((next.width, next.height), (640, 320));
    }

    #[test]
    fn test_target_size_scales_by_square_root() {
        let image = image_1000x500();
        let next = reconcile(initial(&image), &image, SettingsEdit::TargetSize(Some(100.0)));

        let ratio = (100.0f64 / 500.0).sqrt();
        assert_eq!(next.target_size, Some(100.0));
        assert_eq!(next.width, (1000.0 * ratio).round() as u32);
        assert_eq!(next.height, (500.0 * ratio).round() as u32);
        assert_eq!(next.width, 447);
        assert_eq!(next.height, 224);
        assert_eq!(next.percentage, 45);
    }

    #[test]
    fn test_target_size_larger_than_source_upscales() {
        let image = image_1000x500();
        let next = reconcile(initial(&image), &image, SettingsEdit::TargetSize(Some(2000.0)));

        assert_eq!(next.width, 2000);
        assert_eq!(next.height, 1000);
        assert_eq!(next.percentage, 200);
    }

    #[test]
    fn test_invalid_target_size_clears_target() {
        let image = image_1000x500();
        let settings = reconcile(initial(&image), &image, SettingsEdit::TargetSize(Some(100.0)));

        for bad in [Some(0.0), Some(-5.0), Some(f64::NAN), Some(f64::INFINITY), None] {
            let next = reconcile(settings, &image, SettingsEdit::TargetSize(bad));
            assert_eq!(next.target_size, None, "input {:?}", bad);
            assert_eq!((next.width, next.height), (settings.width, settings.height));
            assert_eq!(next.percentage, settings.percentage);
        }
    }

    #[test]
    fn test_target_size_with_empty_source_keeps_dimensions() {
        let image = ImageDescriptor::new(1000, 500, 0);
        let next = reconcile(initial(&image), &image, SettingsEdit::TargetSize(Some(100.0)));

        assert_eq!(next.target_size, Some(100.0));
        assert_eq!((next.width, next.height), (1000, 500));
        assert_eq!(next.percentage, 100);
    }

    #[test]
    fn test_zero_inputs_clamp_to_one() {
        let image = image_1000x500();
        let mut settings = initial(&image);
        settings.is_locked = false;

        let next = reconcile(settings, &image, SettingsEdit::Width(0));
        assert_eq!(next.width, 1);
        assert_eq!(next.height, 500);

        let next = reconcile(settings, &image, SettingsEdit::Height(0));
        assert_eq!(next.height, 1);

        let next = reconcile(settings, &image, SettingsEdit::Percentage(0));
        assert_eq!(next.width, 10);
        assert_eq!(next.height, 5);
        assert_eq!(next.percentage, 1);
    }

    #[test]
    fn test_percentage_upper_clamp() {
        let image = ImageDescriptor::new(10, 10, 1000);
        let next = reconcile(initial(&image), &image, SettingsEdit::Percentage(5000));

        assert_eq!(next.width, 100);
        assert_eq!(next.percentage, MAX_PERCENTAGE);
    }

    #[test]
    fn test_oversized_width_edit_is_capped() {
        let image = ImageDescriptor::new(4, 2, 96);
        let next = reconcile(initial(&image), &image, SettingsEdit::Width(u32::MAX));

        assert_eq!((next.width, next.height), (MAX_DIMENSION, MAX_DIMENSION / 2));
        assert_eq!(next.percentage, MAX_DIMENSION * 25);
    }

    #[test]
    fn test_locked_edit_on_tall_image_shrinks_both_sides() {
        let image = ImageDescriptor::new(100, 1000, 1000);
        let next = reconcile(initial(&image), &image, SettingsEdit::Width(5000));

        assert_eq!((next.width, next.height), (1638, MAX_DIMENSION));
        assert_eq!(reconcile(next, &image, SettingsEdit::Width(next.width)), next);
    }

    #[test]
    fn test_unlocked_height_edit_is_capped() {
        let image = image_1000x500();
        let mut settings = initial(&image);
        settings.is_locked = false;

        let next = reconcile(settings, &image, SettingsEdit::Height(u32::MAX));
        assert_eq!((next.width, next.height), (1000, MAX_DIMENSION));
    }

    #[test]
    fn test_huge_target_size_keeps_aspect_ratio() {
        let image = ImageDescriptor::new(4000, 2000, 1024);
        let next = reconcile(initial(&image), &image, SettingsEdit::TargetSize(Some(1e15)));

        assert_eq!(next.target_size, Some(1e15));
        assert_eq!((next.width, next.height), (MAX_DIMENSION, MAX_DIMENSION / 2));
        assert_eq!(next.percentage, derived_percentage(MAX_DIMENSION, &image));
        assert_eq!(next.percentage, 410);
    }

    #[test]
    fn test_derived_percentage_never_below_minimum() {
        let image = image_1000x500();
        assert_eq!(derived_percentage(1, &image), MIN_PERCENTAGE);

        let next = reconcile(initial(&image), &image, SettingsEdit::Width(1));
        assert_eq!(next.percentage, MIN_PERCENTAGE);

        let tiny = reconcile(initial(&image), &image, SettingsEdit::TargetSize(Some(0.0001)));
        assert_eq!(tiny.percentage, MIN_PERCENTAGE);
        assert_eq!((tiny.width, tiny.height), (1, 1));
    }

    #[test]
    fn test_locked_derived_side_never_zero() {
        let image = ImageDescriptor::new(1000, 10, 1000);
        let next = reconcile(initial(&image), &image, SettingsEdit::Width(20));

        assert_eq!(next.width, 20);
        assert_eq!(next.height, 1);
    }

    #[test]
    fn test_zero_original_width_falls_back_to_100_percent() {
        let image = ImageDescriptor::new(0, 0, 1000);
        let mut settings = initial(&image);
        settings.percentage = 37;

        let next = reconcile(settings, &image, SettingsEdit::Width(50));
        assert_eq!(next.width, 50);
        assert_eq!(next.height, 1);
        assert_eq!(next.percentage, 100);
    }

    #[test]
    fn test_equal_edits_are_noops() {
        let image = image_1000x500();
        let settings = reconcile(initial(&image), &image, SettingsEdit::Percentage(33));

        for edit in [
            SettingsEdit::Width(settings.width),
            SettingsEdit::Height(settings.height),
            SettingsEdit::Percentage(settings.percentage),
            SettingsEdit::LockToggle(settings.is_locked),
            SettingsEdit::TargetSize(settings.target_size),
            SettingsEdit::Format(settings.format),
            SettingsEdit::Quality(settings.quality),
        ] {
            assert_eq!(reconcile(settings, &image, edit), settings, "edit {:?}", edit);
        }
    }

    #[test]
    fn test_format_and_quality_leave_dimensions() {
        let image = image_1000x500();
        let settings = initial(&image);

        let next = reconcile(settings, &image, SettingsEdit::Format(OutputFormat::WebP));
        assert_eq!(next.format, OutputFormat::WebP);
        assert_eq!((next.width, next.height), (1000, 500));

        let next = reconcile(settings, &image, SettingsEdit::Quality(1.7));
        assert_eq!(next.quality, 1.0);

        let next = reconcile(settings, &image, SettingsEdit::Quality(-0.2));
        assert_eq!(next.quality, 0.0);

        let next = reconcile(settings, &image, SettingsEdit::Quality(f32::NAN));
        assert_eq!(next.quality, settings.quality);
    }

    #[test]
    fn test_reconcile_does_not_touch_input() {
        let image = image_1000x500();
        let settings = initial(&image);
        let _ = reconcile(settings, &image, SettingsEdit::Width(10));

        assert_eq!(settings.width, 1000);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
