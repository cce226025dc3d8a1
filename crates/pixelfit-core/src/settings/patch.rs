//! Partial settings updates as they arrive from the UI.

use serde::{Deserialize, Serialize};

use super::{reconcile, ImageDescriptor, OutputFormat, ResizeSettings, SettingsEdit};

/// A partial update where every field is optional.
///
/// The UI sends whichever controls changed. Only one dimension-driving field
/// is honoured per patch, picked in the order width, height, percentage,
/// lock, target size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub is_locked: Option<bool>,
    pub percentage: Option<u32>,
    pub format: Option<OutputFormat>,
    pub quality: Option<f32>,
    /// `0` or a negative value clears the target.
    pub target_size: Option<f64>,
}

impl SettingsPatch {
    /// Convert to the edits `reconcile` understands.
    ///
    /// Format and quality come first. At most one driving edit follows: the
    /// first field, in precedence order, whose value differs from `current`.
    pub fn edits(&self, current: &ResizeSettings) -> Vec<SettingsEdit> {
        let mut edits = Vec::with_capacity(3);

        if let Some(format) = self.format {
            edits.push(SettingsEdit::Format(format));
        }
        if let Some(quality) = self.quality {
            edits.push(SettingsEdit::Quality(quality));
        }

        let driving = [
            self.width
                .filter(|w| (*w).max(1) != current.width)
                .map(SettingsEdit::Width),
            self.height
                .filter(|h| (*h).max(1) != current.height)
                .map(SettingsEdit::Height),
            self.percentage
                .filter(|p| *p != current.percentage)
                .map(SettingsEdit::Percentage),
            self.is_locked
                .filter(|locked| *locked != current.is_locked)
                .map(SettingsEdit::LockToggle),
            self.target_size
                .filter(|kb| Some(*kb) != current.target_size)
                .map(|kb| SettingsEdit::TargetSize(Some(kb))),
        ];

        edits.extend(driving.into_iter().flatten().take(1));
        edits
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Apply a partial update by folding its edits through [`reconcile`].
pub fn reconcile_patch(
    current: ResizeSettings,
    image: &ImageDescriptor,
    patch: &SettingsPatch,
) -> ResizeSettings {
    patch
        .edits(&current)
        .into_iter()
        .fold(current, |settings, edit| reconcile(settings, image, edit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageDescriptor {
        ImageDescriptor::new(1000, 500, 500 * 1024)
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let image = image();
        let settings = ResizeSettings::for_image(&image);
        let patch = SettingsPatch::default();

        assert!(patch.is_empty());
        assert!(patch.edits(&settings).is_empty());
        assert_eq!(reconcile_patch(settings, &image, &patch), settings);
    }

    #[test]
    fn test_width_wins_over_height_and_percentage() {
        let image = image();
        let settings = ResizeSettings::for_image(&image);
        let patch = SettingsPatch {
            width: Some(400),
            height: Some(50),
            percentage: Some(10),
            ..Default::default()
        };

        assert_eq!(patch.edits(&settings), vec![SettingsEdit::Width(400)]);
        let next = reconcile_patch(settings, &image, &patch);
        assert_eq!((next.width, next.height, next.percentage), (400, 200, 40));
    }

    #[test]
    fn test_unchanged_fields_do_not_drive() {
        let image = image();
        let settings = ResizeSettings::for_image(&image);
        // The UI echoes the whole form; only percentage actually moved.
        let patch = SettingsPatch {
            width: Some(1000),
            height: Some(500),
            percentage: Some(50),
            is_locked: Some(true),
            ..Default::default()
        };

        assert_eq!(patch.edits(&settings), vec![SettingsEdit::Percentage(50)]);
        let next = reconcile_patch(settings, &image, &patch);
        assert_eq!((next.width, next.height), (500, 250));
    }

    #[test]
    fn test_format_and_quality_ride_along() {
        let image = image();
        let settings = ResizeSettings::for_image(&image);
        let patch = SettingsPatch {
            format: Some(OutputFormat::Png),
            quality: Some(0.5),
            target_size: Some(100.0),
            ..Default::default()
        };

        let next = reconcile_patch(settings, &image, &patch);
        assert_eq!(next.format, OutputFormat::Png);
        assert_eq!(next.quality, 0.5);
        assert_eq!(next.target_size, Some(100.0));
        assert_eq!(next.percentage, 45);
    }

    #[test]
    fn test_zero_target_clears() {
        let image = image();
        let settings = reconcile_patch(
            ResizeSettings::for_image(&image),
            &image,
            &SettingsPatch {
                target_size: Some(100.0),
                ..Default::default()
            },
        );
        let next = reconcile_patch(
            settings,
            &image,
            &SettingsPatch {
                target_size: Some(0.0),
                ..Default::default()
            },
        );

        assert_eq!(next.target_size, None);
        assert_eq!(next.width, settings.width);
    }
}
