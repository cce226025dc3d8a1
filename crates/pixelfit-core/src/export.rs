//! Naming and size display for exported files.

use crate::settings::OutputFormat;

const BYTE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Download name for a resized copy of `original`.
///
/// `photo.jpg` -> `photo_resized.webp`. A name with no `.`, or one starting
/// with `.`, is used whole as the stem.
pub fn output_filename(original: &str, format: OutputFormat) -> String {
    let stem = match original.rfind('.') {
        Some(idx) if idx > 0 => &original[..idx],
        _ => original,
    };
    format!("{}_resized.{}", stem, format.extension())
}

/// Human-readable byte count using base 1024.
///
/// Rounds to `decimals` places and strips trailing zeros, so `1536` becomes
/// `"1.5 KB"` and `2048` becomes `"2 KB"`.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{:.*}", decimals, value);
    let trimmed = if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered.as_str()
    };
    format!("{} {}", trimmed, BYTE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_filename() {
        assert_eq!(
            output_filename("photo.jpg", OutputFormat::WebP),
            "photo_resized.webp"
        );
        assert_eq!(
            output_filename("archive.tar.png", OutputFormat::Jpeg),
            "archive.tar_resized.jpeg"
        );
    }

    #[test]
    fn test_output_filename_without_extension() {
        assert_eq!(
            output_filename("scan", OutputFormat::Png),
            "scan_resized.png"
        );
        assert_eq!(
            output_filename(".hidden", OutputFormat::Png),
            ".hidden_resized.png"
        );
    }

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0, 2), "0 Bytes");
    }

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(512, 2), "512 Bytes");
        assert_eq!(format_bytes(1024, 2), "1 KB");
        assert_eq!(format_bytes(1536, 2), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024, 2), "5 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024, 2), "3 GB");
    }

    #[test]
    fn test_format_bytes_stays_in_gb() {
        assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024, 0), "2048 GB");
    }

    #[test]
    fn test_format_bytes_decimals() {
        assert_eq!(format_bytes(1300, 2), "1.27 KB");
        assert_eq!(format_bytes(1300, 0), "1 KB");
        assert_eq!(format_bytes(1300, 1), "1.3 KB");
    }
}
