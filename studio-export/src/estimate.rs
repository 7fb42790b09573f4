//! Closed-form file size estimates for UI display.
//!
//! These never encode anything. Validation of real exports uses the actual
//! blob size.

use crate::format::ExportFormat;

const PNG_RATIO: f64 = 0.35;
const JPG_BASE_RATIO: f64 = 0.03;
const JPG_QUALITY_RATIO: f64 = 0.12;
const WEBP_BASE_RATIO: f64 = 0.02;
const WEBP_QUALITY_RATIO: f64 = 0.08;

/// Estimated encoded size in bytes.
///
/// Starts from the uncompressed RGBA size (`width * height * 4`) and applies
/// a per-format compression ratio. PNG uses a constant ratio; JPG and WebP
/// grow linearly with `quality` (0-100, clamped).
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn estimate_file_size(width: u32, height: u32, format: ExportFormat, quality: u8) -> u64 {
    let raw = u64::from(width) * u64::from(height) * 4;
    let q = f64::from(quality.min(100)) / 100.0;
    let ratio = match format {
        ExportFormat::Png => PNG_RATIO,
        ExportFormat::Jpg => JPG_QUALITY_RATIO.mul_add(q, JPG_BASE_RATIO),
        ExportFormat::Webp => WEBP_QUALITY_RATIO.mul_add(q, WEBP_BASE_RATIO),
    };
    (raw as f64 * ratio).round() as u64
}

/// Human-readable size: `512 B`, `1.5 KB`, `2.00 MB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_constant_ratio() {
        assert_eq!(estimate_file_size(100, 100, ExportFormat::Png, 0), 14_000);
        assert_eq!(estimate_file_size(100, 100, ExportFormat::Png, 100), 14_000);
    }

    #[test]
    fn test_jpg_grows_with_quality() {
        assert_eq!(estimate_file_size(100, 100, ExportFormat::Jpg, 0), 1_200);
        assert_eq!(estimate_file_size(100, 100, ExportFormat::Jpg, 100), 6_000);
        assert!(
            estimate_file_size(1280, 720, ExportFormat::Jpg, 60)
                < estimate_file_size(1280, 720, ExportFormat::Jpg, 90)
        );
    }

    #[test]
    fn test_webp_ratio() {
        assert_eq!(estimate_file_size(100, 100, ExportFormat::Webp, 50), 2_400);
        assert_eq!(
            estimate_file_size(100, 100, ExportFormat::Webp, 250),
            estimate_file_size(100, 100, ExportFormat::Webp, 100)
        );
    }

    #[test]
    fn test_zero_area() {
        assert_eq!(estimate_file_size(0, 720, ExportFormat::Png, 100), 0);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.00 MB");
    }
}
