//! Advisory checks of an export against its platform.

use serde::Serialize;

use crate::export::ExportResult;
use crate::presets::find_preset;

/// Share of the upload limit above which a warning is raised.
pub const SIZE_WARNING_RATIO: f64 = 0.9;

/// Outcome of [`validate_export`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// False if any error was found.
    pub valid: bool,
    /// Hard failures, e.g. over the upload limit.
    pub errors: Vec<String>,
    /// Things the platform may not like.
    pub warnings: Vec<String>,
    /// Hints for fixing errors and warnings.
    pub suggestions: Vec<String>,
}

/// Compare an export with a platform preset.
///
/// Never fails: unknown platforms produce a valid report carrying a single
/// warning.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn validate_export(result: &ExportResult, platform_id: &str) -> ValidationReport {
    let mut report = ValidationReport {
        valid: true,
        ..ValidationReport::default()
    };

    let Some(preset) = find_preset(platform_id) else {
        report
            .warnings
            .push(format!("Unknown platform '{platform_id}', platform checks skipped"));
        return report;
    };

    if let Some(max_bytes) = preset.max_file_size_bytes() {
        if result.file_size > max_bytes {
            report.errors.push(format!(
                "File size {} exceeds the {} limit of {}",
                crate::estimate::format_file_size(result.file_size),
                preset.name,
                crate::estimate::format_file_size(max_bytes),
            ));
            if preset.format.supports_transparency() {
                report
                    .suggestions
                    .push("Simplify the design or reduce the number of colours".to_string());
            } else {
                report
                    .suggestions
                    .push("Lower the export quality".to_string());
            }
        } else if result.file_size as f64 > max_bytes as f64 * SIZE_WARNING_RATIO {
            report.warnings.push(format!(
                "File size {} is within 10% of the {} limit",
                crate::estimate::format_file_size(result.file_size),
                crate::estimate::format_file_size(max_bytes),
            ));
        }
    }

    let dims = result.dimensions;
    if !preset.matches_dimensions(dims.width, dims.height) {
        report.warnings.push(format!(
            "Dimensions {dims} differ from the recommended {}x{}",
            preset.width, preset.height
        ));
        report.suggestions.push(format!(
            "Design on a {}x{} canvas to avoid letterboxing",
            preset.width, preset.height
        ));
    }

    if preset.supports_transparency && !result.format.supports_transparency() {
        report.warnings.push(format!(
            "{} drops transparency that {} supports",
            result.format, preset.name
        ));
        report
            .suggestions
            .push(format!("Export as {} to keep transparency", preset.format));
    }

    report.valid = report.errors.is_empty();
    if !report.valid {
        tracing::warn!(platform = platform_id, errors = ?report.errors, "Export failed validation");
    }
    report
}
