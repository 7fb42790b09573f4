//! Canvas export to platform-ready rasters.
//!
//! Every export takes a point-in-time copy of the surface before the first
//! `.await` and resizes or encodes only that copy, so edits made while a
//! resize or encode is in flight never leak into the result.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::error::{ExportError, PipelineResult};
use crate::format::ExportFormat;
use crate::presets::{preset, ExportPreset, PlatformId};
use crate::surface::{CanvasSurface, PixelSize, MAX_EXPORT_PIXELS};

/// Filename slug used when an export has no platform.
pub const DEFAULT_FILENAME_SLUG: &str = "canvas-export";

/// Input contract for [`CanvasExporter::export_to_format`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExportOptions {
    /// Output format.
    pub format: ExportFormat,
    /// Encoder quality, 0-100.
    pub quality: u8,
    /// Uniform scale applied before encoding. Must be finite and positive.
    pub scale: f64,
    /// Platform the export is for; drives the filename slug.
    pub platform: Option<PlatformId>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            quality: 92,
            scale: 1.0,
            platform: None,
        }
    }
}

impl ExportOptions {
    /// Check ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidOptions`] for quality above 100 or a
    /// non-finite or non-positive scale.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.quality > 100 {
            return Err(ExportError::InvalidOptions(format!(
                "quality {} is outside 0-100",
                self.quality
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ExportError::InvalidOptions(format!(
                "scale {} must be finite and greater than zero",
                self.scale
            )));
        }
        Ok(())
    }
}

/// Encoded payload plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// MIME type, e.g. `image/png`.
    pub mime: String,
    /// Raw bytes.
    pub bytes: Vec<u8>,
}

impl Blob {
    /// Create a blob.
    #[must_use]
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if there are no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:<mime>;base64,<payload>`.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }

    /// Parse a base64 data URL.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::DataUrl`] if the URL is not a base64 data URL
    /// or the payload does not decode.
    pub fn from_data_url(url: &str) -> PipelineResult<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| ExportError::DataUrl("missing 'data:' prefix".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ExportError::DataUrl("missing ',' separator".to_string()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| ExportError::DataUrl("only base64 payloads are supported".to_string()))?;
        let bytes = BASE64
            .decode(payload)
            .map_err(|e| ExportError::DataUrl(format!("bad base64 payload: {e}")))?;
        Ok(Self::new(mime, bytes))
    }
}

/// Output contract of every export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    /// Raster payload as a data URL.
    #[serde(skip)]
    pub data_url: String,
    /// Raster payload as bytes.
    #[serde(skip)]
    pub blob: Blob,
    /// Suggested filename.
    pub filename: String,
    /// Format actually encoded.
    pub format: ExportFormat,
    /// Pixel size of the encoded raster, read back from the surface that was
    /// encoded.
    pub dimensions: PixelSize,
    /// Byte size of `blob`.
    pub file_size: u64,
}

/// Exporter configuration.
#[derive(Debug, Clone, Default)]
pub struct ExporterConfig {
    /// Date stamped into filenames. Today's local date when `None`.
    pub filename_date: Option<NaiveDate>,
}

/// Turns canvas surfaces into [`ExportResult`]s.
#[derive(Debug, Clone, Default)]
pub struct CanvasExporter {
    config: ExporterConfig,
}

impl CanvasExporter {
    /// Create an exporter.
    #[must_use]
    pub fn new(config: ExporterConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Export at the requested format, quality and scale.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid options, an empty surface, or a failed
    /// resize or encode. A scale whose output would exceed
    /// [`MAX_EXPORT_PIXELS`] is [`ExportError::InvalidOptions`].
    pub async fn export_to_format(
        &self,
        surface: &dyn CanvasSurface,
        options: &ExportOptions,
    ) -> PipelineResult<ExportResult> {
        options.validate()?;
        let source = non_empty(surface)?;
        let (width, height) = scaled_size(source, options.scale);
        let target = PixelSize::new(width, height);
        if target != source && target.pixel_count() > MAX_EXPORT_PIXELS {
            return Err(ExportError::InvalidOptions(format!(
                "scale {} turns {source} into {target}, over {MAX_EXPORT_PIXELS} pixels",
                options.scale
            )));
        }

        let snapshot = surface.snapshot();
        let working = if target == source {
            snapshot
        } else {
            snapshot.resized(width, height).await?
        };

        let filename = export_filename(options.platform, None, options.format, self.date());
        Self::encode(working.as_ref(), options.format, options.quality, filename).await
    }

    /// Export for a platform, fitting the surface inside the platform's
    /// recommended size while keeping aspect ratio.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty surface or a failed resize or encode.
    pub async fn export_for_platform(
        &self,
        surface: &dyn CanvasSurface,
        platform: PlatformId,
    ) -> PipelineResult<ExportResult> {
        let source = non_empty(surface)?;
        let preset = preset(platform);
        let options = ExportOptions {
            format: preset.format,
            quality: preset.quality,
            scale: fit_scale(source, preset),
            platform: Some(platform),
        };
        self.export_to_format(surface, &options).await
    }

    /// Export every size variant the platform declares.
    ///
    /// Platforms without variants yield a single [`Self::export_for_platform`]
    /// result. Otherwise each variant is resized to its exact size, encoded
    /// and named independently, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first resize or encode failure.
    pub async fn export_all_variants(
        &self,
        surface: &dyn CanvasSurface,
        platform: PlatformId,
    ) -> PipelineResult<Vec<ExportResult>> {
        let preset = preset(platform);
        if preset.variants.is_empty() {
            return Ok(vec![self.export_for_platform(surface, platform).await?]);
        }
        non_empty(surface)?;

        let date = self.date();
        let snapshot = surface.snapshot();
        let mut copies = Vec::with_capacity(preset.variants.len());
        for variant in preset.variants {
            let copy = snapshot.resized(variant.width, variant.height).await?;
            copies.push((copy, variant.label));
        }

        let mut results = Vec::with_capacity(copies.len());
        for (copy, label) in copies {
            let filename = export_filename(Some(platform), Some(label), preset.format, date);
            results.push(
                Self::encode(copy.as_ref(), preset.format, preset.quality, filename).await?,
            );
        }
        Ok(results)
    }

    async fn encode(
        surface: &dyn CanvasSurface,
        format: ExportFormat,
        quality: u8,
        filename: String,
    ) -> PipelineResult<ExportResult> {
        let bytes = surface.encode(format, f32::from(quality) / 100.0).await?;
        let dimensions = surface.dimensions();
        let blob = Blob::new(format.mime_type(), bytes);
        let file_size = blob.len() as u64;

        tracing::info!(%filename, %dimensions, file_size, "Export complete");

        Ok(ExportResult {
            data_url: blob.to_data_url(),
            blob,
            filename,
            format,
            dimensions,
            file_size,
        })
    }

    fn date(&self) -> NaiveDate {
        self.config
            .filename_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

fn non_empty(surface: &dyn CanvasSurface) -> PipelineResult<PixelSize> {
    let size = surface.dimensions();
    if size.is_empty() {
        return Err(ExportError::EmptySurface {
            width: size.width,
            height: size.height,
        });
    }
    Ok(size)
}

/// `round(side * scale)`, never below one pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_size(size: PixelSize, scale: f64) -> (u32, u32) {
    let side = |v: u32| (f64::from(v) * scale).round().clamp(1.0, f64::from(u32::MAX)) as u32;
    (side(size.width), side(size.height))
}

fn fit_scale(size: PixelSize, preset: &ExportPreset) -> f64 {
    (f64::from(preset.width) / f64::from(size.width))
        .min(f64::from(preset.height) / f64::from(size.height))
}

/// `{platform-slug}{-variant}-{YYYYMMDD}.{ext}`.
#[must_use]
pub fn export_filename(
    platform: Option<PlatformId>,
    variant_label: Option<&str>,
    format: ExportFormat,
    date: NaiveDate,
) -> String {
    let slug = platform.map_or_else(|| DEFAULT_FILENAME_SLUG.to_string(), PlatformId::slug);
    let suffix = variant_label
        .map(variant_suffix)
        .filter(|s| !s.is_empty())
        .map(|s| format!("-{s}"))
        .unwrap_or_default();
    format!(
        "{slug}{suffix}-{}.{}",
        date.format("%Y%m%d"),
        format.extension()
    )
}

/// Filename-safe form of a variant label: `112×112` becomes `112x112`.
#[must_use]
pub fn variant_suffix(label: &str) -> String {
    label
        .chars()
        .map(|c| if c == '×' { 'x' } else { c })
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
