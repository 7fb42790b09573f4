//! Rasterizable canvas surfaces.
//!
//! The export pipeline never renders designs itself. It consumes anything
//! implementing [`CanvasSurface`]: something with a pixel size that can hand
//! out a point-in-time copy, a resized copy, and an encoded payload.

use std::sync::Arc;

use async_trait::async_trait;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{ExportError, PipelineResult};
use crate::format::ExportFormat;

/// Largest raster, in pixels, a surface may be resized to (256 MiB of RGBA).
pub const MAX_EXPORT_PIXELS: u64 = 64 * 1024 * 1024;

/// Pixel dimensions of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Create a new pixel size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either side is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Total pixel count.
    #[must_use]
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A surface the export pipeline can rasterize.
#[async_trait]
pub trait CanvasSurface: Send + Sync {
    /// Current pixel dimensions.
    fn dimensions(&self) -> PixelSize;

    /// An independent copy of the current pixels.
    ///
    /// Later mutations of `self` must not show through the copy.
    fn snapshot(&self) -> Box<dyn CanvasSurface>;

    /// A smoothed copy resized to exactly `width` x `height`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target size is empty or larger than
    /// [`MAX_EXPORT_PIXELS`].
    async fn resized(&self, width: u32, height: u32) -> PipelineResult<Box<dyn CanvasSurface>>;

    /// Encode the surface. `quality` is in `0.0..=1.0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder fails.
    async fn encode(&self, format: ExportFormat, quality: f32) -> PipelineResult<Vec<u8>>;
}

/// In-memory RGBA surface.
///
/// Pixels are shared copy-on-write, so [`CanvasSurface::snapshot`] is cheap
/// and writes through [`RasterSurface::pixels_mut`] never reach existing
/// snapshots.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: Arc<RgbaImage>,
    matte: [u8; 3],
}

impl RasterSurface {
    /// Background used when flattening alpha for JPEG.
    pub const DEFAULT_MATTE: [u8; 3] = [255, 255, 255];

    /// Transparent surface of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::new(width, height))
    }

    /// Surface filled with a single colour.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    /// Wrap existing pixels.
    #[must_use]
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(image),
            matte: Self::DEFAULT_MATTE,
        }
    }

    /// Decode an encoded raster (PNG, JPEG, WebP) into a surface.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Decode`] if the bytes cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> PipelineResult<Self> {
        codec::decode_rgba(bytes).map(Self::from_image)
    }

    /// Set the JPEG background colour.
    #[must_use]
    pub const fn with_matte(mut self, matte: [u8; 3]) -> Self {
        self.matte = matte;
        self
    }

    /// Read-only pixel access.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Mutable pixel access. Detaches from any outstanding snapshot.
    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        Arc::make_mut(&mut self.pixels)
    }
}

#[async_trait]
impl CanvasSurface for RasterSurface {
    fn dimensions(&self) -> PixelSize {
        let (width, height) = self.pixels.dimensions();
        PixelSize::new(width, height)
    }

    fn snapshot(&self) -> Box<dyn CanvasSurface> {
        Box::new(self.clone())
    }

    async fn resized(&self, width: u32, height: u32) -> PipelineResult<Box<dyn CanvasSurface>> {
        let target = PixelSize::new(width, height);
        if target.is_empty() {
            return Err(ExportError::Resize(format!("target size {target} is empty")));
        }
        if target.pixel_count() > MAX_EXPORT_PIXELS {
            return Err(ExportError::Resize(format!(
                "target size {target} exceeds {MAX_EXPORT_PIXELS} pixels"
            )));
        }
        let source = self.dimensions();
        if source.is_empty() {
            return Err(ExportError::EmptySurface {
                width: source.width,
                height: source.height,
            });
        }

        let pixels = Arc::clone(&self.pixels);
        let matte = self.matte;
        tracing::debug!(%source, %target, "Resizing surface");
        let scaled = tokio::task::spawn_blocking(move || {
            imageops::resize(pixels.as_ref(), width, height, FilterType::Lanczos3)
        })
        .await
        .map_err(|e| ExportError::Resize(format!("resize task failed: {e}")))?;

        Ok(Box::new(Self {
            pixels: Arc::new(scaled),
            matte,
        }))
    }

    async fn encode(&self, format: ExportFormat, quality: f32) -> PipelineResult<Vec<u8>> {
        let pixels = Arc::clone(&self.pixels);
        let matte = self.matte;
        tracing::debug!(
            %format,
            width = pixels.width(),
            height = pixels.height(),
            quality,
            "Encoding surface"
        );
        tokio::task::spawn_blocking(move || codec::encode_rgba(&pixels, format, quality, matte))
            .await
            .map_err(|e| ExportError::Encode(format!("encoder task failed: {e}")))?
    }
}
