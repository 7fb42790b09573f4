//! Export pipeline error types.

use thiserror::Error;

/// Result type for export pipeline operations.
pub type PipelineResult<T> = Result<T, ExportError>;

/// Errors that can occur while exporting a canvas.
///
/// There is no automatic retry: a failed encode is returned to the caller
/// as-is.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export options out of range (quality, scale, sizes).
    #[error("Invalid export options: {0}")]
    InvalidOptions(String),

    /// Platform id not present in the preset catalog.
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// The surface has no pixels to export.
    #[error("Canvas surface is empty ({width}x{height})")]
    EmptySurface {
        /// Surface width in pixels.
        width: u32,
        /// Surface height in pixels.
        height: u32,
    },

    /// Encoding to the requested format failed.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Producing a resized copy of a surface failed.
    #[error("Resize failed: {0}")]
    Resize(String),

    /// Decoding an existing raster failed.
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// Malformed data URL.
    #[error("Invalid data URL: {0}")]
    DataUrl(String),
}
