//! # Canvas Studio Export
//!
//! Turns a rasterizable canvas surface into platform-ready files and hands
//! them to the clipboard.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────────┐  snapshot / resize  ┌──────────────┐  encode  ┌──────────────┐
//! │ CanvasSurface │ ──────────────────▶ │ working copy │ ───────▶ │ ExportResult │
//! └───────────────┘                     └──────────────┘          └──────┬───────┘
//!         ▲                                                              │
//!   ExportPreset (presets)                           validate_export ◀───┤
//!                                                  ClipboardBridge ◀─────┘
//! ```
//!
//! Resizing and encoding are CPU-bound and run on Tokio's blocking pool.
//! Validation and size estimates are synchronous and never fail.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clipboard;
pub mod codec;
pub mod error;
pub mod estimate;
pub mod export;
pub mod format;
pub mod presets;
pub mod surface;
pub mod validation;

pub use clipboard::{
    ClipboardBackend, ClipboardBridge, ClipboardContents, ClipboardError, CopyMethod, CopyOutcome,
    MemoryClipboard,
};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use error::{ExportError, PipelineResult};
pub use estimate::{estimate_file_size, format_file_size};
pub use export::{
    export_filename, variant_suffix, Blob, CanvasExporter, ExportOptions, ExportResult,
    ExporterConfig, DEFAULT_FILENAME_SLUG,
};
pub use format::{ExportFormat, PNG_MIME};
pub use presets::{
    all_presets, find_preset, preset, presets_by_category, ExportPreset, PlatformCategory,
    PlatformId, SizeVariant, PRESETS,
};
pub use surface::{CanvasSurface, PixelSize, RasterSurface, MAX_EXPORT_PIXELS};
pub use validation::{validate_export, ValidationReport, SIZE_WARNING_RATIO};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
