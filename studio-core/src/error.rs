//! Error types for canvas geometry operations.

use thiserror::Error;

/// Result type for canvas geometry operations.
pub type StudioResult<T> = Result<T, StudioError>;

/// Errors that can occur in canvas geometry operations.
///
/// Geometric dead-ends (no free spot for a placement) are not errors; they
/// are reported as `None` by the placement search.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Canvas dimensions were zero, negative, or not finite.
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: f64,
        /// Requested height in pixels.
        height: f64,
    },

    /// Two placements in one document share an identifier.
    #[error("Duplicate placement id: {0}")]
    DuplicateId(String),

    /// Layout preset name not recognized.
    #[error("Unknown layout preset: {0}")]
    UnknownPreset(String),

    /// Alignment name not recognized.
    #[error("Unknown alignment: {0}")]
    UnknownAlignment(String),

    /// Arrange distribution name not recognized.
    #[error("Unknown distribution: {0}")]
    UnknownDistribution(String),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
