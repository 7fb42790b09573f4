//! Export formats and format detection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// MIME type of PNG payloads.
pub const PNG_MIME: &str = "image/png";

/// Raster formats the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    #[serde(alias = "jpeg")]
    Jpg,
    /// WebP (alpha support).
    Webp,
}

impl ExportFormat {
    /// MIME type used for data URLs and clipboard writes.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => PNG_MIME,
            Self::Jpg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Webp => "webp",
        }
    }

    /// Whether the format keeps an alpha channel.
    #[must_use]
    pub const fn supports_transparency(self) -> bool {
        match self {
            Self::Png | Self::Webp => true,
            Self::Jpg => false,
        }
    }

    /// Detect format from a MIME type.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.to_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpg),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpg);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(Self::Webp);
        }
        None
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "webp" => Ok(Self::Webp),
            other => Err(ExportError::InvalidOptions(format!(
                "unsupported format '{other}'"
            ))),
        }
    }
}
