//! Clipboard bridge with format and text fallbacks.
//!
//! A missing clipboard is routine, not exceptional: probe with
//! [`ClipboardBridge::is_clipboard_supported`] first, or use
//! [`ClipboardBridge::copy_to_clipboard_with_fallback`], which never fails and
//! reports which method worked.
//!
//! ```text
//! copy_to_clipboard_with_fallback(blob, text)
//!   ├─ image write ── ok ─────────────────────────▶ Image
//!   │    └─ MIME rejected ─▶ re-encode PNG, retry ─▶ Image
//!   ├─ text write ─── ok ─────────────────────────▶ Text
//!   └─────────────────────────────────────────────▶ None
//! ```

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec;
use crate::export::Blob;
use crate::format::PNG_MIME;

/// Clipboard failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No image clipboard is available.
    #[error("Clipboard is not supported")]
    Unsupported,

    /// The clipboard refused the payload's MIME type.
    #[error("Clipboard rejected MIME type {0}")]
    UnsupportedMime(String),

    /// The write itself failed.
    #[error("Clipboard write failed: {0}")]
    Write(String),

    /// Converting the payload to PNG failed.
    #[error("PNG re-encode failed: {0}")]
    Reencode(String),
}

/// A clipboard implementation.
#[async_trait]
pub trait ClipboardBackend: Send + Sync {
    /// Whether image writes are possible at all.
    fn supports_images(&self) -> bool;

    /// Whether plain-text writes are possible.
    fn supports_text(&self) -> bool;

    /// Write an encoded image.
    ///
    /// # Errors
    ///
    /// [`ClipboardError::UnsupportedMime`] if the MIME type is refused, or
    /// another [`ClipboardError`] if the write fails.
    async fn write_image(&self, blob: &Blob) -> Result<(), ClipboardError>;

    /// Write plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// How a fallback copy ended up on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyMethod {
    /// The image itself.
    Image,
    /// The text fallback.
    Text,
    /// Nothing was copied.
    None,
}

/// Result of [`ClipboardBridge::copy_to_clipboard_with_fallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyOutcome {
    /// Whether anything was copied.
    pub success: bool,
    /// What was copied.
    pub method: CopyMethod,
}

/// Copies exports to a clipboard backend.
#[derive(Debug)]
pub struct ClipboardBridge<B> {
    backend: B,
}

impl<B: ClipboardBackend> ClipboardBridge<B> {
    /// Create a bridge that owns `backend`.
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether images can be copied.
    #[must_use]
    pub fn is_clipboard_supported(&self) -> bool {
        self.backend.supports_images()
    }

    /// Whether the text-only fallback is available.
    #[must_use]
    pub fn is_legacy_clipboard_supported(&self) -> bool {
        self.backend.supports_text()
    }

    /// Copy an image.
    ///
    /// If the backend rejects the MIME type, the payload is re-encoded as PNG
    /// and written once more.
    ///
    /// # Errors
    ///
    /// [`ClipboardError::Unsupported`] without an image clipboard, otherwise
    /// the error of the last write attempt.
    pub async fn copy_to_clipboard(&self, blob: &Blob) -> Result<(), ClipboardError> {
        if !self.is_clipboard_supported() {
            return Err(ClipboardError::Unsupported);
        }

        match self.backend.write_image(blob).await {
            Err(ClipboardError::UnsupportedMime(mime)) if mime != PNG_MIME => {
                tracing::debug!(%mime, "Clipboard rejected MIME type, retrying as PNG");
                let png = to_png(blob).await?;
                self.backend.write_image(&png).await
            }
            other => other,
        }
    }

    /// Copy an image, falling back to `text_fallback`. Never fails.
    pub async fn copy_to_clipboard_with_fallback(
        &self,
        blob: &Blob,
        text_fallback: &str,
    ) -> CopyOutcome {
        match self.copy_to_clipboard(blob).await {
            Ok(()) => {
                return CopyOutcome {
                    success: true,
                    method: CopyMethod::Image,
                }
            }
            Err(e) => tracing::warn!(error = %e, "Image copy failed, falling back to text"),
        }

        if self.is_legacy_clipboard_supported() {
            match self.backend.write_text(text_fallback).await {
                Ok(()) => {
                    return CopyOutcome {
                        success: true,
                        method: CopyMethod::Text,
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Text copy failed"),
            }
        }

        CopyOutcome {
            success: false,
            method: CopyMethod::None,
        }
    }
}

async fn to_png(blob: &Blob) -> Result<Blob, ClipboardError> {
    let bytes = blob.bytes.clone();
    let png = tokio::task::spawn_blocking(move || codec::reencode_as_png(&bytes))
        .await
        .map_err(|e| ClipboardError::Reencode(e.to_string()))?
        .map_err(|e| ClipboardError::Reencode(e.to_string()))?;
    Ok(Blob::new(PNG_MIME, png))
}

/// What a [`MemoryClipboard`] currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContents {
    /// An image payload.
    Image(Blob),
    /// Plain text.
    Text(String),
}

/// In-process clipboard.
///
/// Accepts `image/png` by default, mirroring what most platforms take.
#[derive(Debug)]
pub struct MemoryClipboard {
    contents: Mutex<Option<ClipboardContents>>,
    accepted_mimes: Vec<String>,
    images: bool,
    text: bool,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::accepting(&[PNG_MIME])
    }
}

impl MemoryClipboard {
    /// PNG-only image clipboard with text support.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard accepting the given image MIME types.
    #[must_use]
    pub fn accepting(mimes: &[&str]) -> Self {
        Self {
            contents: Mutex::new(None),
            accepted_mimes: mimes.iter().map(ToString::to_string).collect(),
            images: true,
            text: true,
        }
    }

    /// Clipboard that only takes text.
    #[must_use]
    pub fn text_only() -> Self {
        Self {
            images: false,
            ..Self::default()
        }
    }

    /// Clipboard that takes nothing.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            images: false,
            text: false,
            ..Self::default()
        }
    }

    /// Current contents.
    #[must_use]
    pub fn contents(&self) -> Option<ClipboardContents> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, value: ClipboardContents) {
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }
}

#[async_trait]
impl ClipboardBackend for MemoryClipboard {
    fn supports_images(&self) -> bool {
        self.images
    }

    fn supports_text(&self) -> bool {
        self.text
    }

    async fn write_image(&self, blob: &Blob) -> Result<(), ClipboardError> {
        if !self.images {
            return Err(ClipboardError::Unsupported);
        }
        if !self.accepted_mimes.iter().any(|m| *m == blob.mime) {
            return Err(ClipboardError::UnsupportedMime(blob.mime.clone()));
        }
        self.store(ClipboardContents::Image(blob.clone()));
        Ok(())
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.text {
            return Err(ClipboardError::Unsupported);
        }
        self.store(ClipboardContents::Text(text.to_string()));
        Ok(())
    }
}

/// The operating system clipboard.
///
/// Images are decoded and handed over as raw RGBA, so any decodable MIME type
/// is accepted.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
#[async_trait]
impl ClipboardBackend for SystemClipboard {
    fn supports_images(&self) -> bool {
        arboard::Clipboard::new().is_ok()
    }

    fn supports_text(&self) -> bool {
        arboard::Clipboard::new().is_ok()
    }

    async fn write_image(&self, blob: &Blob) -> Result<(), ClipboardError> {
        if crate::format::ExportFormat::from_mime(&blob.mime).is_none() {
            return Err(ClipboardError::UnsupportedMime(blob.mime.clone()));
        }
        let bytes = blob.bytes.clone();
        tokio::task::spawn_blocking(move || {
            let image =
                codec::decode_rgba(&bytes).map_err(|e| ClipboardError::Write(e.to_string()))?;
            let data = arboard::ImageData {
                width: image.width() as usize,
                height: image.height() as usize,
                bytes: std::borrow::Cow::Borrowed(image.as_raw()),
            };
            arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.set_image(data))
                .map_err(|e| ClipboardError::Write(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Write(e.to_string()))?
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.set_text(text))
                .map_err(|e| ClipboardError::Write(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Write(e.to_string()))?
    }
}
