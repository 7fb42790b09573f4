//! Subcommand implementations. Each returns the JSON value to print.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use studio_core::{
    align_elements, apply_layout_preset, auto_arrange, check_placement_collision,
    distribute_horizontally, distribute_vertically, find_all_collisions, resolve_collisions,
    suggest_non_colliding_position, ArrangeOptions, CanvasDocument, PlacementId,
};
use studio_export::{
    all_presets, estimate_file_size, format_file_size, presets_by_category, validate_export,
    CanvasExporter, ClipboardBridge, CopyOutcome, ExportResult, ExporterConfig, RasterSurface,
    ValidationReport,
};

use crate::cli::{Axis, Command, ExportArgs};

/// Read and validate a canvas document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid document.
pub fn load_document(path: &Path) -> Result<CanvasDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    CanvasDocument::from_json(&json)
        .with_context(|| format!("Invalid canvas document {}", path.display()))
}

/// Run one subcommand.
///
/// # Errors
///
/// Returns an error if input files are unreadable or invalid, or an export
/// fails.
pub async fn run(command: Command) -> Result<Value> {
    let value = match command {
        Command::Collisions { document } => {
            let doc = load_document(&document)?;
            serde_json::to_value(find_all_collisions(&doc.placements, doc.canvas))?
        }
        Command::Suggest { document, id } => suggest(&load_document(&document)?, &id)?,
        Command::Resolve { document } => {
            let doc = load_document(&document)?;
            let outcome = resolve_collisions(&doc.placements, doc.canvas);
            if !outcome.unresolved.is_empty() {
                tracing::warn!(
                    unresolved = ?outcome.unresolved,
                    "Some placements have no free spot"
                );
            }
            json!({
                "document": doc.with_placements(outcome.placements),
                "unresolved": outcome.unresolved,
            })
        }
        Command::Layout { document, preset } => {
            let doc = load_document(&document)?;
            serde_json::to_value(
                doc.with_placements(apply_layout_preset(&doc.placements, preset, doc.canvas)),
            )?
        }
        Command::Arrange {
            document,
            padding,
            spacing,
            alignment,
            distribution,
        } => {
            let doc = load_document(&document)?;
            let options = ArrangeOptions {
                padding,
                spacing,
                alignment,
                distribution,
            };
            serde_json::to_value(
                doc.with_placements(auto_arrange(&doc.placements, doc.canvas, &options)),
            )?
        }
        Command::Align {
            document,
            alignment,
        } => {
            let doc = load_document(&document)?;
            serde_json::to_value(
                doc.with_placements(align_elements(&doc.placements, alignment, doc.canvas)),
            )?
        }
        Command::Distribute {
            document,
            axis,
            padding,
        } => {
            let doc = load_document(&document)?;
            let placements = match axis {
                Axis::Horizontal => distribute_horizontally(&doc.placements, doc.canvas, padding),
                Axis::Vertical => distribute_vertically(&doc.placements, doc.canvas, padding),
            };
            serde_json::to_value(doc.with_placements(placements))?
        }
        Command::Presets { category } => match category {
            Some(category) => {
                serde_json::to_value(presets_by_category(category).collect::<Vec<_>>())?
            }
            None => serde_json::to_value(all_presets())?,
        },
        Command::Estimate {
            width,
            height,
            format,
            quality,
        } => {
            let bytes = estimate_file_size(width, height, format, quality);
            json!({
                "width": width,
                "height": height,
                "format": format,
                "quality": quality,
                "bytes": bytes,
                "display": format_file_size(bytes),
            })
        }
        Command::Export(args) => serde_json::to_value(export(&args).await?)?,
    };
    Ok(value)
}

/// Suggested position for placement `id`, or `null`.
///
/// # Errors
///
/// Returns an error if the document has no such placement.
pub fn suggest(doc: &CanvasDocument, id: &str) -> Result<Value> {
    let id = PlacementId::from(id);
    let placement = doc
        .get(&id)
        .ok_or_else(|| anyhow!("No placement with id '{id}'"))?;
    let others = doc.others(&id);

    let current = check_placement_collision(placement, &others, doc.canvas);
    let suggestion = suggest_non_colliding_position(placement, &others, doc.canvas);
    if suggestion.is_none() {
        tracing::warn!(%id, "No collision-free position found");
    }
    Ok(json!({
        "id": id,
        "collision": current,
        "suggestion": suggestion,
    }))
}

/// One written export artifact.
#[derive(Debug, Serialize)]
pub struct ExportedFile {
    /// Where the file was written.
    pub path: PathBuf,
    /// Export metadata.
    #[serde(flatten)]
    pub result: ExportResult,
    /// Checks against the platform preset.
    pub validation: ValidationReport,
}

/// Output of the `export` subcommand.
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    /// Platform exported for.
    pub platform: String,
    /// Files written, in variant order.
    pub files: Vec<ExportedFile>,
    /// Clipboard result when `--copy` was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipboard: Option<CopyOutcome>,
}

/// Export an image file for a platform and write the results to disk.
///
/// # Errors
///
/// Returns an error if the image cannot be read or decoded, the export fails,
/// or a file cannot be written.
pub async fn export(args: &ExportArgs) -> Result<ExportSummary> {
    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;
    let surface = RasterSurface::from_bytes(&bytes)
        .with_context(|| format!("Failed to decode image {}", args.image.display()))?;

    let exporter = CanvasExporter::new(ExporterConfig {
        filename_date: args.date,
    });
    let results = if args.all_variants {
        exporter.export_all_variants(&surface, args.platform).await?
    } else {
        vec![exporter.export_for_platform(&surface, args.platform).await?]
    };

    tokio::fs::create_dir_all(&args.out_dir)
        .await
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let clipboard = match results.first() {
        Some(first) if args.copy => Some(copy_to_clipboard(first).await),
        _ => None,
    };

    let mut files = Vec::with_capacity(results.len());
    for result in results {
        let path = args.out_dir.join(&result.filename);
        tokio::fs::write(&path, &result.blob.bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        let validation = validate_export(&result, args.platform.id());
        tracing::info!(path = %path.display(), valid = validation.valid, "Wrote export");
        files.push(ExportedFile {
            path,
            result,
            validation,
        });
    }

    Ok(ExportSummary {
        platform: args.platform.id().to_string(),
        files,
        clipboard,
    })
}

#[cfg(feature = "system-clipboard")]
async fn copy_to_clipboard(result: &ExportResult) -> CopyOutcome {
    ClipboardBridge::new(studio_export::SystemClipboard)
        .copy_to_clipboard_with_fallback(&result.blob, &result.data_url)
        .await
}

#[cfg(not(feature = "system-clipboard"))]
async fn copy_to_clipboard(result: &ExportResult) -> CopyOutcome {
    tracing::warn!("Built without the system-clipboard feature");
    ClipboardBridge::new(studio_export::MemoryClipboard::unavailable())
        .copy_to_clipboard_with_fallback(&result.blob, &result.data_url)
        .await
}
