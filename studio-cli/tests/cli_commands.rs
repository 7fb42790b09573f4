//! Integration tests for canvas-studio subcommands.
//!
//! Documents and images are written to temporary directories and run through
//! the same entry point the binary uses.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use studio_cli::{run, CliArgs, Command, ExportArgs};
use studio_core::{find_all_collisions, CanvasDocument};
use studio_export::{ExportFormat, PlatformId};
use tempfile::TempDir;

const OVERLAPPING: &str = r#"{
    "canvas": { "width": 1280, "height": 720 },
    "placements": [
        { "id": "face",  "position": { "x": 30, "y": 50 }, "size": { "width": 30, "height": 50 } },
        { "id": "title", "position": { "x": 40, "y": 50 }, "size": { "width": 30, "height": 20 } },
        { "id": "logo",  "position": { "x": 90, "y": 10, "anchor": "top-right" },
          "size": { "width": 64, "height": 64, "unit": "px" } }
    ]
}"#;

fn write_document(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("design.json");
    std::fs::write(&path, json).expect("write document");
    path
}

fn write_png(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join("art.png");
    image::RgbaImage::from_pixel(width, height, image::Rgba([240, 80, 20, 255]))
        .save(&path)
        .expect("write png");
    path
}

fn parse(args: &[&str]) -> Command {
    let mut argv = vec!["canvas-studio"];
    argv.extend_from_slice(args);
    CliArgs::try_parse_from(argv).expect("parse").command
}

fn document_from(value: serde_json::Value) -> CanvasDocument {
    serde_json::from_value(value).expect("document")
}

// ==========================================================================
// Document commands
// ==========================================================================

#[tokio::test]
async fn test_collisions_command() {
    let dir = TempDir::new().expect("tempdir");
    let doc = write_document(&dir, OVERLAPPING);

    let output = run(parse(&["collisions", doc.to_str().expect("utf8")]))
        .await
        .expect("run");

    assert_eq!(output["face"], serde_json::json!(["title"]));
    assert_eq!(output["title"], serde_json::json!(["face"]));
    assert!(output.get("logo").is_none());
}

#[tokio::test]
async fn test_suggest_command() {
    let dir = TempDir::new().expect("tempdir");
    let doc = write_document(&dir, OVERLAPPING);

    let output = run(parse(&["suggest", doc.to_str().expect("utf8"), "--id", "title"]))
        .await
        .expect("run");
    assert_eq!(output["collision"]["has_collision"], true);
    assert!(output["suggestion"]["x"].is_number());

    let missing = run(parse(&["suggest", doc.to_str().expect("utf8"), "--id", "nope"])).await;
    assert!(missing.is_err());
}

#[tokio::test]
async fn test_resolve_command() {
    let dir = TempDir::new().expect("tempdir");
    let doc = write_document(&dir, OVERLAPPING);

    let output = run(parse(&["resolve", doc.to_str().expect("utf8")]))
        .await
        .expect("run");

    assert_eq!(output["unresolved"], serde_json::json!([]));
    let resolved = document_from(output["document"].clone());
    assert!(find_all_collisions(&resolved.placements, resolved.canvas).is_empty());
}

#[tokio::test]
async fn test_layout_diagonal_command() {
    let dir = TempDir::new().expect("tempdir");
    let doc = write_document(&dir, OVERLAPPING);

    let output = run(parse(&["layout", doc.to_str().expect("utf8"), "--preset", "diagonal"]))
        .await
        .expect("run");
    let laid_out = document_from(output);

    let xs: Vec<f64> = laid_out.placements.iter().map(|p| p.position.x).collect();
    assert_eq!(xs, vec![10.0, 50.0, 90.0]);
}

#[tokio::test]
async fn test_align_and_distribute_commands() {
    let dir = TempDir::new().expect("tempdir");
    let doc = write_document(&dir, OVERLAPPING);
    let path = doc.to_str().expect("utf8");

    let aligned = document_from(run(parse(&["align", path, "--to", "top"])).await.expect("run"));
    assert_eq!(aligned.placements.len(), 3);

    let distributed = document_from(
        run(parse(&["distribute", path, "--axis", "horizontal"]))
            .await
            .expect("run"),
    );
    let ys: Vec<f64> = distributed.placements.iter().map(|p| p.position.y).collect();
    let original = CanvasDocument::from_json(OVERLAPPING).expect("document");
    let original_ys: Vec<f64> = original.placements.iter().map(|p| p.position.y).collect();
    assert_eq!(ys, original_ys);
}

#[tokio::test]
async fn test_arrange_command_centres_vertically() {
    let dir = TempDir::new().expect("tempdir");
    let doc = write_document(&dir, OVERLAPPING);

    let arranged = document_from(
        run(parse(&["arrange", doc.to_str().expect("utf8"), "--distribution", "spread"]))
            .await
            .expect("run"),
    );
    assert!(find_all_collisions(&arranged.placements, arranged.canvas).is_empty());
}

#[tokio::test]
async fn test_invalid_document_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let doc = write_document(&dir, r#"{ "canvas": { "width": 0, "height": 720 } }"#);
    assert!(run(parse(&["collisions", doc.to_str().expect("utf8")])).await.is_err());
}

// ==========================================================================
// Catalog and estimates
// ==========================================================================

#[tokio::test]
async fn test_presets_command() {
    let all = run(parse(&["presets"])).await.expect("run");
    assert_eq!(all.as_array().map(Vec::len), Some(12));

    let twitch = run(parse(&["presets", "--category", "twitch"])).await.expect("run");
    let ids: Vec<&str> = twitch
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["twitch_emote", "twitch_badge", "twitch_panel", "twitch_offline"]);
}

#[tokio::test]
async fn test_estimate_command() {
    let output = run(parse(&[
        "estimate", "--width", "100", "--height", "100", "--format", "jpg", "--quality", "100",
    ]))
    .await
    .expect("run");
    assert_eq!(output["bytes"], 6_000);
    assert_eq!(output["display"], "5.9 KB");
}

// ==========================================================================
// Export
// ==========================================================================

#[tokio::test]
async fn test_export_all_variants_writes_files() {
    let dir = TempDir::new().expect("tempdir");
    let image = write_png(dir.path(), 1920, 1080);
    let out_dir = dir.path().join("out");

    let summary = studio_cli::export(&ExportArgs {
        image,
        platform: PlatformId::TwitchEmote,
        all_variants: true,
        out_dir: out_dir.clone(),
        date: NaiveDate::from_ymd_opt(2025, 1, 31),
        copy: false,
    })
    .await
    .expect("export");

    let names: Vec<&str> = summary.files.iter().map(|f| f.result.filename.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "twitch-emote-112x112-20250131.png",
            "twitch-emote-56x56-20250131.png",
            "twitch-emote-28x28-20250131.png",
        ]
    );
    for file in &summary.files {
        let written = std::fs::read(&file.path).expect("written file");
        assert_eq!(written.len() as u64, file.result.file_size);
        assert_eq!(ExportFormat::from_magic_bytes(&written), Some(ExportFormat::Png));
        assert!(file.validation.valid);
    }
    assert!(out_dir.join("twitch-emote-28x28-20250131.png").exists());
    assert!(summary.clipboard.is_none());
}

#[tokio::test]
async fn test_export_single_platform_reports_validation() {
    let dir = TempDir::new().expect("tempdir");
    let image = write_png(dir.path(), 1000, 1000);

    let summary = studio_cli::export(&ExportArgs {
        image,
        platform: PlatformId::YoutubeThumbnail,
        all_variants: false,
        out_dir: dir.path().to_path_buf(),
        date: NaiveDate::from_ymd_opt(2025, 1, 31),
        copy: false,
    })
    .await
    .expect("export");

    assert_eq!(summary.files.len(), 1);
    let file = &summary.files[0];
    assert_eq!(file.result.filename, "youtube-thumbnail-20250131.jpg");
    assert_eq!((file.result.dimensions.width, file.result.dimensions.height), (720, 720));
    assert!(file.validation.valid);
    assert_eq!(file.validation.warnings.len(), 1);

    let json = serde_json::to_value(&summary).expect("json");
    assert_eq!(json["files"][0]["filename"], "youtube-thumbnail-20250131.jpg");
    assert!(json["files"][0].get("data_url").is_none());
}

#[tokio::test]
async fn test_export_missing_image_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let result = studio_cli::export(&ExportArgs {
        image: dir.path().join("missing.png"),
        platform: PlatformId::Custom,
        all_variants: false,
        out_dir: dir.path().to_path_buf(),
        date: None,
        copy: false,
    })
    .await;
    assert!(result.is_err());
}
