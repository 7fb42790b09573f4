//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use studio_core::{
    Alignment, ArrangeAlignment, Distribution, LayoutPreset, DEFAULT_DISTRIBUTE_PADDING,
};
use studio_export::{ExportFormat, PlatformCategory, PlatformId};

/// Command-line arguments for canvas-studio.
#[derive(Debug, Clone, Parser)]
#[command(name = "canvas-studio")]
#[command(about = "Collision checks, layout and platform export for Canvas Studio designs")]
#[command(version)]
pub struct CliArgs {
    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands. Document commands read a canvas document JSON file and print
/// JSON to stdout.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every placement's overlapping neighbours
    Collisions {
        /// Canvas document
        document: PathBuf,
    },

    /// Suggest a collision-free position for one placement
    Suggest {
        /// Canvas document
        document: PathBuf,
        /// Placement to move
        #[arg(long)]
        id: String,
    },

    /// Move colliding placements to free spots, in document order
    Resolve {
        /// Canvas document
        document: PathBuf,
    },

    /// Apply a layout preset
    Layout {
        /// Canvas document
        document: PathBuf,
        /// centered, left-heavy, right-heavy, grid, diagonal or stacked
        #[arg(long)]
        preset: LayoutPreset,
    },

    /// Arrange placements in one vertically centred row
    Arrange {
        /// Canvas document
        document: PathBuf,
        /// Horizontal padding in pixels
        #[arg(long, default_value_t = 20.0)]
        padding: f64,
        /// Gap between packed elements in pixels
        #[arg(long, default_value_t = 10.0)]
        spacing: f64,
        /// start, center or end
        #[arg(long, default_value = "center")]
        alignment: ArrangeAlignment,
        /// packed or spread
        #[arg(long, default_value = "packed")]
        distribution: Distribution,
    },

    /// Align placements to a shared edge or centre line
    Align {
        /// Canvas document
        document: PathBuf,
        /// left, right, center, top, bottom or middle
        #[arg(long = "to")]
        alignment: Alignment,
    },

    /// Space placement centres evenly along one axis
    Distribute {
        /// Canvas document
        document: PathBuf,
        /// Axis to distribute along
        #[arg(long, value_enum)]
        axis: Axis,
        /// Padding from both canvas edges, in percent
        #[arg(long, default_value_t = DEFAULT_DISTRIBUTE_PADDING)]
        padding: f64,
    },

    /// List platform export presets
    Presets {
        /// Only list one category
        #[arg(long)]
        category: Option<PlatformCategory>,
    },

    /// Estimate the encoded size of an image
    Estimate {
        /// Width in pixels
        #[arg(long)]
        width: u32,
        /// Height in pixels
        #[arg(long)]
        height: u32,
        /// png, jpg or webp
        #[arg(long, default_value = "png")]
        format: ExportFormat,
        /// Encoder quality, 0-100
        #[arg(long, default_value_t = 92, value_parser = clap::value_parser!(u8).range(0..=100))]
        quality: u8,
    },

    /// Export an image for a platform and write the files
    Export(ExportArgs),
}

/// Arguments of the `export` subcommand.
#[derive(Debug, Clone, clap::Args)]
pub struct ExportArgs {
    /// PNG, JPEG or WebP file to export
    pub image: PathBuf,

    /// Platform preset id, e.g. twitch_emote
    #[arg(long)]
    pub platform: PlatformId,

    /// Export every size variant the platform declares
    #[arg(long)]
    pub all_variants: bool,

    /// Directory the files are written to
    #[arg(long, env = "CANVAS_STUDIO_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Date stamped into filenames (YYYY-MM-DD), today if unset
    #[arg(long, env = "CANVAS_STUDIO_DATE")]
    pub date: Option<NaiveDate>,

    /// Also copy the first export to the system clipboard
    #[arg(long)]
    pub copy: bool,
}

/// Distribution axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}
