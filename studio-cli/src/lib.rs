//! # Canvas Studio CLI
//!
//! Drives the geometry core and the export pipeline from the shell.
//!
//! ## Usage
//!
//! ```bash
//! canvas-studio collisions design.json
//! canvas-studio layout design.json --preset grid
//! canvas-studio export art.png --platform twitch_emote --all-variants --out-dir out/
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.
//!
//! ## Architecture
//!
//! - `CliArgs` - command-line arguments parsed with clap
//! - `commands::run` - executes one subcommand and returns its JSON output

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod cli;
pub mod commands;

pub use cli::{Axis, CliArgs, Command, ExportArgs};
pub use commands::{export, load_document, run, ExportSummary, ExportedFile};
