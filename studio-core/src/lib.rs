//! # Canvas Studio Core
//!
//! Geometry for percent-positioned design elements: bounding boxes, collision
//! detection, collision-free placement search, and layout operations.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 studio-core                 │
//! ├──────────────────────┬──────────────────────┤
//! │  Placement Search    │  Layout Engine       │
//! │  - Spiral walk       │  - Presets           │
//! │  - Fallback corners  │  - Auto-arrange      │
//! │  - Resolve all       │  - Align/distribute  │
//! ├──────────────────────┴──────────────────────┤
//! │  Collision Detector                         │
//! ├─────────────────────────────────────────────┤
//! │  Geometry Core (percent ⇄ pixel boxes)      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! All functions are synchronous and pure: they borrow their inputs and
//! return new placement sets.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collision;
pub mod document;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod search;

pub use collision::{
    check_placement_collision, find_all_collisions, overlap_area, overlaps, CollisionResult,
};
pub use document::CanvasDocument;
pub use error::{StudioError, StudioResult};
pub use geometry::{bounding_box_of, position_for_box, resolve_size, BoundingBox};
pub use layout::{
    align_elements, apply_layout_preset, auto_arrange, distribute_horizontally,
    distribute_vertically, grid_shape, Alignment, ArrangeAlignment, ArrangeOptions, Distribution,
    LayoutPreset, DEFAULT_DISTRIBUTE_PADDING,
};
pub use model::{
    Anchor, CanvasDimensions, PercentPoint, Placement, PlacementId, Position, Size, SizeUnit,
};
pub use search::{
    resolve_collisions, suggest_non_colliding_position, ResolveOutcome, SpiralSearch,
    SpiralWalker, FALLBACK_POSITIONS,
};

/// Canvas studio core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
