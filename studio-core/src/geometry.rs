//! Conversion between percent placements and pixel bounding boxes.
//!
//! ```text
//!   (x%, y%) ──► anchor point (px) ──► minus anchor offset ──► top-left box
//!
//!   TopLeft ●─────────● TopRight
//!           │         │
//!           │    ●    │  Center
//!           │         │
//!   BotLeft ●─────────● BotRight
//! ```

use serde::{Deserialize, Serialize};

use crate::model::{Anchor, CanvasDimensions, Placement, Position, Size, SizeUnit};

/// Resolved pixel-space rectangle, always anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl BoundingBox {
    /// Create a new box.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal centre.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical centre.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Area in square pixels.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether the box lies fully inside the canvas.
    #[must_use]
    pub fn is_within(&self, dims: CanvasDimensions) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= dims.width && self.bottom() <= dims.height
    }
}

/// Resolve a declared size to pixels.
#[must_use]
pub fn resolve_size(size: Size, dims: CanvasDimensions) -> (f64, f64) {
    match size.unit {
        SizeUnit::Percent => (
            size.width / 100.0 * dims.width,
            size.height / 100.0 * dims.height,
        ),
        SizeUnit::Pixel => (size.width, size.height),
    }
}

/// Offset from the anchor point to the box's top-left corner.
fn anchor_offset(anchor: Anchor, width: f64, height: f64) -> (f64, f64) {
    match anchor {
        Anchor::Center => (width / 2.0, height / 2.0),
        Anchor::TopLeft => (0.0, 0.0),
        Anchor::TopRight => (width, 0.0),
        Anchor::BottomLeft => (0.0, height),
        Anchor::BottomRight => (width, height),
    }
}

/// Compute the pixel bounding box of a placement.
#[must_use]
pub fn bounding_box_of(placement: &Placement, dims: CanvasDimensions) -> BoundingBox {
    let (width, height) = resolve_size(placement.size, dims);
    let point_x = placement.position.x / 100.0 * dims.width;
    let point_y = placement.position.y / 100.0 * dims.height;
    let (off_x, off_y) = anchor_offset(placement.position.anchor, width, height);

    BoundingBox::new(point_x - off_x, point_y - off_y, width, height)
}

/// Find the position that puts `placement`'s box top-left corner at
/// `(left, top)` pixels, keeping its anchor and size.
#[must_use]
pub fn position_for_box(
    placement: &Placement,
    left: f64,
    top: f64,
    dims: CanvasDimensions,
) -> Position {
    let (width, height) = resolve_size(placement.size, dims);
    let anchor = placement.position.anchor;
    let (off_x, off_y) = anchor_offset(anchor, width, height);

    Position {
        x: (left + off_x) / dims.width * 100.0,
        y: (top + off_y) / dims.height * 100.0,
        anchor,
    }
}
