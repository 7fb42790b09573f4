//! Placement data model - the spatial descriptors of assets on a canvas.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{StudioError, StudioResult};

/// Unique identifier for a placement within a placement set.
///
/// Identifiers are opaque and stable across edits; they are the only join key
/// used by collision and layout results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(String);

impl PlacementId {
    /// Create a new unique placement ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PlacementId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for PlacementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlacementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlacementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Size of the rasterization target in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl CanvasDimensions {
    /// Create validated canvas dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::InvalidDimensions`] if either side is not a
    /// finite, positive number.
    pub fn new(width: f64, height: f64) -> StudioResult<Self> {
        let dims = Self { width, height };
        dims.validate()?;
        Ok(dims)
    }

    /// Check that both sides are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::InvalidDimensions`] otherwise.
    pub fn validate(&self) -> StudioResult<()> {
        let valid = |side: f64| side.is_finite() && side > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(StudioError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Which point of an element's box its declared `(x, y)` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// The centre of the box.
    #[default]
    Center,
    /// The top-left corner.
    TopLeft,
    /// The top-right corner.
    TopRight,
    /// The bottom-left corner.
    BottomLeft,
    /// The bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// Parse an anchor name. Unknown names fall back to [`Anchor::Center`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "top-left" => Self::TopLeft,
            "top-right" => Self::TopRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-right" => Self::BottomRight,
            _ => Self::Center,
        }
    }
}

impl<'de> Deserialize<'de> for Anchor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Center, Self::from_name))
    }
}

/// Unit a [`Size`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    /// Percent of the canvas width/height.
    #[default]
    Percent,
    /// Absolute pixels.
    #[serde(alias = "px")]
    Pixel,
}

/// Declared position of a placement, in percent of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal position, 0-100.
    pub x: f64,
    /// Vertical position, 0-100.
    pub y: f64,
    /// Point of the box that `(x, y)` designates.
    #[serde(default)]
    pub anchor: Anchor,
}

/// Declared size of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in `unit`.
    pub width: f64,
    /// Height in `unit`.
    pub height: f64,
    /// Unit of `width` and `height`.
    #[serde(default)]
    pub unit: SizeUnit,
}

/// A percent-space point, as produced by placement search and layout presets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentPoint {
    /// Horizontal position, 0-100.
    pub x: f64,
    /// Vertical position, 0-100.
    pub y: f64,
}

impl PercentPoint {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An asset's spatial descriptor on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Stable identifier.
    pub id: PlacementId,
    /// Declared position.
    pub position: Position,
    /// Declared size.
    pub size: Size,
}

impl Placement {
    /// Create a placement.
    #[must_use]
    pub fn new(id: impl Into<PlacementId>, position: Position, size: Size) -> Self {
        Self {
            id: id.into(),
            position,
            size,
        }
    }

    /// Create a centre-anchored placement with a percent size.
    #[must_use]
    pub fn centered(id: impl Into<PlacementId>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            id,
            Position {
                x,
                y,
                anchor: Anchor::Center,
            },
            Size {
                width,
                height,
                unit: SizeUnit::Percent,
            },
        )
    }

    /// Set the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.position.anchor = anchor;
        self
    }

    /// Set the size unit.
    #[must_use]
    pub fn with_unit(mut self, unit: SizeUnit) -> Self {
        self.size.unit = unit;
        self
    }

    /// Return a copy of this placement moved to `point`, keeping size and anchor.
    #[must_use]
    pub fn moved_to(&self, point: PercentPoint) -> Self {
        let mut moved = self.clone();
        moved.position.x = point.x;
        moved.position.y = point.y;
        moved
    }

    /// Current `(x, y)` as a point.
    #[must_use]
    pub fn point(&self) -> PercentPoint {
        PercentPoint::new(self.position.x, self.position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_validation() {
        assert!(CanvasDimensions::new(1920.0, 1080.0).is_ok());
        assert!(CanvasDimensions::new(0.0, 1080.0).is_err());
        assert!(CanvasDimensions::new(1920.0, -1.0).is_err());
        assert!(CanvasDimensions::new(f64::NAN, 10.0).is_err());
        assert!(CanvasDimensions::new(f64::INFINITY, 10.0).is_err());
    }

    #[test]
    fn test_anchor_deserialize_defaults_to_center() {
        let known: Anchor = serde_json::from_str("\"bottom-right\"").expect("anchor");
        assert_eq!(known, Anchor::BottomRight);

        let unknown: Anchor = serde_json::from_str("\"middle-ish\"").expect("anchor");
        assert_eq!(unknown, Anchor::Center);

        let null: Anchor = serde_json::from_str("null").expect("anchor");
        assert_eq!(null, Anchor::Center);
    }

    #[test]
    fn test_position_without_anchor() {
        let position: Position = serde_json::from_str(r#"{"x": 10, "y": 20}"#).expect("position");
        assert_eq!(position.anchor, Anchor::Center);
    }

    #[test]
    fn test_size_unit_aliases() {
        let size: Size =
            serde_json::from_str(r#"{"width": 64, "height": 64, "unit": "px"}"#).expect("size");
        assert_eq!(size.unit, SizeUnit::Pixel);

        let size: Size = serde_json::from_str(r#"{"width": 10, "height": 10}"#).expect("size");
        assert_eq!(size.unit, SizeUnit::Percent);
    }

    #[test]
    fn test_moved_to_keeps_size_and_anchor() {
        let placement =
            Placement::centered("logo", 50.0, 50.0, 10.0, 10.0).with_anchor(Anchor::TopLeft);
        let moved = placement.moved_to(PercentPoint::new(20.0, 30.0));

        assert_eq!(moved.id, placement.id);
        assert_eq!(moved.size, placement.size);
        assert_eq!(moved.position.anchor, Anchor::TopLeft);
        assert_eq!(moved.point(), PercentPoint::new(20.0, 30.0));
        // Original untouched
        assert_eq!(placement.point(), PercentPoint::new(50.0, 50.0));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(PlacementId::new(), PlacementId::new());
        assert_eq!(PlacementId::from("hero").as_str(), "hero");
    }
}
