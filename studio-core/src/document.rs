//! Canvas documents - a canvas size plus its placement set, as JSON.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{CanvasDimensions, Placement, PlacementId};
use crate::{StudioError, StudioResult};

/// A canvas and the placements on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Rasterization target size.
    pub canvas: CanvasDimensions,
    /// Placements, in z-order (first is bottom-most).
    #[serde(default)]
    pub placements: Vec<Placement>,
}

impl CanvasDocument {
    /// Create a validated document.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas size is invalid or two placements share
    /// an ID.
    pub fn new(canvas: CanvasDimensions, placements: Vec<Placement>) -> StudioResult<Self> {
        let document = Self { canvas, placements };
        document.validate()?;
        Ok(document)
    }

    /// Check canvas dimensions and ID uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::InvalidDimensions`] or [`StudioError::DuplicateId`].
    pub fn validate(&self) -> StudioResult<()> {
        self.canvas.validate()?;

        let mut seen = HashSet::with_capacity(self.placements.len());
        for placement in &self.placements {
            if !seen.insert(&placement.id) {
                return Err(StudioError::DuplicateId(placement.id.to_string()));
            }
        }
        Ok(())
    }

    /// Get a placement by ID.
    #[must_use]
    pub fn get(&self, id: &PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| &p.id == id)
    }

    /// Placements other than `id`.
    #[must_use]
    pub fn others(&self, id: &PlacementId) -> Vec<Placement> {
        self.placements
            .iter()
            .filter(|p| &p.id != id)
            .cloned()
            .collect()
    }

    /// A document on the same canvas with a replacement placement set.
    #[must_use]
    pub fn with_placements(&self, placements: Vec<Placement>) -> Self {
        Self {
            canvas: self.canvas,
            placements,
        }
    }

    /// Serialize the document to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> StudioResult<String> {
        serde_json::to_string_pretty(self).map_err(StudioError::Serialization)
    }

    /// Deserialize and validate a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the document is invalid.
    pub fn from_json(json: &str) -> StudioResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Anchor, SizeUnit};

    const SAMPLE: &str = r#"{
        "canvas": { "width": 1280, "height": 720 },
        "placements": [
            {
                "id": "logo",
                "position": { "x": 10, "y": 10, "anchor": "top-left" },
                "size": { "width": 64, "height": 64, "unit": "pixel" }
            },
            {
                "id": "title",
                "position": { "x": 50, "y": 80 },
                "size": { "width": 60, "height": 15 }
            }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let document = CanvasDocument::from_json(SAMPLE).expect("parse");
        assert_eq!(document.placements.len(), 2);

        let logo = document.get(&PlacementId::from("logo")).expect("logo");
        assert_eq!(logo.position.anchor, Anchor::TopLeft);
        assert_eq!(logo.size.unit, SizeUnit::Pixel);

        let title = document.get(&PlacementId::from("title")).expect("title");
        assert_eq!(title.position.anchor, Anchor::Center);
        assert_eq!(title.size.unit, SizeUnit::Percent);
    }

    #[test]
    fn test_json_round_trip() {
        let document = CanvasDocument::from_json(SAMPLE).expect("parse");
        let json = document.to_json().expect("serialize");
        let restored = CanvasDocument::from_json(&json).expect("reparse");
        assert_eq!(restored, document);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let canvas = CanvasDimensions::new(100.0, 100.0).expect("dims");
        let result = CanvasDocument::new(
            canvas,
            vec![
                Placement::centered("a", 10.0, 10.0, 5.0, 5.0),
                Placement::centered("a", 20.0, 20.0, 5.0, 5.0),
            ],
        );
        assert!(matches!(result, Err(StudioError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_rejects_bad_canvas() {
        let json = r#"{ "canvas": { "width": 0, "height": 720 } }"#;
        assert!(matches!(
            CanvasDocument::from_json(json),
            Err(StudioError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_others_excludes_target() {
        let document = CanvasDocument::from_json(SAMPLE).expect("parse");
        let others = document.others(&PlacementId::from("logo"));
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].id, PlacementId::from("title"));
    }
}
