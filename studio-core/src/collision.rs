//! Pairwise overlap tests across a placement set.
//!
//! Boxes that merely touch along an edge do not collide.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{bounding_box_of, BoundingBox};
use crate::model::{CanvasDimensions, Placement, PlacementId};

/// Outcome of testing one placement against a set of others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionResult {
    /// Whether any overlap was found.
    pub has_collision: bool,
    /// IDs of every overlapping placement, in scan order.
    pub overlapping_ids: Vec<PlacementId>,
    /// Sum of the pairwise overlap areas, in square pixels.
    pub overlap_area: f64,
}

/// Axis-aligned overlap test.
#[must_use]
pub fn overlaps(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// Area shared by two boxes; `0.0` when they are disjoint.
#[must_use]
pub fn overlap_area(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let x_overlap = (a.right().min(b.right()) - a.x.max(b.x)).max(0.0);
    let y_overlap = (a.bottom().min(b.bottom()) - a.y.max(b.y)).max(0.0);
    x_overlap * y_overlap
}

/// Map every colliding placement to the IDs it overlaps.
///
/// Placements with no collisions have no entry.
#[must_use]
pub fn find_all_collisions(
    placements: &[Placement],
    dims: CanvasDimensions,
) -> BTreeMap<PlacementId, Vec<PlacementId>> {
    let boxes: Vec<BoundingBox> = placements
        .iter()
        .map(|p| bounding_box_of(p, dims))
        .collect();

    let mut collisions = BTreeMap::new();
    for (i, placement) in placements.iter().enumerate() {
        let hits: Vec<PlacementId> = placements
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .filter(|(j, _)| overlaps(&boxes[i], &boxes[*j]))
            .map(|(_, other)| other.id.clone())
            .collect();

        if !hits.is_empty() {
            collisions.insert(placement.id.clone(), hits);
        }
    }
    collisions
}

/// Test `placement` against `others`, skipping any entry with the same ID.
#[must_use]
pub fn check_placement_collision(
    placement: &Placement,
    others: &[Placement],
    dims: CanvasDimensions,
) -> CollisionResult {
    let target = bounding_box_of(placement, dims);
    let mut result = CollisionResult::default();

    for other in others.iter().filter(|o| o.id != placement.id) {
        let other_box = bounding_box_of(other, dims);
        if overlaps(&target, &other_box) {
            result.overlapping_ids.push(other.id.clone());
            result.overlap_area += overlap_area(&target, &other_box);
        }
    }

    result.has_collision = !result.overlapping_ids.is_empty();
    result
}
