//! Placement search - finding a nearby collision-free spot for a placement.
//!
//! ## Search order
//!
//! ```text
//!   Square spiral (cell = 5% of the canvas)       Fallback positions
//!
//!    ┌────┬────┬────┬────┐                     1 ●───── 5 ─────● 2
//!    │  6 │  7 │  8 │  9 │                       │               │
//!    ├────┼────┼────┼────┤                       7               8
//!    │  5 │  0 │  1 │ 10 │                       │               │
//!    ├────┼────┼────┼────┤                     3 ●───── 6 ─────● 4
//!    │  4 │  3 │  2 │ 11 │
//!    └────┴────┴────┴────┘
//! ```
//!
//! The spiral is capped at a fixed number of steps; when it runs dry the
//! eight fallback positions are tried in order. If those fail too, the search
//! reports `None` and the caller decides what to do with the collision.

use serde::{Deserialize, Serialize};

use crate::collision::check_placement_collision;
use crate::geometry::bounding_box_of;
use crate::model::{CanvasDimensions, PercentPoint, Placement, PlacementId};

/// Default spiral step, in percent of the canvas.
pub const DEFAULT_STEP_PERCENT: f64 = 5.0;

/// Default number of spiral steps before falling back.
pub const DEFAULT_MAX_STEPS: usize = 100;

/// Positions tried, in order, once the spiral budget is exhausted.
pub const FALLBACK_POSITIONS: [PercentPoint; 8] = [
    PercentPoint::new(10.0, 10.0),
    PercentPoint::new(90.0, 10.0),
    PercentPoint::new(10.0, 90.0),
    PercentPoint::new(90.0, 90.0),
    PercentPoint::new(50.0, 10.0),
    PercentPoint::new(50.0, 90.0),
    PercentPoint::new(10.0, 50.0),
    PercentPoint::new(90.0, 50.0),
];

/// Square-spiral enumeration of grid cells around `(0, 0)`.
///
/// Starts moving right and turns 90° clockwise (screen coordinates, y grows
/// downwards) whenever the current segment is used up. The segment grows by
/// one cell after every second turn, so each cell is visited exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpiralWalker {
    cell: (i32, i32),
    dx: i32,
    dy: i32,
    segment_length: u32,
    segment_passed: u32,
    turns: u32,
}

impl SpiralWalker {
    /// Create a walker positioned at the origin, facing right.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: (0, 0),
            dx: 1,
            dy: 0,
            segment_length: 1,
            segment_passed: 0,
            turns: 0,
        }
    }

    /// Length of the segment currently being walked.
    #[must_use]
    pub const fn segment_length(&self) -> u32 {
        self.segment_length
    }

    /// Current heading as `(dx, dy)`.
    #[must_use]
    pub const fn direction(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }
}

impl Default for SpiralWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SpiralWalker {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        self.cell = (self.cell.0 + self.dx, self.cell.1 + self.dy);
        self.segment_passed += 1;

        if self.segment_passed == self.segment_length {
            self.segment_passed = 0;
            (self.dx, self.dy) = (-self.dy, self.dx);
            self.turns += 1;
            if self.turns % 2 == 0 {
                self.segment_length += 1;
            }
        }

        Some(self.cell)
    }
}

/// Configuration for the spiral placement search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralSearch {
    /// Distance between spiral cells, in percent of the canvas.
    pub step_percent: f64,
    /// Number of spiral cells to try before the fallback positions.
    pub max_steps: usize,
}

impl Default for SpiralSearch {
    fn default() -> Self {
        Self {
            step_percent: DEFAULT_STEP_PERCENT,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl SpiralSearch {
    /// Suggest a collision-free position for `placement` among `others`.
    ///
    /// Returns the current position unchanged when it already collides with
    /// nothing, and `None` when no in-bounds, collision-free position exists
    /// within the search budget.
    #[must_use]
    pub fn suggest(
        &self,
        placement: &Placement,
        others: &[Placement],
        dims: CanvasDimensions,
    ) -> Option<PercentPoint> {
        if !check_placement_collision(placement, others, dims).has_collision {
            return Some(placement.point());
        }

        let fits = |point: &PercentPoint| {
            let candidate = placement.moved_to(*point);
            bounding_box_of(&candidate, dims).is_within(dims)
                && !check_placement_collision(&candidate, others, dims).has_collision
        };

        let origin = placement.point();
        let spiral_hit = SpiralWalker::new()
            .take(self.max_steps)
            .map(|(cx, cy)| {
                PercentPoint::new(
                    f64::from(cx).mul_add(self.step_percent, origin.x),
                    f64::from(cy).mul_add(self.step_percent, origin.y),
                )
            })
            .find(|point| fits(point));

        if let Some(point) = spiral_hit {
            tracing::debug!(
                id = %placement.id,
                x = point.x,
                y = point.y,
                "Spiral search found position"
            );
            return Some(point);
        }

        let fallback = FALLBACK_POSITIONS.iter().copied().find(|point| fits(point));
        match fallback {
            Some(point) => {
                tracing::debug!(
                    id = %placement.id,
                    x = point.x,
                    y = point.y,
                    "Using fallback position"
                );
            }
            None => {
                tracing::warn!(id = %placement.id, "No collision-free position found");
            }
        }
        fallback
    }
}

/// Suggest a collision-free position using the default search settings.
#[must_use]
pub fn suggest_non_colliding_position(
    placement: &Placement,
    others: &[Placement],
    dims: CanvasDimensions,
) -> Option<PercentPoint> {
    SpiralSearch::default().suggest(placement, others, dims)
}

/// Result of resolving collisions across a whole placement set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveOutcome {
    /// The new placement set, in input order.
    pub placements: Vec<Placement>,
    /// Placements left where they were because no free spot was found.
    pub unresolved: Vec<PlacementId>,
}

/// Move every placement that collides with an earlier one to a suggested
/// position.
///
/// Placements are settled in input order, so earlier entries win their
/// spot. The input is not modified.
#[must_use]
pub fn resolve_collisions(placements: &[Placement], dims: CanvasDimensions) -> ResolveOutcome {
    let search = SpiralSearch::default();
    let mut outcome = ResolveOutcome {
        placements: Vec::with_capacity(placements.len()),
        unresolved: Vec::new(),
    };

    for placement in placements {
        match search.suggest(placement, &outcome.placements, dims) {
            Some(point) => outcome.placements.push(placement.moved_to(point)),
            None => {
                outcome.unresolved.push(placement.id.clone());
                outcome.placements.push(placement.clone());
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::collision::find_all_collisions;
    use proptest::prelude::*;

    const DIMS: CanvasDimensions = CanvasDimensions {
        width: 1000.0,
        height: 1000.0,
    };

    #[test]
    fn test_spiral_order() {
        let cells: Vec<_> = SpiralWalker::new().take(9).collect();
        assert_eq!(
            cells,
            vec![
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
                (0, -1),
                (1, -1),
                (2, -1),
            ]
        );
    }

    #[test]
    fn test_spiral_never_revisits() {
        let cells: Vec<_> = SpiralWalker::new().take(10_000).collect();
        let unique: HashSet<_> = cells.iter().copied().collect();
        assert_eq!(unique.len(), cells.len());
        assert!(!unique.contains(&(0, 0)));
    }

    #[test]
    fn test_spiral_segment_growth() {
        let mut walker = SpiralWalker::new();
        let mut lengths = Vec::new();
        for _ in 0..12 {
            walker.next();
            lengths.push(walker.segment_length());
        }
        // Segments of 1,1,2,2,3,3 cells: growth happens after every second turn.
        assert_eq!(lengths, vec![1, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4]);
        assert_eq!(walker.direction(), (-1, 0));
    }

    #[test]
    fn test_spiral_fills_square_rings() {
        // 8 steps complete ring 1, 24 steps complete ring 2.
        let ring_two: HashSet<_> = SpiralWalker::new().take(24).collect();
        for x in -2..=2 {
            for y in -2..=2 {
                if (x, y) != (0, 0) {
                    assert!(ring_two.contains(&(x, y)), "missing ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_returns_current_position_without_collision() {
        let placement = Placement::centered("a", 30.0, 40.0, 10.0, 10.0);
        let others = vec![Placement::centered("b", 80.0, 80.0, 10.0, 10.0)];
        assert_eq!(
            suggest_non_colliding_position(&placement, &others, DIMS),
            Some(PercentPoint::new(30.0, 40.0))
        );
    }

    #[test]
    fn test_first_free_spiral_cell() {
        let placement = Placement::centered("a", 50.0, 50.0, 10.0, 10.0);
        let others = vec![Placement::centered("b", 50.0, 50.0, 10.0, 10.0)];

        let suggestion =
            suggest_non_colliding_position(&placement, &others, DIMS).expect("position");
        let moved = placement.moved_to(suggestion);
        assert!(bounding_box_of(&moved, DIMS).is_within(DIMS));
        assert!(!check_placement_collision(&moved, &others, DIMS).has_collision);
    }

    #[test]
    fn test_fallback_after_spiral_exhausted() {
        let placement = Placement::centered("a", 50.0, 50.0, 10.0, 10.0);
        // Blocks 15%..85% on both axes: every spiral cell within 25% of the
        // centre stays inside it.
        let others = vec![Placement::centered("block", 50.0, 50.0, 70.0, 70.0)];

        assert_eq!(
            suggest_non_colliding_position(&placement, &others, DIMS),
            Some(PercentPoint::new(10.0, 10.0))
        );
    }

    #[test]
    fn test_fallback_order() {
        let placement = Placement::centered("a", 50.0, 50.0, 10.0, 10.0);
        let others = vec![
            Placement::centered("block", 50.0, 50.0, 10.0, 10.0),
            Placement::centered("tl", 10.0, 10.0, 10.0, 10.0),
            Placement::centered("tr", 90.0, 10.0, 10.0, 10.0),
        ];
        let search = SpiralSearch {
            max_steps: 0,
            ..SpiralSearch::default()
        };

        assert_eq!(
            search.suggest(&placement, &others, DIMS),
            Some(PercentPoint::new(10.0, 90.0))
        );
    }

    #[test]
    fn test_fully_blocked_canvas_terminates() {
        let placement = Placement::centered("a", 50.0, 50.0, 10.0, 10.0);
        let others = vec![Placement::centered("wall", 50.0, 50.0, 100.0, 100.0)];
        assert_eq!(suggest_non_colliding_position(&placement, &others, DIMS), None);
    }

    #[test]
    fn test_oversized_placement_has_no_position() {
        let placement = Placement::centered("giant", 50.0, 50.0, 120.0, 20.0);
        let others = vec![Placement::centered("b", 50.0, 50.0, 10.0, 10.0)];
        assert_eq!(suggest_non_colliding_position(&placement, &others, DIMS), None);
    }

    #[test]
    fn test_resolve_collisions() {
        let placements = vec![
            Placement::centered("a", 50.0, 50.0, 20.0, 20.0),
            Placement::centered("b", 52.0, 50.0, 20.0, 20.0),
            Placement::centered("c", 48.0, 52.0, 20.0, 20.0),
        ];

        let outcome = resolve_collisions(&placements, DIMS);
        assert!(outcome.unresolved.is_empty());
        assert_eq!(outcome.placements.len(), 3);
        assert_eq!(outcome.placements[0], placements[0]);
        assert!(find_all_collisions(&outcome.placements, DIMS).is_empty());
        // Input untouched
        assert!((placements[1].position.x - 52.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_reports_unresolved() {
        let placements = vec![
            Placement::centered("wall", 50.0, 50.0, 100.0, 100.0),
            Placement::centered("b", 50.0, 50.0, 10.0, 10.0),
        ];

        let outcome = resolve_collisions(&placements, DIMS);
        assert_eq!(outcome.unresolved, vec![PlacementId::from("b")]);
        assert_eq!(outcome.placements[1], placements[1]);
    }

    fn arb_placement(id: &'static str) -> impl Strategy<Value = Placement> {
        (5.0f64..30.0, 5.0f64..30.0)
            .prop_flat_map(|(w, h)| {
                (
                    (w / 2.0)..(100.0 - w / 2.0),
                    (h / 2.0)..(100.0 - h / 2.0),
                    Just(w),
                    Just(h),
                )
            })
            .prop_map(move |(x, y, w, h)| Placement::centered(id, x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_suggestion_is_in_bounds_and_free(
            target in arb_placement("target"),
            a in arb_placement("a"),
            b in arb_placement("b"),
            c in arb_placement("c"),
        ) {
            let others = vec![a, b, c];
            if let Some(point) = suggest_non_colliding_position(&target, &others, DIMS) {
                let moved = target.moved_to(point);
                prop_assert!(bounding_box_of(&moved, DIMS).is_within(DIMS));
                prop_assert!(!check_placement_collision(&moved, &others, DIMS).has_collision);
            }
        }

        #[test]
        fn prop_idempotent_when_clear(target in arb_placement("target")) {
            prop_assert_eq!(
                suggest_non_colliding_position(&target, &[], DIMS),
                Some(target.point())
            );
        }
    }
}
