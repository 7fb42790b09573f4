//! Layout engine - presets, auto-arrange, alignment and distribution.
//!
//! Every operation takes a placement slice and returns a new `Vec`; inputs are
//! never modified. Elements are moved through their bounding boxes, so all
//! operations respect each placement's own anchor and size.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{bounding_box_of, position_for_box, BoundingBox};
use crate::model::{CanvasDimensions, PercentPoint, Placement};
use crate::{StudioError, StudioResult};

/// Default padding for [`distribute_horizontally`] and
/// [`distribute_vertically`], in percent.
pub const DEFAULT_DISTRIBUTE_PADDING: f64 = 10.0;

/// Named, deterministic position generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    /// A single row centred on the canvas.
    Centered,
    /// A hero on the left, the rest stacked along the right edge.
    LeftHeavy,
    /// A hero on the right, the rest stacked along the left edge.
    RightHeavy,
    /// A centred grid of equal cells.
    Grid,
    /// A top-left to bottom-right diagonal.
    Diagonal,
    /// A single column centred on the canvas.
    Stacked,
}

impl LayoutPreset {
    /// Every preset, in display order.
    pub const ALL: [Self; 6] = [
        Self::Centered,
        Self::LeftHeavy,
        Self::RightHeavy,
        Self::Grid,
        Self::Diagonal,
        Self::Stacked,
    ];

    /// Preset name as used in documents and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Centered => "centered",
            Self::LeftHeavy => "left-heavy",
            Self::RightHeavy => "right-heavy",
            Self::Grid => "grid",
            Self::Diagonal => "diagonal",
            Self::Stacked => "stacked",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Centered => "Centre all elements in a single row",
            Self::LeftHeavy => "Feature one element on the left, stack the rest on the right",
            Self::RightHeavy => "Feature one element on the right, stack the rest on the left",
            Self::Grid => "Arrange elements in an even grid",
            Self::Diagonal => "Cascade elements from top-left to bottom-right",
            Self::Stacked => "Stack elements in a single centred column",
        }
    }

    /// Generate `count` percent positions. `count == 0` yields no positions.
    #[must_use]
    pub fn positions(self, count: usize) -> Vec<PercentPoint> {
        if count == 0 {
            return Vec::new();
        }

        match self {
            Self::Centered => centered_line(count, 20.0)
                .map(|x| PercentPoint::new(x, 50.0))
                .collect(),
            Self::Stacked => centered_line(count, 15.0)
                .map(|y| PercentPoint::new(50.0, y))
                .collect(),
            Self::LeftHeavy => hero_layout(count, 30.0, 75.0),
            Self::RightHeavy => hero_layout(count, 70.0, 25.0),
            Self::Grid => grid_positions(count),
            Self::Diagonal => diagonal_positions(count),
        }
    }
}

impl std::fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutPreset {
    type Err = StudioError;

    fn from_str(name: &str) -> StudioResult<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| StudioError::UnknownPreset(name.to_string()))
    }
}

/// Coordinates of `count` points on a line centred at 50, at most
/// `max_spacing` apart and never beyond 10..90.
#[allow(clippy::cast_precision_loss)]
fn centered_line(count: usize, max_spacing: f64) -> impl Iterator<Item = f64> {
    let spacing = if count > 1 {
        max_spacing.min(80.0 / (count - 1) as f64)
    } else {
        0.0
    };
    let middle = (count - 1) as f64 / 2.0;
    (0..count).map(move |i| (i as f64 - middle).mul_add(spacing, 50.0))
}

/// One hero position plus the remainder spread along a vertical edge.
#[allow(clippy::cast_precision_loss)]
fn hero_layout(count: usize, hero_x: f64, edge_x: f64) -> Vec<PercentPoint> {
    let mut positions = Vec::with_capacity(count);
    positions.push(PercentPoint::new(hero_x, 50.0));
    positions.extend(
        (1..count).map(|i| PercentPoint::new(edge_x, i as f64 * 100.0 / count as f64)),
    );
    positions
}

/// Column and row counts for a grid of `count` cells.
#[must_use]
pub fn grid_shape(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let mut cols = 1;
    while cols * cols < count {
        cols += 1;
    }
    (cols, count.div_ceil(cols))
}

#[allow(clippy::cast_precision_loss)]
fn grid_positions(count: usize) -> Vec<PercentPoint> {
    let (cols, rows) = grid_shape(count);
    let cell_w = 100.0 / cols as f64;
    let cell_h = 100.0 / rows as f64;

    (0..count)
        .map(|i| {
            let col = (i % cols) as f64;
            let row = (i / cols) as f64;
            PercentPoint::new((col + 0.5) * cell_w, (row + 0.5) * cell_h)
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn diagonal_positions(count: usize) -> Vec<PercentPoint> {
    if count == 1 {
        return vec![PercentPoint::new(50.0, 50.0)];
    }
    let last = (count - 1) as f64;
    (0..count)
        .map(|i| {
            let t = (i as f64 / last).mul_add(80.0, 10.0);
            PercentPoint::new(t, t)
        })
        .collect()
}

/// Apply a preset's positions to `placements` by index.
///
/// Size and anchor are kept; only `x`/`y` change.
#[must_use]
pub fn apply_layout_preset(
    placements: &[Placement],
    preset: LayoutPreset,
    dims: CanvasDimensions,
) -> Vec<Placement> {
    let arranged: Vec<Placement> = placements
        .iter()
        .zip(preset.positions(placements.len()))
        .map(|(placement, point)| placement.moved_to(point))
        .collect();

    let out_of_bounds = arranged
        .iter()
        .filter(|p| !bounding_box_of(p, dims).is_within(dims))
        .count();
    tracing::debug!(
        preset = preset.name(),
        count = arranged.len(),
        out_of_bounds,
        "Applied layout preset"
    );

    arranged
}

/// Block alignment for [`auto_arrange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrangeAlignment {
    /// Flush with the left padding.
    Start,
    /// Centred between the paddings.
    #[default]
    Center,
    /// Flush with the right padding.
    End,
}

/// Gap strategy for [`auto_arrange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Fixed `spacing` gaps, block aligned by `alignment`.
    #[default]
    Packed,
    /// Even gaps filling the whole width between the paddings.
    Spread,
}

impl FromStr for ArrangeAlignment {
    type Err = StudioError;

    fn from_str(name: &str) -> StudioResult<Self> {
        match name {
            "start" | "left" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" | "right" => Ok(Self::End),
            other => Err(StudioError::UnknownAlignment(other.to_string())),
        }
    }
}

impl FromStr for Distribution {
    type Err = StudioError;

    fn from_str(name: &str) -> StudioResult<Self> {
        match name {
            "packed" => Ok(Self::Packed),
            "spread" => Ok(Self::Spread),
            other => Err(StudioError::UnknownDistribution(other.to_string())),
        }
    }
}

/// Options for [`auto_arrange`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrangeOptions {
    /// Horizontal padding on each side, in pixels.
    pub padding: f64,
    /// Gap between packed elements, in pixels.
    pub spacing: f64,
    /// Where a packed block sits.
    pub alignment: ArrangeAlignment,
    /// How gaps are chosen.
    pub distribution: Distribution,
}

impl Default for ArrangeOptions {
    fn default() -> Self {
        Self {
            padding: 20.0,
            spacing: 10.0,
            alignment: ArrangeAlignment::Center,
            distribution: Distribution::Packed,
        }
    }
}

/// Lay elements out in a single horizontal row, vertically centred.
///
/// Elements keep their input order from left to right.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn auto_arrange(
    placements: &[Placement],
    dims: CanvasDimensions,
    options: &ArrangeOptions,
) -> Vec<Placement> {
    if placements.is_empty() {
        return Vec::new();
    }

    let boxes: Vec<BoundingBox> = placements
        .iter()
        .map(|p| bounding_box_of(p, dims))
        .collect();
    let count = placements.len();
    let gaps = (count - 1) as f64;
    let total_width: f64 = boxes.iter().map(|b| b.width).sum();
    let available = 2.0f64.mul_add(-options.padding, dims.width);

    let (start, gap) = match options.distribution {
        Distribution::Spread if count > 1 => (options.padding, (available - total_width) / gaps),
        Distribution::Spread | Distribution::Packed => {
            let block = options.spacing.mul_add(gaps, total_width);
            let start = match options.alignment {
                ArrangeAlignment::Start => options.padding,
                ArrangeAlignment::Center => options.padding + (available - block) / 2.0,
                ArrangeAlignment::End => dims.width - options.padding - block,
            };
            (start, options.spacing)
        }
    };

    let mut cursor = start;
    placements
        .iter()
        .zip(&boxes)
        .map(|(placement, bbox)| {
            let top = (dims.height - bbox.height) / 2.0;
            let mut arranged = placement.clone();
            arranged.position = position_for_box(placement, cursor, top, dims);
            cursor += bbox.width + gap;
            arranged
        })
        .collect()
}

/// Edge or centre line that [`align_elements`] lines elements up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left edges meet the leftmost edge.
    Left,
    /// Right edges meet the rightmost edge.
    Right,
    /// Horizontal centres meet the middle of the overall span.
    Center,
    /// Top edges meet the topmost edge.
    Top,
    /// Bottom edges meet the bottommost edge.
    Bottom,
    /// Vertical centres meet the middle of the overall span.
    Middle,
}

impl Alignment {
    /// Whether this alignment moves elements along the x axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        match self {
            Self::Left | Self::Right | Self::Center => true,
            Self::Top | Self::Bottom | Self::Middle => false,
        }
    }
}

impl FromStr for Alignment {
    type Err = StudioError;

    fn from_str(name: &str) -> StudioResult<Self> {
        match name {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" | "center-horizontal" => Ok(Self::Center),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "middle" | "middle-vertical" => Ok(Self::Middle),
            other => Err(StudioError::UnknownAlignment(other.to_string())),
        }
    }
}

/// Align all elements to one reference line derived from the extremes of
/// their bounding boxes. Sizes are preserved.
#[must_use]
pub fn align_elements(
    placements: &[Placement],
    alignment: Alignment,
    dims: CanvasDimensions,
) -> Vec<Placement> {
    let boxes: Vec<BoundingBox> = placements
        .iter()
        .map(|p| bounding_box_of(p, dims))
        .collect();

    let min_x = boxes.iter().map(|b| b.x).fold(f64::INFINITY, f64::min);
    let max_x = boxes.iter().map(BoundingBox::right).fold(f64::NEG_INFINITY, f64::max);
    let min_y = boxes.iter().map(|b| b.y).fold(f64::INFINITY, f64::min);
    let max_y = boxes.iter().map(BoundingBox::bottom).fold(f64::NEG_INFINITY, f64::max);

    placements
        .iter()
        .zip(&boxes)
        .map(|(placement, bbox)| {
            let (left, top) = match alignment {
                Alignment::Left => (min_x, bbox.y),
                Alignment::Right => (max_x - bbox.width, bbox.y),
                Alignment::Center => ((min_x + max_x - bbox.width) / 2.0, bbox.y),
                Alignment::Top => (bbox.x, min_y),
                Alignment::Bottom => (bbox.x, max_y - bbox.height),
                Alignment::Middle => (bbox.x, (min_y + max_y - bbox.height) / 2.0),
            };

            let target = position_for_box(placement, left, top, dims);
            let mut aligned = placement.clone();
            if alignment.is_horizontal() {
                aligned.position.x = target.x;
            } else {
                aligned.position.y = target.y;
            }
            aligned
        })
        .collect()
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Evenly space element centres between `padding` and `100 - padding`
/// percent along the x axis. Fewer than two elements are returned unchanged.
#[must_use]
pub fn distribute_horizontally(
    placements: &[Placement],
    dims: CanvasDimensions,
    padding: f64,
) -> Vec<Placement> {
    distribute(placements, dims, padding, Axis::Horizontal)
}

/// Evenly space element centres between `padding` and `100 - padding`
/// percent along the y axis. Fewer than two elements are returned unchanged.
#[must_use]
pub fn distribute_vertically(
    placements: &[Placement],
    dims: CanvasDimensions,
    padding: f64,
) -> Vec<Placement> {
    distribute(placements, dims, padding, Axis::Vertical)
}

#[allow(clippy::cast_precision_loss)]
fn distribute(
    placements: &[Placement],
    dims: CanvasDimensions,
    padding: f64,
    axis: Axis,
) -> Vec<Placement> {
    if placements.len() < 2 {
        return placements.to_vec();
    }

    let boxes: Vec<BoundingBox> = placements
        .iter()
        .map(|p| bounding_box_of(p, dims))
        .collect();
    let center = |b: &BoundingBox| match axis {
        Axis::Horizontal => b.center_x(),
        Axis::Vertical => b.center_y(),
    };

    // Rank by current centre so the relative order survives.
    let mut order: Vec<usize> = (0..placements.len()).collect();
    order.sort_by(|&a, &b| center(&boxes[a]).total_cmp(&center(&boxes[b])));

    let step = 2.0f64.mul_add(-padding, 100.0) / (placements.len() - 1) as f64;
    let mut result = placements.to_vec();
    for (rank, &index) in order.iter().enumerate() {
        let target = (rank as f64).mul_add(step, padding);
        let bbox = &boxes[index];
        let placement = &placements[index];
        match axis {
            Axis::Horizontal => {
                let left = target / 100.0 * dims.width - bbox.width / 2.0;
                result[index].position.x = position_for_box(placement, left, bbox.y, dims).x;
            }
            Axis::Vertical => {
                let top = target / 100.0 * dims.height - bbox.height / 2.0;
                result[index].position.y = position_for_box(placement, bbox.x, top, dims).y;
            }
        }
    }
    result
}
