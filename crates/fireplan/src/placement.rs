//! Extinguisher placement patterns.
//!
//! Each pattern lays candidate positions over the polygon bounds, keeps the
//! ones strictly inside the floor, then patches corners left outside the
//! design radius.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::geometry::{min_distance, Point, Polygon};

/// Square grid spacing as a fraction of the radius (a touch under √2).
const GRID_SPACING_FACTOR: f64 = 1.414 * 0.95;

/// Hexagonal column spacing as a fraction of the radius (a touch under √3).
const HEX_COLUMN_FACTOR: f64 = 1.732 * 0.95;

/// Hexagonal row spacing as a fraction of the radius.
const HEX_ROW_FACTOR: f64 = 1.5 * 0.95;

/// Step length, in feet, when walking inward from an uncovered vertex.
const INWARD_STEP_FT: f64 = 2.0;

/// The layout strategy behind an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    /// Square grid anchored at the bounds corner.
    StandardGrid,
    /// Square grid shifted half a spacing in both axes.
    OffsetGrid,
    /// Staggered rows.
    Hexagonal,
}

impl PlacementKind {
    /// Display name of the option.
    #[must_use]
    pub fn option_name(self) -> &'static str {
        match self {
            Self::StandardGrid => "Option A: Standard Grid",
            Self::OffsetGrid => "Option B: Offset Grid",
            Self::Hexagonal => "Option C: Hexagonal Packing",
        }
    }
}

/// One candidate layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementOption {
    /// Display name.
    pub name: String,
    /// Strategy used.
    pub kind: PlacementKind,
    /// Extinguisher positions, in feet.
    pub points: Vec<Point>,
}

impl PlacementOption {
    fn new(kind: PlacementKind, points: Vec<Point>) -> Self {
        Self {
            name: kind.option_name().to_string(),
            kind,
            points,
        }
    }
}

/// Generate the standard, offset and hexagonal layouts.
///
/// # Errors
///
/// Returns an error if the effective radius is not a positive finite number.
pub fn generate_options(
    polygon: &Polygon,
    travel_ft: f64,
    safety_factor: f64,
) -> Result<Vec<PlacementOption>> {
    let radius = travel_ft * safety_factor;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::invalid_input(format!(
            "effective radius must be positive, got {radius}"
        )));
    }

    let options = vec![
        PlacementOption::new(
            PlacementKind::StandardGrid,
            grid_placement(polygon, radius, (0.0, 0.0)),
        ),
        PlacementOption::new(
            PlacementKind::OffsetGrid,
            grid_placement(polygon, radius, (0.5, 0.5)),
        ),
        PlacementOption::new(PlacementKind::Hexagonal, hex_placement(polygon, radius)),
    ];

    for option in &options {
        debug!(option = %option.name, count = option.points.len(), radius, "generated layout");
    }
    Ok(options)
}

/// Square grid layout with the given offset, as a fraction of the spacing.
#[must_use]
pub fn grid_placement(polygon: &Polygon, radius: f64, offset_ratio: (f64, f64)) -> Vec<Point> {
    let spacing = radius * GRID_SPACING_FACTOR;
    let bounds = polygon.bounds();
    let start_x = bounds.min_x + spacing * offset_ratio.0;
    let start_y = bounds.min_y + spacing * offset_ratio.1;

    let mut points = Vec::new();
    let mut x = start_x;
    while x < bounds.max_x + spacing {
        let mut y = start_y;
        while y < bounds.max_y + spacing {
            let p = Point::new(x, y);
            if polygon.contains(&p) {
                points.push(p);
            }
            y += spacing;
        }
        x += spacing;
    }
    ensure_coverage(polygon, points, radius)
}

/// Staggered-row layout.
#[must_use]
pub fn hex_placement(polygon: &Polygon, radius: f64) -> Vec<Point> {
    let spacing_x = radius * HEX_COLUMN_FACTOR;
    let spacing_y = radius * HEX_ROW_FACTOR;
    let bounds = polygon.bounds();

    let mut points = Vec::new();
    let mut row = 0_usize;
    let mut y = bounds.min_y + radius / 2.0;
    while y < bounds.max_y + radius {
        let shift = if row % 2 == 0 { 0.0 } else { spacing_x / 2.0 };
        let mut x = bounds.min_x + shift + radius / 2.0;
        while x < bounds.max_x + radius {
            let p = Point::new(x, y);
            if polygon.contains(&p) {
                points.push(p);
            }
            x += spacing_x;
        }
        y += spacing_y;
        row += 1;
    }
    ensure_coverage(polygon, points, radius)
}

/// Add positions until every outline vertex is within `radius` of one.
///
/// An empty layout is first seeded with the centroid, or with the
/// representative point when the centroid falls outside the floor.
#[must_use]
pub fn ensure_coverage(polygon: &Polygon, points: Vec<Point>, radius: f64) -> Vec<Point> {
    let mut placed = points;
    if placed.is_empty() {
        let centroid = polygon.centroid();
        if polygon.contains(&centroid) {
            placed.push(centroid);
        } else {
            placed.push(polygon.representative_point());
        }
    }

    for vertex in polygon.exterior() {
        if min_distance(&placed, &vertex) > radius {
            let spot = find_internal_spot(polygon, &vertex);
            trace!(vx = vertex.x, vy = vertex.y, x = spot.x, y = spot.y, "patched corner");
            placed.push(spot);
        }
    }
    placed
}

/// The first interior point on a walk from `vertex` toward the polygon's
/// representative point, in 2 ft steps.
#[must_use]
pub fn find_internal_spot(polygon: &Polygon, vertex: &Point) -> Point {
    let target = polygon.representative_point();
    let dx = target.x - vertex.x;
    let dy = target.y - vertex.y;
    let dist = dx.hypot(dy);
    if dist == 0.0 {
        return target;
    }

    let steps = step_count(dist);
    (1..steps)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let ratio = (i as f64 * INWARD_STEP_FT) / dist;
            Point::new(vertex.x + dx * ratio, vertex.y + dy * ratio)
        })
        .find(|candidate| polygon.contains(candidate))
        .unwrap_or(target)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step_count(dist: f64) -> usize {
    (dist / INWARD_STEP_FT) as usize
}
