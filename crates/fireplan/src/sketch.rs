//! Grid-based drawing model for floor outlines.
//!
//! A [`Sketch`] collects outline vertices in grid-cell coordinates, the way a
//! drafting surface with a snapping grid does. Each cell measures
//! `grid_scale` user units (feet or metres) on a side.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{Point, Polygon};
use crate::units::UnitSystem;

/// Smallest allowed grid scale, in user units per cell.
pub const MIN_GRID_SCALE: f64 = 1.0;

/// Largest allowed grid scale, in user units per cell.
pub const MAX_GRID_SCALE: f64 = 100.0;

/// An outline being drawn on a snapping grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    grid_scale: f64,
    snap: bool,
    points: Vec<Point>,
    closed: bool,
}

impl Sketch {
    /// Start an empty sketch.
    ///
    /// # Errors
    ///
    /// Returns an error if `grid_scale` is outside `1..=100`.
    pub fn new(grid_scale: f64, snap: bool) -> Result<Self> {
        if !(MIN_GRID_SCALE..=MAX_GRID_SCALE).contains(&grid_scale) {
            return Err(Error::sketch(format!(
                "grid scale {grid_scale} must be between {MIN_GRID_SCALE} and {MAX_GRID_SCALE}"
            )));
        }
        Ok(Self {
            grid_scale,
            snap,
            points: Vec::new(),
            closed: false,
        })
    }

    /// User units per grid cell.
    #[must_use]
    pub fn grid_scale(&self) -> f64 {
        self.grid_scale
    }

    /// Whether new points snap to grid intersections.
    #[must_use]
    pub fn snap(&self) -> bool {
        self.snap
    }

    /// Vertices placed so far, in grid cells.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the outline has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Where a cursor position lands after snapping.
    #[must_use]
    pub fn snapped(&self, p: Point) -> Point {
        if self.snap {
            Point::new(p.x.round(), p.y.round())
        } else {
            p
        }
    }

    /// Append a vertex, snapping it if enabled.
    ///
    /// # Errors
    ///
    /// Returns an error once the outline is closed.
    pub fn add_point(&mut self, p: Point) -> Result<Point> {
        if self.closed {
            return Err(Error::sketch("outline is closed; reset to draw again"));
        }
        let placed = self.snapped(p);
        self.points.push(placed);
        debug!(x = placed.x, y = placed.y, "placed outline vertex");
        Ok(placed)
    }

    /// Close the outline.
    ///
    /// # Errors
    ///
    /// Returns an error with fewer than three vertices.
    pub fn close(&mut self) -> Result<()> {
        if self.points.len() <= 2 {
            return Err(Error::sketch(format!(
                "cannot close an outline with {} point(s)",
                self.points.len()
            )));
        }
        self.closed = true;
        Ok(())
    }

    /// Discard all vertices and reopen the sketch.
    pub fn reset(&mut self) {
        self.points.clear();
        self.closed = false;
    }

    /// Length of the segment `a`-`b` in user units.
    #[must_use]
    pub fn segment_length(&self, a: &Point, b: &Point) -> f64 {
        a.distance(b) * self.grid_scale
    }

    /// Vertices converted to feet.
    #[must_use]
    pub fn coordinates_in_ft(&self, units: UnitSystem) -> Vec<Point> {
        self.points
            .iter()
            .map(|p| {
                Point::new(
                    units.to_ft(p.x * self.grid_scale),
                    units.to_ft(p.y * self.grid_scale),
                )
            })
            .collect()
    }

    /// Build the floor polygon, in feet.
    ///
    /// # Errors
    ///
    /// Returns an error if the sketch is still open or the outline is not a
    /// valid polygon.
    pub fn to_polygon(&self, units: UnitSystem) -> Result<Polygon> {
        if !self.closed {
            return Err(Error::sketch("outline must be closed before analysis"));
        }
        Polygon::new(self.coordinates_in_ft(units))
    }
}
