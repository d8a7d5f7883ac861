//! Planar geometry for floor outlines.
//!
//! Coordinates are in feet. A [`Polygon`] is a simple (non self-intersecting)
//! ring of at least three distinct vertices with a non-zero area.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tolerance for coordinate comparisons, in feet.
const EPSILON: f64 = 1e-9;

/// A point in the floor plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest x.
    pub min_x: f64,
    /// Smallest y.
    pub min_y: f64,
    /// Largest x.
    pub max_x: f64,
    /// Largest y.
    pub max_y: f64,
}

impl Bounds {
    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A simple polygon describing a protected floor area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from its vertices.
    ///
    /// A repeated closing vertex and consecutive duplicates are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than three distinct vertices remain, the
    /// enclosed area is zero, or two edges cross.
    pub fn new(vertices: impl IntoIterator<Item = Point>) -> Result<Self> {
        let mut cleaned: Vec<Point> = Vec::new();
        for p in vertices {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(Error::invalid_geometry("vertex coordinates must be finite"));
            }
            if cleaned.last().is_some_and(|last| last.approx_eq(&p)) {
                continue;
            }
            cleaned.push(p);
        }
        while cleaned.len() > 1 && cleaned[0].approx_eq(&cleaned[cleaned.len() - 1]) {
            cleaned.pop();
        }

        if cleaned.len() < 3 {
            return Err(Error::invalid_geometry(format!(
                "need at least 3 distinct vertices, got {}",
                cleaned.len()
            )));
        }

        let polygon = Self { vertices: cleaned };
        if polygon.area() < EPSILON {
            return Err(Error::invalid_geometry("outline encloses no area"));
        }
        if let Some((i, j)) = polygon.first_crossing() {
            return Err(Error::invalid_geometry(format!(
                "edges {} and {} intersect",
                i + 1,
                j + 1
            )));
        }
        Ok(polygon)
    }

    /// The polygon vertices, without the closing repeat.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The closed exterior ring: every vertex followed by the first again.
    #[must_use]
    pub fn exterior(&self) -> Vec<Point> {
        let mut ring = self.vertices.clone();
        ring.push(self.vertices[0]);
        ring
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    fn signed_area(&self) -> f64 {
        self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum::<f64>() / 2.0
    }

    /// Enclosed area (shoelace formula), independent of winding order.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Axis-aligned bounds.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.vertices.iter().fold(
            Bounds {
                min_x: f64::INFINITY,
                min_y: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                max_y: f64::NEG_INFINITY,
            },
            |b, p| Bounds {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        )
    }

    /// Whether `p` lies strictly inside the polygon.
    ///
    /// Points on the boundary are not contained.
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        if self.edges().any(|(a, b)| on_segment(&a, &b, p)) {
            return false;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Area-weighted centroid. Not necessarily inside a concave polygon.
    #[must_use]
    pub fn centroid(&self) -> Point {
        let signed = self.signed_area();
        let (cx, cy) = self.edges().fold((0.0, 0.0), |(cx, cy), (a, b)| {
            let cross = a.x * b.y - b.x * a.y;
            (cx + (a.x + b.x) * cross, cy + (a.y + b.y) * cross)
        });
        Point::new(cx / (6.0 * signed), cy / (6.0 * signed))
    }

    /// A point guaranteed to lie strictly inside the polygon.
    ///
    /// Takes the horizontal scanline through the middle of the bounds,
    /// moved between vertex heights so it never grazes a vertex, and
    /// returns the midpoint of its widest interior span.
    #[must_use]
    pub fn representative_point(&self) -> Point {
        let y = self.scanline_height();

        let mut crossings: Vec<f64> = self
            .edges()
            .filter(|(a, b)| (a.y > y) != (b.y > y))
            .map(|(a, b)| a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y))
            .collect();
        crossings.sort_by(f64::total_cmp);

        crossings
            .chunks_exact(2)
            .max_by(|l, r| (l[1] - l[0]).total_cmp(&(r[1] - r[0])))
            .map_or_else(|| self.centroid(), |span| Point::new((span[0] + span[1]) / 2.0, y))
    }

    fn scanline_height(&self) -> f64 {
        let bounds = self.bounds();
        let mid = (bounds.min_y + bounds.max_y) / 2.0;

        let mut heights: Vec<f64> = self.vertices.iter().map(|p| p.y).collect();
        heights.sort_by(f64::total_cmp);
        heights.dedup_by(|a, b| (*a - *b).abs() < EPSILON);

        heights
            .windows(2)
            .find(|band| band[0] <= mid && mid <= band[1])
            .map_or(mid, |band| (band[0] + band[1]) / 2.0)
    }

    fn first_crossing(&self) -> Option<(usize, usize)> {
        let n = self.vertices.len();
        let edges: Vec<(Point, Point)> = self.edges().collect();
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    // Neighbours share a vertex; they only conflict when they fold back.
                    let (a, b) = edges[i];
                    let (c, d) = edges[j];
                    let shared_overlap = if j == i + 1 {
                        on_segment(&a, &b, &d) || on_segment(&c, &d, &a)
                    } else {
                        on_segment(&a, &b, &c) || on_segment(&c, &d, &b)
                    };
                    if shared_overlap {
                        return Some((i, j));
                    }
                    continue;
                }
                if segments_intersect(&edges[i].0, &edges[i].1, &edges[j].0, &edges[j].1) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

/// Distance from `p` to the nearest point of `points`.
///
/// Returns infinity for an empty set.
#[must_use]
pub fn min_distance(points: &[Point], p: &Point) -> f64 {
    points
        .iter()
        .map(|q| q.distance(p))
        .fold(f64::INFINITY, f64::min)
}

fn orientation(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Whether `p` lies on the closed segment `a`-`b`.
fn on_segment(a: &Point, b: &Point, p: &Point) -> bool {
    let len = a.distance(b);
    if len < EPSILON {
        return a.approx_eq(p);
    }
    if (orientation(a, b, p) / len).abs() > EPSILON {
        return false;
    }
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

fn segments_intersect(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);

    if ((o1 > EPSILON && o2 < -EPSILON) || (o1 < -EPSILON && o2 > EPSILON))
        && ((o3 > EPSILON && o4 < -EPSILON) || (o3 < -EPSILON && o4 > EPSILON))
    {
        return true;
    }
    on_segment(a, b, c) || on_segment(a, b, d) || on_segment(c, d, a) || on_segment(c, d, b)
}
