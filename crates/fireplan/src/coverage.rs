//! Geometric coverage verification.
//!
//! The union of design-radius circles is compared with the floor area by
//! sampling cell centres over the polygon bounds.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::geometry::{min_distance, Point, Polygon};

/// Default number of sample cells per axis.
pub const DEFAULT_SAMPLES: usize = 200;

/// Default fraction of the floor that must fall inside some circle.
pub const DEFAULT_THRESHOLD: f64 = 0.999;

/// Outcome of a coverage check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Whether the covered fraction reaches the threshold.
    pub covered: bool,
    /// Estimated fraction of the floor within reach, in `[0, 1]`.
    pub fraction: f64,
}

/// Sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageSettings {
    /// Sample cells per axis.
    pub samples: usize,
    /// Required covered fraction.
    pub threshold: f64,
}

impl Default for CoverageSettings {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Check whether extinguishers at `points` reach the whole floor.
///
/// The design radius is `travel_ft * safety_factor`. An empty layout never
/// covers anything.
#[must_use]
pub fn check_coverage(
    polygon: &Polygon,
    points: &[Point],
    travel_ft: f64,
    safety_factor: f64,
    settings: CoverageSettings,
) -> CoverageReport {
    let radius = travel_ft * safety_factor;
    if points.is_empty() {
        return CoverageReport {
            covered: false,
            fraction: 0.0,
        };
    }

    let samples = settings.samples.max(1);
    let bounds = polygon.bounds();
    #[allow(clippy::cast_precision_loss)]
    let (step_x, step_y) = (
        bounds.width() / samples as f64,
        bounds.height() / samples as f64,
    );

    let mut inside = 0_usize;
    let mut reached = 0_usize;
    for i in 0..samples {
        for j in 0..samples {
            #[allow(clippy::cast_precision_loss)]
            let cell = Point::new(
                bounds.min_x + (i as f64 + 0.5) * step_x,
                bounds.min_y + (j as f64 + 0.5) * step_y,
            );
            if !polygon.contains(&cell) {
                continue;
            }
            inside += 1;
            if min_distance(points, &cell) <= radius {
                reached += 1;
            }
        }
    }

    if inside == 0 {
        warn!("no interior samples; falling back to vertex coverage");
        let all = polygon
            .vertices()
            .iter()
            .all(|v| min_distance(points, v) <= radius);
        return CoverageReport {
            covered: all,
            fraction: if all { 1.0 } else { 0.0 },
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let fraction = reached as f64 / inside as f64;
    let covered = fraction >= settings.threshold;
    debug!(fraction, covered, radius, "coverage checked");
    CoverageReport { covered, fraction }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: f64, h: f64) -> Polygon {
        Polygon::new([
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_layout_not_covered() {
        let r = check_coverage(&rect(10.0, 10.0), &[], 75.0, 1.0, CoverageSettings::default());
        assert!(!r.covered);
        assert_eq!(r.fraction, 0.0);
    }

    #[test]
    fn test_single_unit_covers_small_room() {
        let r = check_coverage(
            &rect(40.0, 40.0),
            &[Point::new(20.0, 20.0)],
            75.0,
            1.0,
            CoverageSettings::default(),
        );
        assert!(r.covered);
        assert!((r.fraction - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_unit_misses_large_hall() {
        let r = check_coverage(
            &rect(300.0, 300.0),
            &[Point::new(150.0, 150.0)],
            75.0,
            1.0,
            CoverageSettings::default(),
        );
        assert!(!r.covered);
        // Circle of radius 75 over a 300 x 300 hall: about π/16.
        assert!((r.fraction - std::f64::consts::PI / 16.0).abs() < 0.01);
    }

    #[test]
    fn test_safety_factor_shrinks_reach() {
        // Corner is 70.7 ft from the centre: inside 75, outside 0.9 * 75.
        let hall = rect(100.0, 100.0);
        let centre = [Point::new(50.0, 50.0)];
        let strict = check_coverage(&hall, &centre, 75.0, 1.0, CoverageSettings::default());
        let reduced = check_coverage(&hall, &centre, 75.0, 0.9, CoverageSettings::default());
        assert!(strict.covered);
        assert!(!reduced.covered);
    }

    #[test]
    fn test_threshold_setting() {
        let settings = CoverageSettings {
            samples: 100,
            threshold: 0.1,
        };
        let r = check_coverage(
            &rect(300.0, 300.0),
            &[Point::new(150.0, 150.0)],
            75.0,
            1.0,
            settings,
        );
        assert!(r.covered);
    }

    #[test]
    fn test_offset_grid_covers_matching_room() {
        // Two grid spacings square: offset grid puts a unit at each quadrant centre.
        let side = 2.0 * 75.0 * 1.414 * 0.95;
        let hall = rect(side, side);
        let options = crate::placement::generate_options(&hall, 75.0, 1.0).unwrap();
        let offset = &options[1];
        assert_eq!(offset.points.len(), 4);
        let r = check_coverage(&hall, &offset.points, 75.0, 1.0, CoverageSettings::default());
        assert!(r.covered, "covers only {}", r.fraction);
    }
}
