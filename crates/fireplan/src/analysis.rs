//! NFPA 10 compliance analysis.
//!
//! Given a floor polygon and the hazard inputs, [`analyze`] determines the
//! maximum travel distance, the number of extinguishers the area rule
//! demands, and any rating deficiencies.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::geometry::Polygon;
use crate::hazard::{HazardClass, HazardType};
use crate::rating::{Rating, DEFAULT_RATING};
use crate::units::UnitSystem;

/// Smallest accepted safety factor.
pub const MIN_SAFETY_FACTOR: f64 = 0.5;

/// Largest accepted safety factor (strict radius).
pub const MAX_SAFETY_FACTOR: f64 = 1.0;

/// Project name used when none is given.
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// Largest flammable liquid surface, in ft², that portable extinguishers may
/// protect on their own.
const MAX_DEPTH_SURFACE_SQFT: f64 = 10.0;

/// Everything the user supplies for an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInputs {
    /// Project name.
    pub project: String,
    /// Occupancy hazard class.
    pub hazard_class: HazardClass,
    /// Fire class being protected.
    pub hazard_type: HazardType,
    /// Extinguisher rating label.
    pub rating: String,
    /// Flammable liquid surface area, in the user's area unit.
    pub liquid_area: f64,
    /// Ratio of design radius to walking distance.
    pub safety_factor: f64,
    /// Unit system of `liquid_area` and of the presentation.
    pub units: UnitSystem,
}

impl Default for AnalysisInputs {
    fn default() -> Self {
        Self {
            project: UNTITLED_PROJECT.to_string(),
            hazard_class: HazardClass::default(),
            hazard_type: HazardType::default(),
            rating: DEFAULT_RATING.to_string(),
            liquid_area: 0.0,
            safety_factor: MAX_SAFETY_FACTOR,
            units: UnitSystem::default(),
        }
    }
}

/// Result of the rule evaluation, independent of any placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// The inputs the analysis was run with.
    pub inputs: AnalysisInputs,
    /// Parsed rating.
    pub rating: Rating,
    /// Floor area, in ft².
    pub area_sqft: f64,
    /// Maximum travel distance, in ft.
    pub required_travel_ft: f64,
    /// Extinguishers required by the area rule.
    pub min_qty_area: usize,
    /// Rating deficiencies and advisories.
    pub warnings: Vec<String>,
}

impl Analysis {
    /// Design radius used for layout: travel distance scaled by the safety factor.
    #[must_use]
    pub fn effective_radius_ft(&self) -> f64 {
        self.required_travel_ft * self.inputs.safety_factor
    }
}

/// Evaluate the NFPA 10 rules for a floor area.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an out-of-range safety factor or
/// liquid area, and [`Error::CodeViolation`] when a flammable liquid surface
/// is too large for portable extinguishers to be the sole protection.
pub fn analyze(polygon: &Polygon, inputs: AnalysisInputs) -> Result<Analysis> {
    if !(MIN_SAFETY_FACTOR..=MAX_SAFETY_FACTOR).contains(&inputs.safety_factor) {
        return Err(Error::invalid_input(format!(
            "safety factor {} must be between {MIN_SAFETY_FACTOR} and {MAX_SAFETY_FACTOR}",
            inputs.safety_factor
        )));
    }
    if !inputs.liquid_area.is_finite() || inputs.liquid_area < 0.0 {
        return Err(Error::invalid_input(format!(
            "liquid surface area {} must be zero or positive",
            inputs.liquid_area
        )));
    }

    let rating = Rating::parse(&inputs.rating);
    let area_sqft = polygon.area();
    let class = inputs.hazard_class;

    info!(
        project = %inputs.project,
        hazard_class = class.name(),
        hazard_type = %inputs.hazard_type,
        rating = %rating,
        area_sqft,
        "running analysis"
    );

    let mut warnings = Vec::new();
    let mut min_qty_area = 0;

    let required_travel_ft = match inputs.hazard_type {
        HazardType::ClassA => {
            let limits = class.class_a_limits();
            match class {
                HazardClass::Light if rating.a < 2 => {
                    warnings.push("Light Hazard requires 2-A min.".to_string());
                }
                HazardClass::Ordinary if rating.a < 2 => {
                    warnings.push("Ordinary Hazard requires 2-A min.".to_string());
                }
                HazardClass::Extra if rating.a < 4 => warnings.push(
                    "Extra Hazard requires 4-A min (or two 2.5 gal water units).".to_string(),
                ),
                _ => {}
            }

            let per_unit = limits.area_per_extinguisher(rating.a);
            if per_unit > 0.0 {
                min_qty_area = units_for_area(area_sqft, per_unit);
            } else {
                warnings.push(
                    "Rating carries no Class A value; area rule not applied.".to_string(),
                );
            }
            limits.travel_distance_ft
        }
        HazardType::ClassBSpill => {
            let (full_distance_b, minimum_b) = match class {
                HazardClass::Light => (10, 5),
                HazardClass::Ordinary => (20, 10),
                HazardClass::Extra => (80, 40),
            };
            if rating.b < minimum_b {
                warnings.push(format!(
                    "{} Hazard Spill requires {minimum_b}-B min.",
                    class.name()
                ));
            }
            if rating.b >= full_distance_b {
                50.0
            } else {
                30.0
            }
        }
        HazardType::ClassBDepth => {
            let surface_sqft = inputs.units.to_sqft(inputs.liquid_area);
            if surface_sqft > MAX_DEPTH_SURFACE_SQFT {
                warn!(surface_sqft, "liquid surface exceeds portable extinguisher limit");
                return Err(Error::code_violation(
                    "Portable fire extinguishers shall not be installed as the sole protection \
                     for flammable liquid hazards of appreciable depth where the surface area \
                     exceeds 10 ft² (0.93 m²).",
                ));
            }
            let required_b = surface_sqft * 2.0;
            if f64::from(rating.b) < required_b {
                warnings.push(format!(
                    "Rating too low. Need {required_b}-B (Dry Chem). Foam allows less."
                ));
            }
            50.0
        }
        HazardType::ClassC => {
            if !rating.c {
                warnings.push("Must be Class C listed (Non-Conductive).".to_string());
            }
            if rating.is_dry_chemical_like() {
                warnings.push(
                    "WARNING: Dry chemical extinguishers should not be used on sensitive \
                     electronic equipment (NFPA 10 5.5.4.6.2)."
                        .to_string(),
                );
            }
            75.0
        }
        HazardType::ClassK => {
            if !rating.k {
                warnings.push("Must be Class K listed.".to_string());
            }
            30.0
        }
        HazardType::ClassD => {
            if !rating.d {
                warnings.push("Must be Class D listed.".to_string());
            }
            75.0
        }
    };

    debug!(
        required_travel_ft,
        min_qty_area,
        warnings = warnings.len(),
        "analysis complete"
    );

    Ok(Analysis {
        inputs,
        rating,
        area_sqft,
        required_travel_ft,
        min_qty_area,
        warnings,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn units_for_area(area_sqft: f64, per_unit_sqft: f64) -> usize {
    (area_sqft / per_unit_sqft).ceil() as usize
}
