//! Hazard classification and the NFPA 10 Class A sizing table.

use serde::{Deserialize, Serialize};

/// Occupancy hazard classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HazardClass {
    /// Light (low) hazard: offices, classrooms, assembly halls.
    #[default]
    Light,
    /// Ordinary (moderate) hazard: storage, light manufacturing, parking.
    Ordinary,
    /// Extra (high) hazard: woodworking, heavy manufacturing, flammable storage.
    Extra,
}

impl HazardClass {
    /// All classes in ascending severity.
    pub const ALL: [Self; 3] = [Self::Light, Self::Ordinary, Self::Extra];

    /// Short name used in reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Ordinary => "Ordinary",
            Self::Extra => "Extra",
        }
    }

    /// Class A sizing limits for this occupancy.
    #[must_use]
    pub fn class_a_limits(self) -> ClassALimits {
        let max_area_per_unit_a = match self {
            Self::Light => 3000.0,
            Self::Ordinary => 1500.0,
            Self::Extra => 1000.0,
        };
        ClassALimits {
            max_area_per_unit_a,
            max_area_per_extinguisher: 11_250.0,
            travel_distance_ft: 75.0,
        }
    }
}

impl std::fmt::Display for HazardClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hazard", self.name())
    }
}

/// The kind of fire a layout protects against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HazardType {
    /// Ordinary combustibles.
    #[default]
    ClassA,
    /// Flammable liquid spill fires.
    ClassBSpill,
    /// Flammable liquids of appreciable depth (more than 1/4 in).
    ClassBDepth,
    /// Energized electrical equipment.
    ClassC,
    /// Cooking oils and fats.
    ClassK,
    /// Combustible metals.
    ClassD,
}

impl HazardType {
    /// All hazard types.
    pub const ALL: [Self; 6] = [
        Self::ClassA,
        Self::ClassBSpill,
        Self::ClassBDepth,
        Self::ClassC,
        Self::ClassK,
        Self::ClassD,
    ];
}

impl std::fmt::Display for HazardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClassA => write!(f, "Class A (Ordinary Combustibles)"),
            Self::ClassBSpill => write!(f, "Class B (Spill Fires)"),
            Self::ClassBDepth => write!(f, "Class B (Appreciable Depth)"),
            Self::ClassC => write!(f, "Class C (Electrical Equipment)"),
            Self::ClassK => write!(f, "Class K (Cooking)"),
            Self::ClassD => write!(f, "Class D (Metals)"),
        }
    }
}

/// NFPA 10 Table 6.2.1.1 limits for Class A hazards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassALimits {
    /// Floor area protected per unit of Class A rating, in ft².
    pub max_area_per_unit_a: f64,
    /// Maximum floor area assignable to one extinguisher, in ft².
    pub max_area_per_extinguisher: f64,
    /// Maximum travel distance, in ft.
    pub travel_distance_ft: f64,
}

impl ClassALimits {
    /// Floor area one extinguisher of the given A rating may protect.
    #[must_use]
    pub fn area_per_extinguisher(&self, rating_a: u32) -> f64 {
        (f64::from(rating_a) * self.max_area_per_unit_a).min(self.max_area_per_extinguisher)
    }
}
