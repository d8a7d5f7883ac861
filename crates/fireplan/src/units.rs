//! Unit systems.
//!
//! Every length inside fireplan is carried in feet and every area in square
//! feet. A [`UnitSystem`] only decides how user input is interpreted and how
//! results are presented.

use serde::{Deserialize, Serialize};

/// Feet to metres.
pub const FT_TO_M: f64 = 0.3048;

/// Square feet to square metres.
pub const SQFT_TO_SQM: f64 = 0.092_903;

/// The measurement system used for input and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Feet and square feet.
    #[default]
    Imperial,
    /// Metres and square metres.
    Metric,
}

impl UnitSystem {
    /// Convert a length in this system to feet.
    #[must_use]
    pub fn to_ft(self, value: f64) -> f64 {
        match self {
            Self::Imperial => value,
            Self::Metric => value / FT_TO_M,
        }
    }

    /// Convert a length in feet to this system.
    #[must_use]
    pub fn from_ft(self, value: f64) -> f64 {
        match self {
            Self::Imperial => value,
            Self::Metric => value * FT_TO_M,
        }
    }

    /// Convert an area in this system to square feet.
    #[must_use]
    pub fn to_sqft(self, value: f64) -> f64 {
        match self {
            Self::Imperial => value,
            Self::Metric => value / SQFT_TO_SQM,
        }
    }

    /// Convert an area in square feet to this system.
    #[must_use]
    pub fn from_sqft(self, value: f64) -> f64 {
        match self {
            Self::Imperial => value,
            Self::Metric => value * SQFT_TO_SQM,
        }
    }

    /// Short label for lengths.
    #[must_use]
    pub fn dist_label(self) -> &'static str {
        match self {
            Self::Imperial => "ft",
            Self::Metric => "m",
        }
    }

    /// Short label for areas.
    #[must_use]
    pub fn area_label(self) -> &'static str {
        match self {
            Self::Imperial => "ft²",
            Self::Metric => "m²",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Imperial => write!(f, "imperial"),
            Self::Metric => write!(f, "metric"),
        }
    }
}
