//! `fireplan` - Portable fire extinguisher planning per NFPA 10
//!
//! This library computes extinguisher quantities for a floor outline, proposes
//! candidate layouts that respect maximum travel distance, checks that every
//! point of the floor is covered, and renders compliance reports.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod coverage;
pub mod error;
pub mod geometry;
pub mod hazard;
pub mod logging;
pub mod placement;
pub mod plan;
pub mod project;
pub mod rating;
pub mod report;
pub mod sketch;
pub mod units;
pub mod update;

pub use analysis::{analyze, Analysis, AnalysisInputs};
pub use config::Config;
pub use error::{Error, Result};
pub use geometry::{Point, Polygon};
pub use hazard::{HazardClass, HazardType};
pub use logging::init_logging;
pub use plan::{OptionEvaluation, Plan};
pub use project::{plan_file, Project};
pub use rating::Rating;
pub use report::{render_html, render_plan_report, CoverageMap, ReportData};
pub use units::UnitSystem;
pub use update::{UpdateChecker, UpdateStatus};

/// Application display name.
pub const APP_NAME: &str = "Fire Extinguisher Planner";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
