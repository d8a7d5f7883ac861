//! Report generation.
//!
//! A report describes one evaluated layout: the hazard definition, the
//! compliance numbers, every outstanding issue, and a coverage map. Values
//! are converted to the project's unit system here and nowhere else.

mod html;
mod svg;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::Result;
use crate::geometry::Point;
use crate::plan::{OptionEvaluation, Plan};
use crate::units::UnitSystem;

pub use html::render_html;
pub use svg::CoverageMap;

/// Standard edition the rules follow.
pub const STANDARD_REFERENCE: &str = "NFPA 10 (2022 Edition)";

/// Everything a report shows, already in display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    /// Project name.
    pub project: String,
    /// When the report was produced.
    pub generated_at: DateTime<Local>,
    /// Selected layout name.
    pub option_name: String,
    /// Display unit system.
    pub units: UnitSystem,
    /// Hazard class name.
    pub hazard_class: String,
    /// Hazard type label.
    pub hazard_type: String,
    /// Rating label.
    pub rating: String,
    /// Floor area in display units.
    pub area: f64,
    /// Maximum travel distance in display units.
    pub travel: f64,
    /// Safety factor applied.
    pub safety_factor: f64,
    /// Design radius in display units.
    pub design_radius: f64,
    /// Units required by the area rule.
    pub min_qty_area: usize,
    /// Units placed to satisfy travel distance.
    pub qty_by_distance: usize,
    /// Units recommended.
    pub qty_total: usize,
    /// Estimated covered fraction of the floor.
    pub coverage_fraction: f64,
    /// Outstanding issues.
    pub warnings: Vec<String>,
    /// Outline vertices in display units.
    pub outline: Vec<Point>,
    /// Extinguisher positions in display units.
    pub extinguishers: Vec<Point>,
}

impl ReportData {
    /// Collect report values for one evaluated layout.
    #[must_use]
    pub fn new(plan: &Plan, evaluation: &OptionEvaluation) -> Self {
        let analysis = &plan.analysis;
        let units = analysis.inputs.units;
        let to_display = |p: &Point| Point::new(units.from_ft(p.x), units.from_ft(p.y));

        Self {
            project: analysis.inputs.project.clone(),
            generated_at: Local::now(),
            option_name: evaluation.name.clone(),
            units,
            hazard_class: analysis.inputs.hazard_class.to_string(),
            hazard_type: analysis.inputs.hazard_type.to_string(),
            rating: analysis.rating.raw.clone(),
            area: units.from_sqft(analysis.area_sqft),
            travel: units.from_ft(analysis.required_travel_ft),
            safety_factor: analysis.inputs.safety_factor,
            design_radius: units.from_ft(analysis.effective_radius_ft()),
            min_qty_area: analysis.min_qty_area,
            qty_by_distance: evaluation.qty_by_distance,
            qty_total: evaluation.qty_total,
            coverage_fraction: evaluation.coverage.fraction,
            warnings: evaluation.warnings.clone(),
            outline: plan.polygon.vertices().iter().map(to_display).collect(),
            extinguishers: evaluation.points.iter().map(to_display).collect(),
        }
    }

    /// Whether no issue was found.
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.warnings.is_empty()
    }

    /// The coverage map for this report.
    #[must_use]
    pub fn coverage_map(&self) -> CoverageMap {
        CoverageMap::new(
            self.outline.clone(),
            self.extinguishers.clone(),
            self.design_radius,
            self.units,
        )
    }

    /// Plain-text summary for terminals.
    #[must_use]
    pub fn to_text(&self) -> String {
        let d = self.units.dist_label();
        let status = if self.is_compliant() {
            "COMPLIANT: DESIGN MEETS CRITERIA"
        } else {
            "NON-COMPLIANT: ISSUES DETECTED"
        };

        let mut out = String::new();
        out.push_str(&format!("{}\n", self.option_name));
        out.push_str(&format!("{}\n", "-".repeat(self.option_name.len())));
        out.push_str(&format!("Status:            {status}\n"));
        out.push_str(&format!(
            "Floor area:        {:.2} {}\n",
            self.area,
            self.units.area_label()
        ));
        out.push_str(&format!("Max travel:        {:.2} {d}\n", self.travel));
        out.push_str(&format!(
            "Design radius:     {:.2} {d} (safety factor {})\n",
            self.design_radius, self.safety_factor
        ));
        out.push_str(&format!("By area rule:      {}\n", self.min_qty_area));
        out.push_str(&format!("By travel dist:    {}\n", self.qty_by_distance));
        out.push_str(&format!("Total recommended: {}\n", self.qty_total));
        out.push_str(&format!(
            "Coverage:          {:.1}%\n",
            self.coverage_fraction * 100.0
        ));
        for (i, p) in self.extinguishers.iter().enumerate() {
            out.push_str(&format!("  #{:<3} ({:.1}, {:.1}) {d}\n", i + 1, p.x, p.y));
        }
        for warning in &self.warnings {
            out.push_str(&format!("  ! {warning}\n"));
        }
        out
    }
}

/// Render the HTML report, coverage map included, for the option at `index`.
///
/// # Errors
///
/// Returns an error for an unknown option or if rendering fails.
pub fn render_plan_report(plan: &Plan, index: usize) -> Result<String> {
    let evaluation = plan.evaluate(index)?;
    let data = ReportData::new(plan, &evaluation);
    let map = data.coverage_map().to_svg();
    render_html(&data, Some(&map))
}
