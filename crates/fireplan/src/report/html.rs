//! HTML report rendering.

use tera::{Context, Tera};
use tracing::debug;

use super::{ReportData, STANDARD_REFERENCE};
use crate::error::Result;
use crate::{APP_NAME, VERSION};

const REPORT_TEMPLATE: &str = include_str!("../../templates/report.html");

/// Render a print-ready HTML report, optionally embedding an SVG map.
///
/// All user-supplied text is escaped; the map markup is inserted verbatim.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_html(data: &ReportData, map_svg: Option<&str>) -> Result<String> {
    let mut context = Context::new();
    context.insert("app_name", APP_NAME);
    context.insert("version", VERSION);
    context.insert("standard", STANDARD_REFERENCE);
    context.insert("project", &data.project);
    context.insert(
        "generated_at",
        &data.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    );
    context.insert("option_name", &data.option_name);
    context.insert("compliant", &data.is_compliant());
    context.insert("warnings", &data.warnings);
    context.insert("hazard_class", &data.hazard_class);
    context.insert("hazard_type", &data.hazard_type);
    context.insert("rating", &data.rating);
    context.insert("area", &format!("{:.2}", data.area));
    context.insert("area_unit", data.units.area_label());
    context.insert("travel", &format!("{:.2}", data.travel));
    context.insert("dist_unit", data.units.dist_label());
    context.insert("safety_factor", &data.safety_factor);
    context.insert("design_radius", &format!("{:.2}", data.design_radius));
    context.insert("min_qty_area", &data.min_qty_area);
    context.insert("qty_by_distance", &data.qty_by_distance);
    context.insert("qty_total", &data.qty_total);
    context.insert("map_svg", &map_svg);

    let html = Tera::one_off(REPORT_TEMPLATE, &context, true)?;
    debug!(bytes = html.len(), "rendered HTML report");
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_plan;
    use crate::units::UnitSystem;

    fn sample_data() -> ReportData {
        let plan = sample_plan(UnitSystem::Imperial);
        let eval = plan.evaluate(0).unwrap();
        ReportData::new(&plan, &eval)
    }

    #[test]
    fn test_render_compliant_report() {
        let html = render_html(&sample_data(), None).unwrap();

        assert!(html.contains("Fire Extinguisher Planner Report"));
        assert!(html.contains("COMPLIANT: DESIGN MEETS CRITERIA"));
        assert!(!html.contains("NON-COMPLIANT"));
        assert!(html.contains("NFPA 10 (2022 Edition)"));
        assert!(html.contains("1200.00 ft²"));
        assert!(html.contains("Max 75.00 ft"));
        assert!(html.contains("Ref: 6.2.1.2.1"));
        assert!(!html.contains("Coverage Map"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render_html(&sample_data(), None).unwrap();
        assert!(html.contains("Office &lt;Wing&gt;"));
        assert!(!html.contains("Office <Wing>"));
    }

    #[test]
    fn test_warnings_listed() {
        let mut data = sample_data();
        data.warnings = vec!["Must be Class K listed.".to_string()];
        let html = render_html(&data, None).unwrap();

        assert!(html.contains("NON-COMPLIANT: ISSUES DETECTED"));
        assert!(html.contains("<li>Must be Class K listed.</li>"));
    }

    #[test]
    fn test_map_embedded_verbatim() {
        let html = render_html(&sample_data(), Some("<svg id=\"map\"></svg>")).unwrap();
        assert!(html.contains("3. Coverage Map"));
        assert!(html.contains("<svg id=\"map\"></svg>"));
    }

    #[test]
    fn test_version_in_footer() {
        let html = render_html(&sample_data(), None).unwrap();
        assert!(html.contains(&format!("Generated by Fire Extinguisher Planner v{VERSION}")));
    }
}
