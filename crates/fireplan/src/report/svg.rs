//! SVG coverage map.
//!
//! Draws the floor outline, one coverage circle per extinguisher and a
//! numbered marker at each position. The y axis points up as on a plan.

use std::fmt::Write;

use crate::geometry::Point;
use crate::units::UnitSystem;

/// Drawing width in pixels.
const WIDTH_PX: f64 = 700.0;
/// Space reserved for the title.
const TITLE_PX: f64 = 30.0;
/// Marker half-size in pixels.
const MARKER_PX: f64 = 7.0;

/// A renderable coverage map, in display units.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMap {
    outline: Vec<Point>,
    extinguishers: Vec<Point>,
    radius: f64,
    units: UnitSystem,
}

struct Frame {
    min_x: f64,
    max_y: f64,
    scale: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn x(&self, x: f64) -> f64 {
        (x - self.min_x) * self.scale
    }

    fn y(&self, y: f64) -> f64 {
        TITLE_PX + (self.max_y - y) * self.scale
    }
}

impl CoverageMap {
    /// Create a map from an outline, positions and a coverage radius.
    #[must_use]
    pub fn new(
        outline: Vec<Point>,
        extinguishers: Vec<Point>,
        radius: f64,
        units: UnitSystem,
    ) -> Self {
        Self {
            outline,
            extinguishers,
            radius,
            units,
        }
    }

    /// Map title.
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "Coverage Map (Effective Radius: {:.1} {})",
            self.radius,
            self.units.dist_label()
        )
    }

    fn frame(&self) -> Frame {
        let margin = (self.radius * 1.2).max(1.0);
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in self.outline.iter().chain(&self.extinguishers) {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if !min_x.is_finite() {
            (min_x, min_y, max_x, max_y) = (0.0, 0.0, 0.0, 0.0);
        }

        let min_x = min_x - margin;
        let max_x = max_x + margin;
        let min_y = min_y - margin;
        let max_y = max_y + margin;
        let scale = WIDTH_PX / (max_x - min_x);

        Frame {
            min_x,
            max_y,
            scale,
            width: WIDTH_PX,
            height: TITLE_PX + (max_y - min_y) * scale,
        }
    }

    /// Render the map as a standalone SVG element.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let f = self.frame();
        let mut svg = String::new();

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.2} {h:.2}" font-family="Arial, sans-serif">"#,
            w = f.width,
            h = f.height
        );
        let _ = writeln!(
            svg,
            r#"<rect x="0" y="0" width="{:.2}" height="{:.2}" fill="white"/>"#,
            f.width, f.height
        );
        write_grid(&mut svg, &f);

        if !self.outline.is_empty() {
            let points: Vec<String> = self
                .outline
                .iter()
                .map(|p| format!("{:.2},{:.2}", f.x(p.x), f.y(p.y)))
                .collect();
            let _ = writeln!(
                svg,
                r##"<polygon points="{}" fill="#d0d0d0" fill-opacity="0.5" stroke="black" stroke-width="2"/>"##,
                points.join(" ")
            );
        }

        let r_px = self.radius * f.scale;
        for p in &self.extinguishers {
            let _ = writeln!(
                svg,
                r##"<circle cx="{:.2}" cy="{:.2}" r="{r_px:.2}" fill="blue" fill-opacity="0.1" stroke="blue" stroke-opacity="0.4"/>"##,
                f.x(p.x),
                f.y(p.y)
            );
        }

        for (i, p) in self.extinguishers.iter().enumerate() {
            let (cx, cy) = (f.x(p.x), f.y(p.y));
            let _ = writeln!(
                svg,
                r##"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="red" stroke="black"/>"##,
                cx,
                cy - MARKER_PX,
                cx - MARKER_PX,
                cy + MARKER_PX,
                cx + MARKER_PX,
                cy + MARKER_PX
            );
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="12" font-weight="bold">{}</text>"#,
                cx + MARKER_PX + 2.0,
                cy - MARKER_PX,
                i + 1
            );
        }

        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="20" font-size="14" text-anchor="middle">{}</text>"#,
            f.width / 2.0,
            self.title()
        );
        svg.push_str("</svg>\n");
        svg
    }
}

/// Dotted reference lines at a round spacing.
fn write_grid(svg: &mut String, f: &Frame) {
    let span = f.width / f.scale;
    let step = grid_step(span);
    let min_y = f.max_y - (f.height - TITLE_PX) / f.scale;

    let mut x = (f.min_x / step).ceil() * step;
    while x <= f.min_x + span {
        let px = f.x(x);
        let _ = writeln!(
            svg,
            r##"<line x1="{px:.2}" y1="{TITLE_PX:.2}" x2="{px:.2}" y2="{:.2}" stroke="#999" stroke-dasharray="2,4" stroke-opacity="0.5"/>"##,
            f.height
        );
        x += step;
    }

    let mut y = (min_y / step).ceil() * step;
    while y <= f.max_y {
        let py = f.y(y);
        let _ = writeln!(
            svg,
            r##"<line x1="0" y1="{py:.2}" x2="{:.2}" y2="{py:.2}" stroke="#999" stroke-dasharray="2,4" stroke-opacity="0.5"/>"##,
            f.width
        );
        y += step;
    }
}

/// A 1, 2 or 5 times power-of-ten step giving roughly ten grid lines.
fn grid_step(span: f64) -> f64 {
    if span <= 0.0 || !span.is_finite() {
        return 1.0;
    }
    let raw = span / 10.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
