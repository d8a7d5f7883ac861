//! A complete plan: analysis, candidate layouts, and their evaluation.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{analyze, Analysis, AnalysisInputs};
use crate::coverage::{check_coverage, CoverageReport, CoverageSettings};
use crate::error::{Error, Result};
use crate::geometry::{Point, Polygon};
use crate::placement::{generate_options, PlacementKind, PlacementOption};

/// Analysis results together with every generated layout.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Floor polygon, in feet.
    pub polygon: Polygon,
    /// Rule evaluation.
    pub analysis: Analysis,
    /// Candidate layouts, in presentation order.
    pub options: Vec<PlacementOption>,
    coverage: CoverageSettings,
}

/// One layout checked against the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEvaluation {
    /// Zero-based option index.
    pub index: usize,
    /// Display name.
    pub name: String,
    /// Strategy used.
    pub kind: PlacementKind,
    /// Extinguisher positions, in feet.
    pub points: Vec<Point>,
    /// Units placed to satisfy travel distance.
    pub qty_by_distance: usize,
    /// Units recommended: the larger of the distance and area counts.
    pub qty_total: usize,
    /// Geometric coverage of the layout.
    pub coverage: CoverageReport,
    /// Analysis warnings plus any coverage failure.
    pub warnings: Vec<String>,
}

impl OptionEvaluation {
    /// Whether the layout raises no issue at all.
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl Plan {
    /// Run the analysis and generate layouts for a floor.
    ///
    /// # Errors
    ///
    /// Propagates analysis errors (invalid input, code violations).
    pub fn build(
        polygon: Polygon,
        inputs: AnalysisInputs,
        coverage: CoverageSettings,
    ) -> Result<Self> {
        let analysis = analyze(&polygon, inputs)?;
        let options = generate_options(
            &polygon,
            analysis.required_travel_ft,
            analysis.inputs.safety_factor,
        )?;
        info!(
            options = options.len(),
            radius_ft = analysis.effective_radius_ft(),
            "plan ready"
        );
        Ok(Self {
            polygon,
            analysis,
            options,
            coverage,
        })
    }

    /// Number of layouts.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Step from `current` by `delta`, staying within the available options.
    #[must_use]
    pub fn step_index(&self, current: usize, delta: isize) -> usize {
        let last = self.options.len().saturating_sub(1);
        current.saturating_add_signed(delta).min(last)
    }

    /// Evaluate the layout at a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OptionOutOfRange`] for an unknown index.
    pub fn evaluate(&self, index: usize) -> Result<OptionEvaluation> {
        let option = self.options.get(index).ok_or(Error::OptionOutOfRange {
            requested: index + 1,
            available: self.options.len(),
        })?;

        let safety_factor = self.analysis.inputs.safety_factor;
        let coverage = check_coverage(
            &self.polygon,
            &option.points,
            self.analysis.required_travel_ft,
            safety_factor,
            self.coverage,
        );

        let mut warnings = self.analysis.warnings.clone();
        if !coverage.covered {
            warnings.push(format!(
                "CRITICAL: Extinguisher placement does not fully cover the floor area \
                 (Safety Factor {safety_factor} applied)."
            ));
        }

        let qty_by_distance = option.points.len();
        Ok(OptionEvaluation {
            index,
            name: option.name.clone(),
            kind: option.kind,
            points: option.points.clone(),
            qty_by_distance,
            qty_total: qty_by_distance.max(self.analysis.min_qty_area),
            coverage,
            warnings,
        })
    }

    /// Evaluate every layout.
    ///
    /// # Errors
    ///
    /// Never fails for indices produced here; the signature mirrors [`Plan::evaluate`].
    pub fn evaluate_all(&self) -> Result<Vec<OptionEvaluation>> {
        (0..self.options.len()).map(|i| self.evaluate(i)).collect()
    }
}
