//! Project files.
//!
//! A project holds the floor outline and the hazard inputs for one analysis.
//! Files are TOML (`.toml`) or JSON (anything else). Fields left out fall
//! back to the user's configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::{AnalysisInputs, UNTITLED_PROJECT};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geometry::{Point, Polygon};
use crate::hazard::{HazardClass, HazardType};
use crate::plan::Plan;
use crate::rating::DEFAULT_RATING;
use crate::sketch::Sketch;
use crate::units::UnitSystem;

/// Serialization format of a project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl ProjectFormat {
    /// Pick the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// The floor outline of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Outline vertices, in user units, or grid cells when `grid_scale` is set.
    pub points: Vec<[f64; 2]>,
    /// User units per grid cell. When present, `points` are grid cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_scale: Option<f64>,
    /// Snap grid points to intersections; defaults to the configured setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap: Option<bool>,
}

/// A fire-extinguisher planning project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit system of the outline and liquid area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitSystem>,
    /// Occupancy hazard class.
    #[serde(default)]
    pub hazard_class: HazardClass,
    /// Fire class being protected.
    #[serde(default)]
    pub hazard_type: HazardType,
    /// Extinguisher rating label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    /// Flammable liquid surface area, for appreciable-depth hazards.
    #[serde(default)]
    pub liquid_area: f64,
    /// Safety factor; defaults to the configured value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_factor: Option<f64>,
    /// Floor outline.
    pub outline: Outline,
}

impl Project {
    /// A starter project: a 100 x 60 ft ordinary-hazard room.
    #[must_use]
    pub fn template() -> Self {
        Self {
            name: Some("New Project".to_string()),
            units: Some(UnitSystem::Imperial),
            hazard_class: HazardClass::Ordinary,
            hazard_type: HazardType::ClassA,
            rating: Some(DEFAULT_RATING.to_string()),
            liquid_area: 0.0,
            safety_factor: Some(1.0),
            outline: Outline {
                points: vec![[0.0, 0.0], [100.0, 0.0], [100.0, 60.0], [0.0, 60.0]],
                grid_scale: None,
                snap: None,
            },
        }
    }

    /// Read a project file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let parse_error = |message: String| Error::ProjectParse {
            path: path.to_path_buf(),
            message,
        };
        let project = match ProjectFormat::from_path(path) {
            ProjectFormat::Toml => {
                toml::from_str(&text).map_err(|e| parse_error(e.to_string()))?
            }
            ProjectFormat::Json => {
                serde_json::from_str(&text).map_err(|e| parse_error(e.to_string()))?
            }
        };
        debug!("Loaded project from {}", path.display());
        Ok(project)
    }

    /// Write the project, refusing to overwrite unless `force` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists (without `force`), or on
    /// serialization or I/O failure.
    pub fn save(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(Error::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let text = match ProjectFormat::from_path(path) {
            ProjectFormat::Toml => toml::to_string_pretty(self)?,
            ProjectFormat::Json => serde_json::to_string_pretty(self)?,
        };
        std::fs::write(path, text)?;
        info!("Saved project to {}", path.display());
        Ok(())
    }

    /// Unit system in effect for this project.
    #[must_use]
    pub fn units(&self, config: &Config) -> UnitSystem {
        self.units.unwrap_or(config.units.system)
    }

    /// Build the floor polygon, in feet.
    ///
    /// # Errors
    ///
    /// Returns an error if the outline is not a valid polygon or the grid
    /// scale is out of range.
    pub fn polygon(&self, config: &Config) -> Result<Polygon> {
        let units = self.units(config);
        if let Some(grid_scale) = self.outline.grid_scale {
            let mut sketch = Sketch::new(
                grid_scale,
                self.outline.snap.unwrap_or(config.sketch.snap),
            )?;
            for p in &self.outline.points {
                sketch.add_point(Point::from(*p))?;
            }
            sketch.close()?;
            sketch.to_polygon(units)
        } else {
            Polygon::new(
                self.outline
                    .points
                    .iter()
                    .map(|[x, y]| Point::new(units.to_ft(*x), units.to_ft(*y))),
            )
        }
    }

    /// Analysis inputs with configuration defaults applied.
    #[must_use]
    pub fn inputs(&self, config: &Config) -> AnalysisInputs {
        AnalysisInputs {
            project: self
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNTITLED_PROJECT.to_string()),
            hazard_class: self.hazard_class,
            hazard_type: self.hazard_type,
            rating: self
                .rating
                .clone()
                .unwrap_or_else(|| DEFAULT_RATING.to_string()),
            liquid_area: self.liquid_area,
            safety_factor: self
                .safety_factor
                .unwrap_or(config.analysis.safety_factor),
            units: self.units(config),
        }
    }

    /// Run the full analysis.
    ///
    /// # Errors
    ///
    /// Returns geometry, input, or code-violation errors.
    pub fn plan(&self, config: &Config) -> Result<Plan> {
        Plan::build(self.polygon(config)?, self.inputs(config), config.coverage())
    }
}

/// Load a project file and plan it in one go.
///
/// # Errors
///
/// Returns any loading or planning error.
pub fn plan_file(path: &Path, config: &Config) -> Result<(Project, Plan)> {
    let project = Project::load(path)?;
    let plan = project.plan(config)?;
    Ok((project, plan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ProjectFormat::from_path(Path::new("a.toml")), ProjectFormat::Toml);
        assert_eq!(ProjectFormat::from_path(Path::new("a.TOML")), ProjectFormat::Toml);
        assert_eq!(ProjectFormat::from_path(Path::new("a.json")), ProjectFormat::Json);
        assert_eq!(ProjectFormat::from_path(Path::new("plan")), ProjectFormat::Json);
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let project: Project = toml::from_str(
            r#"
            hazard_class = "extra"
            [outline]
            points = [[0, 0], [10, 0], [10, 10]]
            "#,
        )
        .unwrap();
        assert_eq!(project.hazard_class, HazardClass::Extra);
        assert_eq!(project.hazard_type, HazardType::ClassA);
        assert!(project.name.is_none());
        assert!(project.outline.grid_scale.is_none());

        let config = Config::default();
        let inputs = project.inputs(&config);
        assert_eq!(inputs.project, UNTITLED_PROJECT);
        assert_eq!(inputs.rating, DEFAULT_RATING);
        assert_eq!(inputs.safety_factor, 1.0);
        assert_eq!(inputs.units, UnitSystem::Imperial);
    }

    #[test]
    fn test_parse_json() {
        let project: Project = serde_json::from_str(
            r#"{"name": "Kitchen", "hazard_type": "class-k", "rating": "Class K (Kitchen)",
                "outline": {"points": [[0,0],[20,0],[20,15],[0,15]]}}"#,
        )
        .unwrap();
        assert_eq!(project.hazard_type, HazardType::ClassK);
        assert_eq!(project.name.as_deref(), Some("Kitchen"));
    }

    #[test]
    fn test_metric_polygon_in_feet() {
        let mut project = Project::template();
        project.units = Some(UnitSystem::Metric);
        project.outline.points = vec![[0.0, 0.0], [3.048, 0.0], [3.048, 3.048], [0.0, 3.048]];
        let poly = project.polygon(&Config::default()).unwrap();
        assert!((poly.area() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_grid_polygon_uses_config_snap() {
        let mut project = Project::template();
        project.outline = Outline {
            points: vec![[0.2, 0.1], [4.0, 0.0], [4.1, 3.9], [0.0, 4.0]],
            grid_scale: Some(5.0),
            snap: None,
        };
        let poly = project.polygon(&Config::default()).unwrap();
        // Snapped to a 4 x 4 cell square at 5 ft per cell.
        assert!((poly.area() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_polygon_explicit_scale_without_snap() {
        let mut project = Project::template();
        project.outline = Outline {
            points: vec![[0.0, 0.0], [2.5, 0.0], [2.5, 2.0], [0.0, 2.0]],
            grid_scale: Some(10.0),
            snap: Some(false),
        };
        let poly = project.polygon(&Config::default()).unwrap();
        assert!((poly.area() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_outline_too_short() {
        let mut project = Project::template();
        project.outline.grid_scale = Some(5.0);
        project.outline.points.truncate(2);
        assert!(project.polygon(&Config::default()).is_err());
    }

    #[test]
    fn test_grid_scale_alone_enables_grid_mode() {
        let project: Project = toml::from_str(
            r#"
            [outline]
            points = [[0, 0], [4, 0], [4, 4], [0, 4]]
            grid_scale = 5.0
            snap = true
            "#,
        )
        .unwrap();
        let poly = project.polygon(&Config::default()).unwrap();
        assert!((poly.area() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_scale_out_of_range() {
        let mut project = Project::template();
        project.outline.grid_scale = Some(0.5);
        assert!(project.polygon(&Config::default()).is_err());
    }

    #[test]
    fn test_blank_name_becomes_untitled() {
        let mut project = Project::template();
        project.name = Some("   ".to_string());
        assert_eq!(project.inputs(&Config::default()).project, UNTITLED_PROJECT);
    }

    #[test]
    fn test_config_units_used_when_unset() {
        let mut project = Project::template();
        project.units = None;
        let mut config = Config::default();
        config.units.system = UnitSystem::Metric;
        assert_eq!(project.units(&config), UnitSystem::Metric);
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        let project = Project::template();
        project.save(&path, false).unwrap();
        assert_eq!(Project::load(&path).unwrap(), project);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let project = Project::template();
        project.save(&path, false).unwrap();
        assert_eq!(Project::load(&path).unwrap(), project);
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        Project::template().save(&path, false).unwrap();
        let err = Project::template().save(&path, false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));
        assert!(Project::template().save(&path, true).is_ok());
    }

    #[test]
    fn test_load_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "name = \"x\"\n").unwrap();
        let err = Project::load(&path).unwrap_err();
        assert!(matches!(err, Error::ProjectParse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_template_plans() {
        let plan = Project::template().plan(&Config::default()).unwrap();
        assert_eq!(plan.option_count(), 3);
        assert!((plan.analysis.area_sqft - 6000.0).abs() < 1e-9);
    }
}
