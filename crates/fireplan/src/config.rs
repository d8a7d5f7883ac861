//! Configuration management for fireplan.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults. It
//! holds the preferences a planner expects to persist between sessions:
//! unit system, drawing grid, analysis defaults and update checks.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{MAX_SAFETY_FACTOR, MIN_SAFETY_FACTOR};
use crate::coverage::{CoverageSettings, DEFAULT_SAMPLES, DEFAULT_THRESHOLD};
use crate::error::{Error, Result};
use crate::units::UnitSystem;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name.
const APP_DIR_NAME: &str = "fireplan";

/// Default report file name.
pub const DEFAULT_REPORT_FILE_NAME: &str = "Fire_Extinguisher_Plan.html";

/// Where released versions are announced.
pub const DEFAULT_UPDATE_URL: &str =
    "https://raw.githubusercontent.com/Mohammad-Negahdary/Fire-Extinguisher-Planner/main/version.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FIREPLAN_`, sections split by `__`)
/// 2. TOML config file at `~/.config/fireplan/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unit preferences.
    pub units: UnitsConfig,
    /// Drawing grid preferences.
    pub sketch: SketchConfig,
    /// Analysis defaults.
    pub analysis: AnalysisConfig,
    /// Report output.
    pub report: ReportConfig,
    /// Update checks.
    pub updates: UpdatesConfig,
}

/// Unit preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitsConfig {
    /// Unit system used when a project does not choose one.
    pub system: UnitSystem,
}

/// Drawing grid preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Snap vertices to grid intersections.
    pub snap: bool,
}

/// Analysis defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Safety factor used when a project does not set one.
    pub safety_factor: f64,
    /// Coverage sample cells per axis.
    pub coverage_samples: usize,
    /// Fraction of the floor that must be reached.
    pub coverage_threshold: f64,
}

/// Report output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory for generated reports. Defaults to the current directory.
    pub output_dir: Option<PathBuf>,
}

/// Update check settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatesConfig {
    /// Whether update checks are allowed.
    pub enabled: bool,
    /// URL of the version manifest.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self { snap: true }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            safety_factor: MAX_SAFETY_FACTOR,
            coverage_samples: DEFAULT_SAMPLES,
            coverage_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Default for UpdatesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_UPDATE_URL.to_string(),
            timeout_secs: 5,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `FIREPLAN_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("FIREPLAN_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SAFETY_FACTOR..=MAX_SAFETY_FACTOR).contains(&self.analysis.safety_factor) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "analysis.safety_factor ({}) must be between {MIN_SAFETY_FACTOR} and {MAX_SAFETY_FACTOR}",
                    self.analysis.safety_factor
                ),
            });
        }

        if self.analysis.coverage_samples == 0 {
            return Err(Error::ConfigValidation {
                message: "analysis.coverage_samples must be greater than 0".to_string(),
            });
        }

        if !(self.analysis.coverage_threshold > 0.0 && self.analysis.coverage_threshold <= 1.0) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "analysis.coverage_threshold ({}) must be in (0, 1]",
                    self.analysis.coverage_threshold
                ),
            });
        }

        if self.updates.url.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "updates.url must not be empty".to_string(),
            });
        }

        if self.updates.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "updates.timeout_secs must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Coverage sampling parameters.
    #[must_use]
    pub fn coverage(&self) -> CoverageSettings {
        CoverageSettings {
            samples: self.analysis.coverage_samples,
            threshold: self.analysis.coverage_threshold,
        }
    }

    /// Get the update request timeout as a Duration.
    #[must_use]
    pub fn update_timeout(&self) -> Duration {
        Duration::from_secs(self.updates.timeout_secs)
    }

    /// Get the default report path, resolving the output directory.
    #[must_use]
    pub fn default_report_path(&self) -> PathBuf {
        self.report
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_REPORT_FILE_NAME)
    }

    /// Render the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write default configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write_defaults(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        std::fs::write(path, Config::default().to_toml()?)?;
        info!("Wrote default configuration to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.units.system, UnitSystem::Imperial);
        assert!(config.sketch.snap);
        assert_eq!(config.analysis.safety_factor, 1.0);
        assert!(config.updates.enabled);
        assert!(config.report.output_dir.is_none());
    }

    #[test]
    fn test_default_analysis_config() {
        let analysis = AnalysisConfig::default();

        assert_eq!(analysis.coverage_samples, 200);
        assert_eq!(analysis.coverage_threshold, 0.999);
    }

    #[test]
    fn test_default_updates_config() {
        let updates = UpdatesConfig::default();

        assert_eq!(updates.url, DEFAULT_UPDATE_URL);
        assert_eq!(updates.timeout_secs, 5);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_safety_factor() {
        let mut config = Config::default();
        config.analysis.safety_factor = 1.5;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("safety_factor"));
    }

    #[test]
    fn test_validate_zero_samples() {
        let mut config = Config::default();
        config.analysis.coverage_samples = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("coverage_samples"));
    }

    #[test]
    fn test_validate_threshold() {
        let mut config = Config::default();
        config.analysis.coverage_threshold = 0.0;
        assert!(config.validate().is_err());

        config.analysis.coverage_threshold = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_update_settings() {
        let mut config = Config::default();
        config.updates.url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.updates.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_coverage_settings() {
        let config = Config::default();
        let cov = config.coverage();
        assert_eq!(cov.samples, 200);
        assert_eq!(cov.threshold, 0.999);
    }

    #[test]
    fn test_update_timeout() {
        let config = Config::default();
        assert_eq!(config.update_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_default_report_path() {
        let mut config = Config::default();
        assert_eq!(
            config.default_report_path(),
            PathBuf::from(".").join(DEFAULT_REPORT_FILE_NAME)
        );

        config.report.output_dir = Some(PathBuf::from("/reports"));
        assert_eq!(
            config.default_report_path(),
            PathBuf::from("/reports/Fire_Extinguisher_Plan.html")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("fireplan"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[units]\nsystem = \"metric\"\n\n[sketch]\nsnap = false\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.units.system, UnitSystem::Metric);
        assert!(!config.sketch.snap);
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nsafety_factor = 0.1\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_write_defaults_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::write_defaults(&path).unwrap();

        let loaded = Config::load_from(Some(path)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("snap"));
        assert!(json.contains("coverage_threshold"));
    }
}
