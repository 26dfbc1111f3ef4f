//! # Analysis Settings
//!
//! User-tunable defaults for the calculator. Settings are stored as JSON and
//! every field is optional; anything missing falls back to [`AnalysisSettings::default`].
//!
//! ```json
//! {
//!   "unit_system": "Imperial",
//!   "sample_points": 200,
//!   "decimals": 3
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::UnitSystem;

/// Default number of moment diagram samples
pub const DEFAULT_SAMPLE_POINTS: usize = 100;

/// Smallest usable moment diagram resolution (both supports)
pub const MIN_SAMPLE_POINTS: usize = 2;

/// Largest accepted moment diagram resolution
pub const MAX_SAMPLE_POINTS: usize = 100_000;

/// Default decimal places for displayed and exported values
pub const DEFAULT_DECIMALS: usize = 2;

const MAX_DECIMALS: usize = 10;

/// Calculator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Unit system preselected for new calculations
    pub unit_system: UnitSystem,

    /// Number of evenly spaced moment samples over the span, endpoints included
    pub sample_points: usize,

    /// Decimal places used in reports
    pub decimals: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            unit_system: UnitSystem::Metric,
            sample_points: DEFAULT_SAMPLE_POINTS,
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl AnalysisSettings {
    /// Set the moment diagram resolution, clamped to
    /// `MIN_SAMPLE_POINTS..=MAX_SAMPLE_POINTS`
    pub fn with_sample_points(mut self, points: usize) -> Self {
        self.sample_points = points.clamp(MIN_SAMPLE_POINTS, MAX_SAMPLE_POINTS);
        self
    }

    /// Set the default unit system
    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    /// Parse settings from a JSON string and validate them.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: AnalysisSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate setting ranges.
    pub fn validate(&self) -> CalcResult<()> {
        if self.sample_points < MIN_SAMPLE_POINTS {
            return Err(CalcError::invalid_input(
                "sample_points",
                self.sample_points.to_string(),
                "Moment diagram needs at least 2 sample points",
            ));
        }
        if self.sample_points > MAX_SAMPLE_POINTS {
            return Err(CalcError::invalid_input(
                "sample_points",
                self.sample_points.to_string(),
                format!("At most {} sample points are supported", MAX_SAMPLE_POINTS),
            ));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(CalcError::invalid_input(
                "decimals",
                self.decimals.to_string(),
                format!("At most {} decimal places are supported", MAX_DECIMALS),
            ));
        }
        Ok(())
    }
}

/// Load settings from a JSON file.
pub fn load_settings(path: &Path) -> CalcResult<AnalysisSettings> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CalcError::file_error("read settings", path.display().to_string(), e.to_string())
    })?;
    AnalysisSettings::from_json(&contents)
}

/// Load settings from `path`, or use the defaults when no path is given.
///
/// A path that was given but cannot be read is a `FileError`.
pub fn load_settings_or_default(path: Option<&Path>) -> CalcResult<AnalysisSettings> {
    match path {
        Some(p) => load_settings(p),
        None => Ok(AnalysisSettings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn test_defaults() {
        let settings = AnalysisSettings::default();
        assert_eq!(settings.unit_system, UnitSystem::Metric);
        assert_eq!(settings.sample_points, 100);
        assert_eq!(settings.decimals, 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = AnalysisSettings::from_json(r#"{ "unit_system": "Americano" }"#).unwrap();
        assert_eq!(settings.unit_system, UnitSystem::Mixed);
        assert_eq!(settings.sample_points, DEFAULT_SAMPLE_POINTS);
    }

    #[test]
    fn test_rejects_single_sample() {
        let err = AnalysisSettings::from_json(r#"{ "sample_points": 1 }"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rejects_huge_sample_count() {
        let err = AnalysisSettings::from_json(r#"{ "sample_points": 18446744073709551615 }"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("sample_points"));

        let max = format!(r#"{{ "sample_points": {} }}"#, MAX_SAMPLE_POINTS);
        assert_eq!(AnalysisSettings::from_json(&max).unwrap().sample_points, MAX_SAMPLE_POINTS);
    }

    #[test]
    fn test_with_sample_points_clamps() {
        let settings = AnalysisSettings::default().with_sample_points(0);
        assert_eq!(settings.sample_points, MIN_SAMPLE_POINTS);

        let settings = AnalysisSettings::default().with_sample_points(usize::MAX);
        assert_eq!(settings.sample_points, MAX_SAMPLE_POINTS);
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_dir().join("beam_settings_test_load.json");
        fs::write(&path, r#"{ "sample_points": 11, "decimals": 4 }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.sample_points, 11);
        assert_eq!(settings.decimals, 4);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_no_path_falls_back() {
        let settings = load_settings_or_default(None).unwrap();
        assert_eq!(settings, AnalysisSettings::default());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let path = temp_dir().join("beam_settings_test_does_not_exist.json");
        let _ = fs::remove_file(&path);

        let err = load_settings_or_default(Some(&path)).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(err.to_string().contains("beam_settings_test_does_not_exist.json"));
    }
}
