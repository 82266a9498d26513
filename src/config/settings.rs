/// Runtime settings: verdict thresholds, SLA threshold, retry budget and the
/// environment lookup table. Loaded from JSON; every field has a default.
use crate::config::presets::default_environments;
use crate::config::types::{EnvironmentProfile, QaError, Result, TestResult};
use crate::config::validator::validate_settings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Failure-count thresholds for the release verdict
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerdictThresholds {
    /// At most this many failures still counts as ready
    pub ready_max_failures: usize,
    /// At most this many failures requires review; more blocks the release
    pub review_max_failures: usize,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            ready_max_failures: 0,
            review_max_failures: 2,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Label counted towards the success rate
    pub success_label: TestResult,
    /// Response times strictly above this breach the SLA
    pub sla_threshold_ms: f64,
    pub verdict: VerdictThresholds,
    /// Upper bound on retry attempts
    pub max_attempts: u32,
    pub environments: Vec<EnvironmentProfile>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            success_label: TestResult::Pass,
            sla_threshold_ms: 500.0,
            verdict: VerdictThresholds::default(),
            max_attempts: 5,
            environments: default_environments(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| QaError::Configuration(format!("failed to parse settings: {}", e)))?;

        let validation = validate_settings(&settings)?;
        for warning in &validation.warnings {
            log::warn!("settings: {}", warning);
        }

        Ok(settings)
    }

    /// Load settings from a JSON file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::debug!("no settings file given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            QaError::Configuration(format!(
                "failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        log::debug!("loaded settings from {}", path.display());
        Self::from_json_str(&content)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| QaError::Configuration(format!("failed to serialize settings: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_yields_defaults() {
        let settings = Settings::from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_json_str(
            r#"{ "sla_threshold_ms": 250, "verdict": { "review_max_failures": 5 } }"#,
        )
        .unwrap();
        assert_eq!(settings.sla_threshold_ms, 250.0);
        assert_eq!(settings.verdict.ready_max_failures, 0);
        assert_eq!(settings.verdict.review_max_failures, 5);
        assert_eq!(settings.max_attempts, 5);
    }

    #[test]
    fn test_success_label_parsed() {
        let settings = Settings::from_json_str(r#"{ "success_label": "skip" }"#).unwrap();
        assert_eq!(settings.success_label, TestResult::Skip);
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        assert!(matches!(
            Settings::from_json_str("{ not json"),
            Err(QaError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected_after_parse() {
        assert!(Settings::from_json_str(r#"{ "max_attempts": 0 }"#).is_err());
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let json = Settings::default().to_json().unwrap();
        assert_eq!(Settings::from_json_str(&json).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }
}
