// Rule set and settings validation
// Invalid configuration fails fast with actionable errors; suspicious but
// usable configuration is reported as warnings.

use crate::classify::rule::Rule;
use crate::config::settings::Settings;
use crate::config::types::{QaError, Result};
use std::collections::HashSet;

/// Validation result with detailed errors
#[derive(Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that a rule list is total: non-empty and ending in a default
pub fn validate_rules<O: ?Sized, L>(rules: &[Rule<O, L>]) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(last) = rules.last() else {
        result.add_error("rule set must contain at least one rule".to_string());
        return result;
    };

    if !last.predicate().is_unconditional() {
        result.add_error(format!(
            "last rule '{}' must be an unconditional default",
            last.name()
        ));
    }

    // An unconditional rule before the end shadows everything after it.
    if let Some(pos) = rules[..rules.len() - 1]
        .iter()
        .position(|r| r.predicate().is_unconditional())
    {
        result.add_warning(format!(
            "rule '{}' at position {} is unconditional; {} later rule(s) are unreachable",
            rules[pos].name(),
            pos,
            rules.len() - pos - 1
        ));
    }

    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.name()) {
            result.add_warning(format!("duplicate rule name '{}'", rule.name()));
        }
    }

    result
}

/// Validate settings after loading
pub fn validate_settings(settings: &Settings) -> Result<ValidationResult> {
    let mut result = ValidationResult::new();

    validate_thresholds(settings, &mut result);
    validate_retry(settings, &mut result);
    validate_environments(settings, &mut result);

    if !result.is_valid() {
        let error_msg = format!("settings validation failed:\n{}", result.errors.join("\n"));
        return Err(QaError::Configuration(error_msg));
    }

    Ok(result)
}

fn validate_thresholds(settings: &Settings, result: &mut ValidationResult) {
    let verdict = &settings.verdict;
    if verdict.review_max_failures < verdict.ready_max_failures {
        result.add_error(format!(
            "verdict.review_max_failures ({}) must be >= verdict.ready_max_failures ({})",
            verdict.review_max_failures, verdict.ready_max_failures
        ));
    }

    if let Err(e) = check_sla_threshold(settings.sla_threshold_ms) {
        result.add_error(format!("sla_threshold_ms: {}", e));
    } else if settings.sla_threshold_ms == 0.0 {
        result.add_warning("sla_threshold_ms is zero; every positive sample breaches".to_string());
    }
}

/// An SLA threshold must be a finite, non-negative number of milliseconds
pub fn check_sla_threshold(value: f64) -> std::result::Result<(), String> {
    if !value.is_finite() {
        Err(format!("threshold must be finite, got {}", value))
    } else if value < 0.0 {
        Err(format!("threshold cannot be negative: {}", value))
    } else {
        Ok(())
    }
}

fn validate_retry(settings: &Settings, result: &mut ValidationResult) {
    if settings.max_attempts == 0 {
        result.add_error("max_attempts cannot be zero".to_string());
    }
}

fn validate_environments(settings: &Settings, result: &mut ValidationResult) {
    if settings.environments.is_empty() {
        result.add_warning("no environments configured; every lookup resolves to UNKNOWN".to_string());
    }

    let mut names = HashSet::new();
    for profile in &settings.environments {
        if profile.name.trim().is_empty() {
            result.add_error("environment name cannot be empty".to_string());
            continue;
        }

        for name in std::iter::once(&profile.name).chain(profile.aliases.iter()) {
            if !names.insert(name.trim().to_ascii_lowercase()) {
                result.add_error(format!(
                    "environment name or alias '{}' is defined more than once",
                    name
                ));
            }
        }

        if profile.timeout_ms == 0 {
            result.add_warning(format!("environment '{}' has a zero timeout", profile.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::EnvironmentProfile;

    fn profile(name: &str, aliases: &[&str]) -> EnvironmentProfile {
        EnvironmentProfile {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            base_url: format!("https://{}.example.com", name),
            api_key_prefix: "K-".to_string(),
            timeout_ms: 1000,
            description: String::new(),
        }
    }

    #[test]
    fn test_total_rule_list_is_valid() {
        let rules: Vec<Rule<i32, &str>> = vec![
            Rule::when("positive", |n: &i32| *n > 0, "positive"),
            Rule::otherwise("other"),
        ];
        let result = validate_rules(&rules);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_default_is_error() {
        let rules: Vec<Rule<i32, &str>> = vec![Rule::when("positive", |n: &i32| *n > 0, "positive")];
        let result = validate_rules(&rules);
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_unreachable_and_duplicate_rules_warn() {
        let rules: Vec<Rule<i32, &str>> = vec![
            Rule::when("positive", |n: &i32| *n > 0, "a"),
            Rule::when("positive", |n: &i32| *n > 1, "b"),
            Rule::otherwise("c"),
            Rule::otherwise("d"),
        ];
        let result = validate_rules(&rules);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 3);
        assert!(result.warnings[0].contains("unreachable"));
    }

    #[test]
    fn test_default_settings_are_valid() {
        let result = validate_settings(&Settings::default()).unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut settings = Settings::default();
        settings.verdict.ready_max_failures = 3;
        settings.verdict.review_max_failures = 1;
        assert!(matches!(
            validate_settings(&settings),
            Err(QaError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_attempts_and_bad_sla_rejected() {
        let mut settings = Settings::default();
        settings.max_attempts = 0;
        settings.sla_threshold_ms = f64::NAN;
        match validate_settings(&settings) {
            Err(QaError::Configuration(msg)) => {
                assert!(msg.contains("max_attempts"));
                assert!(msg.contains("sla_threshold_ms"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_sla_threshold_check() {
        assert!(check_sla_threshold(500.0).is_ok());
        assert!(check_sla_threshold(0.0).is_ok());
        assert!(check_sla_threshold(-1.0).is_err());
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(check_sla_threshold(bad).unwrap_err().contains("finite"));
        }
    }

    #[test]
    fn test_duplicate_environment_alias_rejected() {
        let mut settings = Settings::default();
        settings.environments = vec![profile("prod", &["production"]), profile("Production", &[])];
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_empty_environment_table_warns() {
        let mut settings = Settings::default();
        settings.environments.clear();
        let result = validate_settings(&settings).unwrap();
        assert_eq!(result.warnings.len(), 1);
    }
}
