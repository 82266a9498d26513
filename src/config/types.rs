/// Core types and closed label enumerations for qaverdict
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A closed enumeration of outcome labels.
///
/// `declared()` fixes both the label set and its order; aggregation tallies
/// every declared label, including those that never occur.
pub trait Label: Clone + PartialEq + fmt::Display + 'static {
    fn declared() -> &'static [Self];
}

/// Observed state of a UI element under test
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElementObservation {
    pub is_present: bool,
    pub is_displayed: bool,
    pub is_enabled: bool,
}

impl ElementObservation {
    pub fn new(is_present: bool, is_displayed: bool, is_enabled: bool) -> Self {
        Self {
            is_present,
            is_displayed,
            is_enabled,
        }
    }
}

/// Element state taxonomy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ElementState {
    #[serde(rename = "READY")]
    Ready,
    #[serde(rename = "HIDDEN")]
    Hidden,
    #[serde(rename = "DISABLED")]
    Disabled,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementState::Ready => write!(f, "READY"),
            ElementState::Hidden => write!(f, "HIDDEN"),
            ElementState::Disabled => write!(f, "DISABLED"),
            ElementState::NotFound => write!(f, "NOT_FOUND"),
            ElementState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl Label for ElementState {
    fn declared() -> &'static [Self] {
        &[
            ElementState::Ready,
            ElementState::Hidden,
            ElementState::Disabled,
            ElementState::NotFound,
            ElementState::Unknown,
        ]
    }
}

/// Severity of an element finding
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Severity {
    #[serde(rename = "CRITICAL")]
    Critical,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "OK")]
    Ok,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Ok => write!(f, "OK"),
        }
    }
}

impl Label for Severity {
    fn declared() -> &'static [Self] {
        &[Severity::Critical, Severity::Warning, Severity::Ok]
    }
}

/// How often a bug reproduces
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Always,
    Often,
    Rarely,
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Frequency::Always),
            "often" => Ok(Frequency::Often),
            "rarely" => Ok(Frequency::Rarely),
            other => Err(format!("unknown frequency: {}", other)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Always => write!(f, "always"),
            Frequency::Often => write!(f, "often"),
            Frequency::Rarely => write!(f, "rarely"),
        }
    }
}

/// What a bug does to the user when it reproduces
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Blocker,
    Major,
    Minor,
}

impl FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blocker" => Ok(Impact::Blocker),
            "major" => Ok(Impact::Major),
            "minor" => Ok(Impact::Minor),
            other => Err(format!("unknown impact: {}", other)),
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::Blocker => write!(f, "blocker"),
            Impact::Major => write!(f, "major"),
            Impact::Minor => write!(f, "minor"),
        }
    }
}

/// Bug report fields used for priority triage.
///
/// `None` marks a value outside the known enumeration; such bugs fall through
/// to `Priority::Unknown`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BugObservation {
    pub frequency: Option<Frequency>,
    pub impact: Option<Impact>,
}

impl BugObservation {
    pub fn new(frequency: Frequency, impact: Impact) -> Self {
        Self {
            frequency: Some(frequency),
            impact: Some(impact),
        }
    }

    /// Parse raw field values; unrecognized values become `None`
    pub fn parse(frequency: &str, impact: &str) -> Self {
        Self {
            frequency: frequency.parse().ok(),
            impact: impact.parse().ok(),
        }
    }
}

/// Bug priority, P0 most urgent
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
    P4,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::P0 => write!(f, "P0"),
            Priority::P1 => write!(f, "P1"),
            Priority::P2 => write!(f, "P2"),
            Priority::P3 => write!(f, "P3"),
            Priority::P4 => write!(f, "P4"),
            Priority::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl Label for Priority {
    fn declared() -> &'static [Self] {
        &[
            Priority::P0,
            Priority::P1,
            Priority::P2,
            Priority::P3,
            Priority::P4,
            Priority::Unknown,
        ]
    }
}

/// Outcome of a single test case
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

impl FromStr for TestResult {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(TestResult::Pass),
            "fail" => Ok(TestResult::Fail),
            "skip" => Ok(TestResult::Skip),
            other => Err(format!("unknown test result: {}", other)),
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass => write!(f, "pass"),
            TestResult::Fail => write!(f, "fail"),
            TestResult::Skip => write!(f, "skip"),
        }
    }
}

impl Label for TestResult {
    fn declared() -> &'static [Self] {
        &[TestResult::Pass, TestResult::Fail, TestResult::Skip]
    }
}

/// Release decision derived from a test summary
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReleaseVerdict {
    #[serde(rename = "READY")]
    Ready,
    #[serde(rename = "REVIEW")]
    Review,
    #[serde(rename = "BLOCK")]
    Block,
}

impl fmt::Display for ReleaseVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseVerdict::Ready => write!(f, "READY FOR RELEASE"),
            ReleaseVerdict::Review => write!(f, "REVIEW REQUIRED"),
            ReleaseVerdict::Block => write!(f, "BLOCK RELEASE"),
        }
    }
}

impl Label for ReleaseVerdict {
    fn declared() -> &'static [Self] {
        &[
            ReleaseVerdict::Ready,
            ReleaseVerdict::Review,
            ReleaseVerdict::Block,
        ]
    }
}

/// SLA decision derived from a latency summary
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SlaVerdict {
    #[serde(rename = "WITHIN_SLA")]
    WithinSla,
    #[serde(rename = "SLA_BREACHED")]
    Breached,
}

impl fmt::Display for SlaVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlaVerdict::WithinSla => write!(f, "WITHIN SLA"),
            SlaVerdict::Breached => write!(f, "SLA BREACHED"),
        }
    }
}

impl Label for SlaVerdict {
    fn declared() -> &'static [Self] {
        &[SlaVerdict::WithinSla, SlaVerdict::Breached]
    }
}

/// Target environment settings, looked up by name or alias
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentProfile {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub base_url: String,
    pub api_key_prefix: String,
    pub timeout_ms: u64,
    pub description: String,
}

impl EnvironmentProfile {
    pub fn answers_to(&self, name: &str) -> bool {
        let name = name.trim();
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// API key with everything past the prefix masked
    pub fn masked_api_key(&self) -> String {
        format!("{}XXXX-XXXX", self.api_key_prefix)
    }
}

/// Result of an environment lookup
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum EnvironmentMatch {
    Known(EnvironmentProfile),
    Unknown,
}

impl fmt::Display for EnvironmentMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentMatch::Known(profile) => write!(f, "{}", profile.name),
            EnvironmentMatch::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// An element observation together with its derived state and severity
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElementAssessment {
    pub observation: ElementObservation,
    pub state: ElementState,
    pub severity: Severity,
}

/// A requested environment name and what it resolved to
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentLookup {
    pub requested: String,
    pub matched: EnvironmentMatch,
}

/// Error taxonomy for qaverdict
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QaError {
    /// Malformed rule set or settings; the caller must fix the configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Numeric aggregation over zero samples
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Numeric input that cannot be ordered or summed (NaN, infinity)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for qaverdict operations
pub type Result<T> = std::result::Result<T, QaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display_matches_serde_names() {
        for state in ElementState::declared() {
            let json = serde_json::to_string(state).unwrap();
            assert_eq!(json, format!("\"{}\"", state));
        }
        assert_eq!(serde_json::to_string(&Priority::Unknown).unwrap(), "\"UNKNOWN\"");
        assert_eq!(serde_json::to_string(&TestResult::Skip).unwrap(), "\"skip\"");
    }

    #[test]
    fn test_parse_test_result() {
        assert_eq!("pass".parse::<TestResult>(), Ok(TestResult::Pass));
        assert_eq!(" FAIL ".parse::<TestResult>(), Ok(TestResult::Fail));
        assert!("flaky".parse::<TestResult>().is_err());
    }

    #[test]
    fn test_bug_observation_parse_keeps_unknown_fields_empty() {
        let bug = BugObservation::parse("sometimes", "major");
        assert_eq!(bug.frequency, None);
        assert_eq!(bug.impact, Some(Impact::Major));
    }

    #[test]
    fn test_environment_profile_aliases() {
        let profile = EnvironmentProfile {
            name: "prod".to_string(),
            aliases: vec!["production".to_string()],
            base_url: "https://api.example.com".to_string(),
            api_key_prefix: "PROD-".to_string(),
            timeout_ms: 8000,
            description: "Production environment".to_string(),
        };
        assert!(profile.answers_to("prod"));
        assert!(profile.answers_to("Production"));
        assert!(!profile.answers_to("staging"));
        assert_eq!(profile.masked_api_key(), "PROD-XXXX-XXXX");
    }

    #[test]
    fn test_error_messages() {
        let err = QaError::Configuration("rule set is empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: rule set is empty");
        let err = QaError::EmptyInput("no samples".to_string());
        assert_eq!(err.to_string(), "Empty input: no samples");
        let err = QaError::InvalidInput("sample 1 must be finite, got NaN".to_string());
        assert_eq!(err.to_string(), "Invalid input: sample 1 must be finite, got NaN");
    }
}
