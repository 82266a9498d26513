/// Built-in rule tables
///
/// Each QA check is expressed as data: an ordered rule table whose first
/// matching rule decides. Tables that depend on external configuration
/// (release thresholds, environment profiles) take it as a parameter.
use crate::aggregate::{NumericSummary, Summary};
use crate::classify::{Rule, RuleSet};
use crate::config::settings::VerdictThresholds;
use crate::config::types::*;
use crate::retry::RetryOutcome;
use std::fmt;
use std::sync::OnceLock;

/// Element state: missing, then hidden, then disabled, then ready
pub fn element_state_rules() -> RuleSet<ElementObservation, ElementState> {
    RuleSet::with_default(
        vec![
            Rule::when(
                "not_present",
                |e: &ElementObservation| !e.is_present,
                ElementState::NotFound,
            ),
            Rule::when(
                "not_displayed",
                |e: &ElementObservation| !e.is_displayed,
                ElementState::Hidden,
            ),
            Rule::when(
                "not_enabled",
                |e: &ElementObservation| !e.is_enabled,
                ElementState::Disabled,
            ),
            Rule::when(
                "interactable",
                |e: &ElementObservation| e.is_present && e.is_displayed && e.is_enabled,
                ElementState::Ready,
            ),
        ],
        ElementState::Unknown,
    )
}

pub fn element_severity_rules() -> RuleSet<ElementObservation, Severity> {
    RuleSet::with_default(
        vec![
            Rule::when(
                "missing",
                |e: &ElementObservation| !e.is_present,
                Severity::Critical,
            ),
            Rule::when(
                "hidden_or_disabled",
                |e: &ElementObservation| !e.is_displayed || !e.is_enabled,
                Severity::Warning,
            ),
        ],
        Severity::Ok,
    )
}

/// Recommended follow-up for an assessed element
pub fn element_action_rules() -> RuleSet<ElementAssessment, &'static str> {
    let by_state = |name: &str, state: ElementState, action: &'static str| {
        Rule::when(name, move |a: &ElementAssessment| a.state == state, action)
    };

    RuleSet::with_default(
        vec![
            by_state("ready", ElementState::Ready, "Interact with element as normal."),
            by_state(
                "disabled",
                ElementState::Disabled,
                "Check why element is disabled before interacting.",
            ),
            by_state(
                "hidden",
                ElementState::Hidden,
                "Check element visibility or wait for it to appear.",
            ),
            by_state(
                "not_found",
                ElementState::NotFound,
                "Investigate missing element in DOM.",
            ),
        ],
        "Check element state manually.",
    )
}

/// Classify an element observation into state and severity
pub fn assess_element(
    observation: ElementObservation,
    state_rules: &RuleSet<ElementObservation, ElementState>,
    severity_rules: &RuleSet<ElementObservation, Severity>,
) -> ElementAssessment {
    ElementAssessment {
        observation,
        state: *state_rules.classify(&observation),
        severity: *severity_rules.classify(&observation),
    }
}

const PRIORITY_MATRIX: [(Frequency, Impact, Priority); 9] = [
    (Frequency::Always, Impact::Blocker, Priority::P0),
    (Frequency::Always, Impact::Major, Priority::P1),
    (Frequency::Always, Impact::Minor, Priority::P2),
    (Frequency::Often, Impact::Blocker, Priority::P1),
    (Frequency::Often, Impact::Major, Priority::P2),
    (Frequency::Often, Impact::Minor, Priority::P3),
    (Frequency::Rarely, Impact::Blocker, Priority::P2),
    (Frequency::Rarely, Impact::Major, Priority::P3),
    (Frequency::Rarely, Impact::Minor, Priority::P4),
];

/// Bug priority from the frequency x impact matrix
pub fn bug_priority_rules() -> RuleSet<BugObservation, Priority> {
    let rules = PRIORITY_MATRIX
        .iter()
        .map(|&(frequency, impact, priority)| {
            Rule::when(
                format!("{}_{}", frequency, impact),
                move |b: &BugObservation| {
                    b.frequency == Some(frequency) && b.impact == Some(impact)
                },
                priority,
            )
        })
        .collect();

    RuleSet::with_default(rules, Priority::Unknown)
}

/// Release verdict from the failure count of a test summary
pub fn release_verdict_rules(
    thresholds: &VerdictThresholds,
) -> RuleSet<Summary<TestResult>, ReleaseVerdict> {
    let ready = thresholds.ready_max_failures;
    let review = thresholds.review_max_failures;

    RuleSet::with_default(
        vec![
            Rule::when(
                "failures_within_ready",
                move |s: &Summary<TestResult>| s.count(&TestResult::Fail) <= ready,
                ReleaseVerdict::Ready,
            ),
            Rule::when(
                "failures_within_review",
                move |s: &Summary<TestResult>| s.count(&TestResult::Fail) <= review,
                ReleaseVerdict::Review,
            ),
        ],
        ReleaseVerdict::Block,
    )
}

pub fn sla_verdict_rules() -> RuleSet<NumericSummary, SlaVerdict> {
    RuleSet::with_default(
        vec![Rule::when(
            "no_breaches",
            |s: &NumericSummary| s.breaches == 0,
            SlaVerdict::WithinSla,
        )],
        SlaVerdict::Breached,
    )
}

/// Environment lookup table built from externally supplied profiles
///
/// Profiles are matched by name or alias, case-insensitively, in the order
/// given.
pub fn environment_rules(profiles: &[EnvironmentProfile]) -> RuleSet<str, EnvironmentMatch> {
    let rules = profiles
        .iter()
        .map(|profile| {
            let candidate = profile.clone();
            Rule::when(
                profile.name.clone(),
                move |name: &str| candidate.answers_to(name),
                EnvironmentMatch::Known(profile.clone()),
            )
        })
        .collect();

    RuleSet::with_default(rules, EnvironmentMatch::Unknown)
}

pub fn lookup_environment(
    name: &str,
    rules: &RuleSet<str, EnvironmentMatch>,
) -> EnvironmentLookup {
    EnvironmentLookup {
        requested: name.to_string(),
        matched: rules.classify(name).clone(),
    }
}

pub fn environment_resolution_rules() -> RuleSet<EnvironmentLookup, &'static str> {
    RuleSet::with_default(
        vec![Rule::when(
            "known",
            |l: &EnvironmentLookup| matches!(l.matched, EnvironmentMatch::Known(_)),
            "RESOLVED",
        )],
        "UNKNOWN ENVIRONMENT",
    )
}

pub fn retry_verdict_rules() -> RuleSet<RetryOutcome, &'static str> {
    RuleSet::with_default(
        vec![Rule::when(
            "succeeded",
            |o: &RetryOutcome| o.is_success(),
            "SUCCEEDED",
        )],
        "EXHAUSTED",
    )
}

/// Sample environment table used when settings supply none
pub fn default_environments() -> Vec<EnvironmentProfile> {
    let profile = |name: &str, aliases: &[&str], url: &str, prefix: &str, timeout_ms, desc: &str| {
        EnvironmentProfile {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            base_url: url.to_string(),
            api_key_prefix: prefix.to_string(),
            timeout_ms,
            description: desc.to_string(),
        }
    };

    vec![
        profile(
            "dev",
            &[],
            "https://dev.api.example.com",
            "DEV-",
            3000,
            "Development environment",
        ),
        profile(
            "staging",
            &[],
            "https://staging.api.example.com",
            "STG-",
            5000,
            "Staging environment",
        ),
        profile(
            "qa",
            &[],
            "https://qa.api.example.com",
            "QA-",
            4000,
            "QA environment",
        ),
        profile(
            "prod",
            &["production"],
            "https://api.example.com",
            "PROD-",
            8000,
            "Production environment",
        ),
    ]
}

/// Catalog entry describing one built-in rule table
#[derive(Debug, Clone, PartialEq)]
pub struct PresetInfo {
    pub id: &'static str,
    pub description: &'static str,
    /// (rule name, label) in evaluation order
    pub rules: Vec<(String, String)>,
}

impl PresetInfo {
    fn describe<O: ?Sized, L: fmt::Display>(
        id: &'static str,
        description: &'static str,
        rules: &RuleSet<O, L>,
    ) -> Self {
        Self {
            id,
            description,
            rules: rules
                .rules()
                .map(|r| (r.name().to_string(), r.label().to_string()))
                .collect(),
        }
    }
}

/// Registry of the built-in, configuration-independent rule tables
pub struct PresetRegistry {
    pub element_state: RuleSet<ElementObservation, ElementState>,
    pub element_severity: RuleSet<ElementObservation, Severity>,
    pub element_action: RuleSet<ElementAssessment, &'static str>,
    pub bug_priority: RuleSet<BugObservation, Priority>,
    pub sla_verdict: RuleSet<NumericSummary, SlaVerdict>,
    pub environment_resolution: RuleSet<EnvironmentLookup, &'static str>,
    pub retry_verdict: RuleSet<RetryOutcome, &'static str>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self {
            element_state: element_state_rules(),
            element_severity: element_severity_rules(),
            element_action: element_action_rules(),
            bug_priority: bug_priority_rules(),
            sla_verdict: sla_verdict_rules(),
            environment_resolution: environment_resolution_rules(),
            retry_verdict: retry_verdict_rules(),
        }
    }

    /// Catalog of all tables in registration order
    pub fn list(&self) -> Vec<PresetInfo> {
        vec![
            PresetInfo::describe(
                "element-state",
                "UI element state from presence, visibility and enablement",
                &self.element_state,
            ),
            PresetInfo::describe(
                "element-severity",
                "Severity of an element finding",
                &self.element_severity,
            ),
            PresetInfo::describe(
                "element-action",
                "Recommended action for an assessed element",
                &self.element_action,
            ),
            PresetInfo::describe(
                "bug-priority",
                "Bug priority from reproduction frequency and impact",
                &self.bug_priority,
            ),
            PresetInfo::describe(
                "sla-verdict",
                "SLA verdict from a response time summary",
                &self.sla_verdict,
            ),
            PresetInfo::describe(
                "environment-resolution",
                "Whether an environment lookup resolved",
                &self.environment_resolution,
            ),
            PresetInfo::describe(
                "retry-verdict",
                "Outcome of a bounded retry run",
                &self.retry_verdict,
            ),
        ]
    }

    pub fn get(&self, id: &str) -> Option<PresetInfo> {
        self.list().into_iter().find(|p| p.id == id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Get global preset registry
pub fn get_presets() -> &'static PresetRegistry {
    static PRESETS: OnceLock<PresetRegistry> = OnceLock::new();
    PRESETS.get_or_init(PresetRegistry::new)
}
