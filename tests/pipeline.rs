//! End-to-end tests: observation -> classification -> aggregation -> report

use qaverdict::config::presets::{
    bug_priority_rules, element_state_rules, release_verdict_rules, sla_verdict_rules,
};
use qaverdict::config::settings::VerdictThresholds;
use qaverdict::{
    aggregate, aggregate_numeric, classify, report, ElementObservation, ElementState, QaError,
    ReleaseVerdict, Reporter, Rule, RuleSet, Summary, TestResult,
};

#[test]
fn test_ready_element() {
    let rules = element_state_rules();
    let obs = ElementObservation {
        is_present: true,
        is_displayed: true,
        is_enabled: true,
    };
    assert_eq!(*classify(&rules, &obs), ElementState::Ready);
}

#[test]
fn test_absent_element_is_not_found() {
    let rules = element_state_rules();
    for (displayed, enabled) in [(true, true), (true, false), (false, true), (false, false)] {
        let obs = ElementObservation::new(false, displayed, enabled);
        assert_eq!(*classify(&rules, &obs), ElementState::NotFound);
    }
}

#[test]
fn test_classified_elements_aggregate() {
    let rules = element_state_rules();
    let observations = [
        ElementObservation::new(true, true, true),
        ElementObservation::new(true, false, true),
        ElementObservation::new(false, true, true),
        ElementObservation::new(true, true, true),
    ];
    let states: Vec<ElementState> = observations
        .iter()
        .map(|o| *rules.classify(o))
        .collect();

    let summary = aggregate(&states, &ElementState::Ready);
    assert_eq!(summary.count(&ElementState::Ready), 2);
    assert_eq!(summary.count(&ElementState::Hidden), 1);
    assert_eq!(summary.count(&ElementState::NotFound), 1);
    assert_eq!(summary.count(&ElementState::Unknown), 0);
    assert_eq!(summary.counts.len(), 5);
    assert_eq!(summary.success_rate, 50.0);
}

#[test]
fn test_test_result_tally_and_review_verdict() {
    use TestResult::{Fail, Pass, Skip};
    let summary = aggregate(&[Pass, Fail, Pass, Skip, Pass, Fail], &Pass);
    assert_eq!(summary.count(&Pass), 3);
    assert_eq!(summary.count(&Fail), 2);
    assert_eq!(summary.count(&Skip), 1);
    assert_eq!(summary.total, 6);
    assert_eq!(format!("{:.2}", summary.success_rate), "50.00");

    let verdict_rules = release_verdict_rules(&VerdictThresholds::default());
    assert_eq!(*verdict_rules.classify(&summary), ReleaseVerdict::Review);
}

#[test]
fn test_verdict_rules_written_inline() {
    use TestResult::{Fail, Pass, Skip};
    let summary = aggregate(&[Pass, Fail, Pass, Skip, Pass, Fail], &Pass);
    let rules: RuleSet<Summary<TestResult>, &str> = RuleSet::new(vec![
        Rule::when("no_failures", |s: &Summary<TestResult>| s.count(&Fail) == 0, "READY"),
        Rule::when("few_failures", |s: &Summary<TestResult>| s.count(&Fail) <= 2, "REVIEW"),
        Rule::otherwise("BLOCK"),
    ])
    .unwrap();

    let text = report("TEST REPORT", &summary, &rules);
    let lines: Vec<&str> = text.as_str().lines().collect();
    assert_eq!(lines.first(), Some(&"===== TEST REPORT ====="));
    assert!(lines.iter().any(|l| l.starts_with("total") && l.ends_with(": 6")));
    assert!(lines.iter().any(|l| l.starts_with("pass rate") && l.ends_with(": 50.00%")));
    let verdict = lines[lines.len() - 2];
    assert!(verdict.starts_with("Verdict") && verdict.ends_with(": REVIEW"));
}

#[test]
fn test_response_time_report() {
    let samples = [120.0, 450.0, 510.0, 300.0, 620.0, 200.0, 480.0];
    let summary = aggregate_numeric(&samples, 500.0).unwrap();
    assert_eq!(summary.min, 120.0);
    assert_eq!(summary.max, 620.0);
    assert_eq!(format!("{:.2}", summary.mean), "382.86");
    assert_eq!(summary.breaches, 2);

    let text = report("API PERFORMANCE REPORT", &summary, &sla_verdict_rules());
    assert!(text.as_str().contains("SLA BREACHED"));
    assert!(text.as_str().contains("mean"));
}

#[test]
fn test_empty_inputs() {
    let summary = aggregate::<TestResult>(&[], &TestResult::Pass);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.success_rate, 0.0);

    assert!(matches!(
        aggregate_numeric(&[], 500.0),
        Err(QaError::EmptyInput(_))
    ));
}

#[test]
fn test_non_finite_latency_never_reaches_a_verdict() {
    assert!(matches!(
        aggregate_numeric(&[100.0, f64::NAN, 900.0], 500.0),
        Err(QaError::InvalidInput(_))
    ));
    assert!(matches!(
        aggregate_numeric(&[100.0, 900.0], f64::NAN),
        Err(QaError::InvalidInput(_))
    ));
}

#[test]
fn test_reporter_propagates_configuration_error() {
    let result: qaverdict::Result<Reporter<Summary<TestResult>, &str>> =
        Reporter::new("TEST REPORT", vec![]);
    assert!(matches!(result, Err(QaError::Configuration(_))));
}

#[test]
fn test_bug_report_priority() {
    let bug = qaverdict::BugObservation::parse("often", "blocker");
    let text = report("BUG CLASSIFICATION REPORT", &bug, &bug_priority_rules());
    let lines: Vec<&str> = text.as_str().lines().collect();
    assert!(lines[1].starts_with("frequency") && lines[1].ends_with(": often"));
    assert!(lines[2].starts_with("impact") && lines[2].ends_with(": blocker"));
    assert!(lines[3].ends_with(": P1"));
}

#[test]
fn test_pipeline_is_deterministic() {
    use TestResult::{Fail, Pass};
    let rules = release_verdict_rules(&VerdictThresholds::default());
    let first = report("TEST REPORT", &aggregate(&[Pass, Fail], &Pass), &rules);
    let second = report("TEST REPORT", &aggregate(&[Pass, Fail], &Pass), &rules);
    assert_eq!(first, second);
}
