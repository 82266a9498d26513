/// Verdict derivation and fixed-shape text reports
use crate::classify::{Rule, RuleSet};
use crate::config::types::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that can be laid out as report fields.
///
/// Fields come back in a fixed order so reports compare deterministically.
pub trait ReportFields {
    fn report_fields(&self) -> Vec<ReportField>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportField {
    pub label: String,
    pub value: String,
}

impl ReportField {
    pub fn new(label: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// Structured report: title, summary fields and the derived verdict
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub fields: Vec<ReportField>,
    pub verdict: String,
}

/// Rendered plain-text report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportText(String);

impl ReportText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ReportText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const VERDICT_LABEL: &str = "Verdict";

impl Report {
    /// Render as
    ///
    /// ```text
    /// ===== TITLE =====
    /// label   : value
    /// Verdict : verdict
    /// =================
    /// ```
    pub fn render(&self) -> ReportText {
        let header = format!("===== {} =====", self.title);
        let width = self
            .fields
            .iter()
            .map(|f| f.label.chars().count())
            .chain(std::iter::once(VERDICT_LABEL.len()))
            .max()
            .unwrap_or(VERDICT_LABEL.len());

        let mut lines = Vec::with_capacity(self.fields.len() + 3);
        lines.push(header.clone());
        for field in &self.fields {
            lines.push(format!("{:<width$} : {}", field.label, field.value, width = width));
        }
        lines.push(format!(
            "{:<width$} : {}",
            VERDICT_LABEL,
            self.verdict,
            width = width
        ));
        lines.push("=".repeat(header.chars().count()));

        ReportText(lines.join("\n"))
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Classify `summary` with `verdict_rules` and assemble the structured report
pub fn build_report<S, V>(title: &str, summary: &S, verdict_rules: &RuleSet<S, V>) -> Report
where
    S: ReportFields + ?Sized,
    V: fmt::Display,
{
    Report {
        title: title.to_string(),
        fields: summary.report_fields(),
        verdict: verdict_rules.classify(summary).to_string(),
    }
}

/// Classify `summary` with `verdict_rules` and render the text report
pub fn report<S, V>(title: &str, summary: &S, verdict_rules: &RuleSet<S, V>) -> ReportText
where
    S: ReportFields + ?Sized,
    V: fmt::Display,
{
    build_report(title, summary, verdict_rules).render()
}

/// A titled report generator owning its verdict rule table
pub struct Reporter<S: ?Sized, V> {
    title: String,
    verdict_rules: RuleSet<S, V>,
}

impl<S, V> Reporter<S, V>
where
    S: ReportFields + ?Sized,
    V: fmt::Display,
{
    /// Fails with `QaError::Configuration` if `verdict_rules` is not total
    pub fn new(title: impl Into<String>, verdict_rules: Vec<Rule<S, V>>) -> Result<Self> {
        Ok(Self::from_rule_set(title, RuleSet::new(verdict_rules)?))
    }

    pub fn from_rule_set(title: impl Into<String>, verdict_rules: RuleSet<S, V>) -> Self {
        Self {
            title: title.into(),
            verdict_rules,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn build(&self, summary: &S) -> Report {
        build_report(&self.title, summary, &self.verdict_rules)
    }

    pub fn report(&self, summary: &S) -> ReportText {
        self.build(summary).render()
    }
}
