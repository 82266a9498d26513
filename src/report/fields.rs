// Report layouts for the crate's summary and observation types

use crate::aggregate::{NumericSummary, Summary};
use crate::config::types::{
    BugObservation, ElementAssessment, EnvironmentLookup, EnvironmentMatch, Label,
};
use crate::report::reporter::{ReportField, ReportFields};
use crate::retry::RetryOutcome;

fn or_unknown<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

impl<L: Label> ReportFields for Summary<L> {
    fn report_fields(&self) -> Vec<ReportField> {
        let mut fields: Vec<ReportField> = self
            .counts
            .iter()
            .map(|c| ReportField::new(c.label.to_string(), c.count))
            .collect();
        fields.push(ReportField::new("total", self.total));
        fields.push(ReportField::new(
            format!("{} rate", self.success_label),
            format!("{:.2}%", self.success_rate),
        ));
        fields
    }
}

impl ReportFields for NumericSummary {
    fn report_fields(&self) -> Vec<ReportField> {
        vec![
            ReportField::new("count", self.count),
            ReportField::new("min", self.min),
            ReportField::new("max", self.max),
            ReportField::new("sum", self.sum),
            ReportField::new("mean", format!("{:.2}", self.mean)),
            ReportField::new("threshold", self.threshold),
            ReportField::new(
                "breaches",
                format!("{} ({:.2}%)", self.breaches, self.breach_rate()),
            ),
        ]
    }
}

impl ReportFields for ElementAssessment {
    fn report_fields(&self) -> Vec<ReportField> {
        vec![
            ReportField::new("present", self.observation.is_present),
            ReportField::new("displayed", self.observation.is_displayed),
            ReportField::new("enabled", self.observation.is_enabled),
            ReportField::new("state", self.state),
            ReportField::new("severity", self.severity),
        ]
    }
}

impl ReportFields for BugObservation {
    fn report_fields(&self) -> Vec<ReportField> {
        vec![
            ReportField::new("frequency", or_unknown(self.frequency)),
            ReportField::new("impact", or_unknown(self.impact)),
        ]
    }
}

impl ReportFields for EnvironmentLookup {
    fn report_fields(&self) -> Vec<ReportField> {
        let mut fields = vec![ReportField::new("environment", &self.requested)];
        if let EnvironmentMatch::Known(profile) = &self.matched {
            fields.push(ReportField::new("profile", &profile.name));
            fields.push(ReportField::new("base url", &profile.base_url));
            fields.push(ReportField::new("api key", profile.masked_api_key()));
            fields.push(ReportField::new(
                "timeout",
                format!("{} ms", profile.timeout_ms),
            ));
            fields.push(ReportField::new("description", &profile.description));
        }
        fields
    }
}

impl ReportFields for RetryOutcome {
    fn report_fields(&self) -> Vec<ReportField> {
        vec![
            ReportField::new("attempts", self.attempts()),
            ReportField::new("outcome", self),
        ]
    }
}
