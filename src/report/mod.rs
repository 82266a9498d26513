//! Verdict reporting
//!
//! Derives a verdict from a summary with the same rule-table mechanism used for
//! classification, then renders a fixed-shape text block.

pub mod fields;
pub mod reporter;

pub use reporter::{build_report, report, Report, ReportField, ReportFields, ReportText, Reporter};
