//! qaverdict: rule-based QA classification, aggregation and verdict reporting
//!
//! # Architecture
//!
//! Data flows linearly: observations -> classifier -> aggregator -> reporter.
//!
//! ## Classification ([`classify`])
//! - [`classify::rule`]: Predicate -> label rules
//! - [`classify::classifier`]: Validated ordered rule tables, first match wins
//!
//! ## Aggregation ([`aggregate`])
//! - [`aggregate::tally`]: Per-label counts and success rate
//! - [`aggregate::numeric`]: Min/max/mean and threshold breaches
//!
//! ## Reporting ([`report`])
//! - [`report::reporter`]: Verdict derivation and fixed-shape text reports
//! - [`report::fields`]: Report layouts for the crate's summary types
//!
//! ## Configuration ([`config`])
//! - [`config::types`]: Closed label enumerations, observations and errors
//! - [`config::presets`]: Built-in rule tables for the QA checks
//! - [`config::settings`]: JSON settings with defaults
//! - [`config::validator`]: Rule set and settings validation
//!
//! ## Retry ([`retry`])
//! Bounded synchronous retries.
//!
//! ## Observability ([`observability`])
//! - [`observability::audit`]: Structured report events
//!
//! # Design Principles
//!
//! 1. **Totality at construction** - A rule set that could leave an input
//!    unclassified is rejected before it is ever used
//! 2. **Rules are data** - Control flow lives in one matching routine, not in
//!    per-check if/else chains
//! 3. **Pure calls** - Every component is a function of its inputs; nothing is
//!    cached between calls

// Classification
pub mod classify;

// Aggregation
pub mod aggregate;

// Reporting
pub mod report;

// Configuration
pub mod config;

// Bounded retry
pub mod retry;

// Observability
pub mod observability;

// CLI entrypoint wiring for the qaverdict binary.
pub mod cli;

// Re-export commonly used types for convenience
pub use aggregate::{aggregate, aggregate_numeric, NumericSummary, Summary};
pub use classify::{classify, Rule, RuleSet};
pub use config::types::*;
pub use report::{report, Report, ReportText, Reporter};
