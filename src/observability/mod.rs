//! Observability
//!
//! Structured audit events for produced reports.

pub mod audit;
