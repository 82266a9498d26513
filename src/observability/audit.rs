/// Structured audit events for produced reports
///
/// Each report is emitted as one JSON line on the `qaverdict::audit` log
/// target, correlated by a per-process run id.
use crate::report::Report;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::SystemTime;
use uuid::Uuid;

pub const AUDIT_TARGET: &str = "qaverdict::audit";

/// Audit event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEventType {
    ReportProduced,
    InputSkipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub run_id: String,
    pub timestamp: u64,
    pub event_type: AuditEventType,
    /// CLI command or caller-defined source of the event
    pub source: String,
    pub details: String,
    pub report: Option<Report>,
}

/// Correlates all events of one run
pub struct AuditLogger {
    run_id: Uuid,
}

impl AuditLogger {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    fn event(&self, event_type: AuditEventType, source: &str, details: String) -> AuditEvent {
        AuditEvent {
            run_id: self.run_id.to_string(),
            timestamp: SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            event_type,
            source: source.to_string(),
            details,
            report: None,
        }
    }

    pub fn report_event(&self, source: &str, report: &Report) -> AuditEvent {
        let mut event = self.event(
            AuditEventType::ReportProduced,
            source,
            format!("{}: {}", report.title, report.verdict),
        );
        event.report = Some(report.clone());
        event
    }

    pub fn skipped_input_event(&self, source: &str, input: &str, reason: &str) -> AuditEvent {
        self.event(
            AuditEventType::InputSkipped,
            source,
            format!("skipped '{}': {}", input, reason),
        )
    }

    /// Emit an event on the audit target
    pub fn log_event(&self, event: &AuditEvent) {
        let mut log_entry = serde_json::json!({
            "run_id": event.run_id,
            "timestamp": event.timestamp,
            "event_type": event.event_type,
            "source": event.source,
            "details": event.details,
        });

        if let Some(report) = &event.report {
            log_entry["verdict"] = serde_json::json!(report.verdict);
            log_entry["fields"] = match serde_json::to_value(&report.fields) {
                Ok(fields) => fields,
                Err(e) => {
                    warn!("failed to serialize audit fields for '{}': {}", report.title, e);
                    serde_json::Value::Null
                }
            };
        }

        match event.event_type {
            AuditEventType::ReportProduced => info!(target: AUDIT_TARGET, "{}", log_entry),
            AuditEventType::InputSkipped => warn!(target: AUDIT_TARGET, "{}", log_entry),
        }
    }

    pub fn log_report(&self, source: &str, report: &Report) {
        self.log_event(&self.report_event(source, report));
    }

    pub fn log_skipped_input(&self, source: &str, input: &str, reason: &str) {
        self.log_event(&self.skipped_input_event(source, input, reason));
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

static AUDIT_LOGGER: OnceLock<AuditLogger> = OnceLock::new();

/// Get the process-wide audit logger, creating it on first use
pub fn audit_logger() -> &'static AuditLogger {
    AUDIT_LOGGER.get_or_init(|| {
        let logger = AuditLogger::new();
        debug!("audit logger initialized with run id {}", logger.run_id());
        logger
    })
}
