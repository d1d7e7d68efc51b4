//! Analysis Event Logger
//!
//! Structured session events (analysis outcomes, report exports) written
//! through `tracing` on the `analysis_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AnalysisEvent {
    AnalysisCompleted {
        sequence_number: u32,
        produce: String,
        freshness: u32,
        lifespan_days: u32,
        latency_ms: u64,
    },
    AnalysisFailed {
        error_msg: String,
    },
    ReportExported {
        path: String,
        rows: usize,
    },
    ReportFailed {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: AnalysisEvent,
}

impl EventLogEntry {
    pub fn new(session_id: &str, mut event: AnalysisEvent) -> Self {
        match &mut event {
            AnalysisEvent::AnalysisFailed { error_msg } | AnalysisEvent::ReportFailed { error_msg } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
            AnalysisEvent::AnalysisCompleted { .. } | AnalysisEvent::ReportExported { .. } => {}
        }
        Self {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Logs a session event after redacting any credentials in its messages.
    pub fn log_event(session_id: &str, event: AnalysisEvent) {
        let entry = EventLogEntry::new(session_id, event);
        let json = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "analysis_events", session_id = %entry.session_id, event = %json, "Analysis event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_are_redacted() {
        let entry = EventLogEntry::new(
            "s1",
            AnalysisEvent::AnalysisFailed {
                error_msg: "rejected Bearer abc.def.ghi".into(),
            },
        );
        match entry.event {
            AnalysisEvent::AnalysisFailed { error_msg } => {
                assert!(error_msg.contains("[REDACTED_TOKEN]"));
                assert!(!error_msg.contains("abc.def.ghi"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn serializes_with_type_tag() {
        let entry = EventLogEntry::new(
            "s1",
            AnalysisEvent::ReportExported {
                path: "report.pdf".into(),
                rows: 3,
            },
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["type"], "ReportExported");
        assert_eq!(json["event"]["rows"], 3);
        assert_eq!(json["session_id"], "s1");
    }
}
