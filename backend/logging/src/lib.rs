//! Structured logging for freshlens.
//!
//! Console plus rolling NDJSON file output, credential redaction, and
//! structured analysis events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{AnalysisEvent, EventLogEntry, EventLogger};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
