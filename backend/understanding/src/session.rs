//! Analysis session: one image at a time through the model, the parser, and
//! into the ledger the session owns.

use std::sync::Arc;

use chrono::Local;
use freshlens_core::{FreshError, GenerationConfig, Ledger, Record, VisionModel, VisionRequest};
use freshlens_logging::{AnalysisEvent, EventLogger};
use freshlens_media::{MediaPayload, to_png};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::parser::parse_reply;
use crate::prompt::create_prompt;

pub struct AnalysisSession {
    id: String,
    model: Arc<dyn VisionModel>,
    ledger: Ledger,
}

impl AnalysisSession {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            model,
            ledger: Ledger::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Read-only view for display and report export.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Normalise a submitted image to PNG and analyze it.
    ///
    /// An image that cannot be decoded never reaches the model.
    pub async fn analyze(&mut self, payload: &MediaPayload) -> Result<&Record, FreshError> {
        let png = to_png(payload)?;
        self.analyze_png(png).await
    }

    /// Send PNG bytes with the fixed prompt and generation parameters, parse
    /// the reply, and append it.
    ///
    /// On failure the ledger is left untouched.
    pub async fn analyze_png(&mut self, png: Vec<u8>) -> Result<&Record, FreshError> {
        let request = VisionRequest {
            prompt: create_prompt(),
            image: png,
            mime_type: "image/png".to_string(),
            generation: GenerationConfig::default(),
        };

        let response = match self.model.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                let err = FreshError::external(self.model.name(), format!("{e:#}"));
                error!(provider = %self.model.name(), error = %err, "Vision model call failed");
                EventLogger::log_event(
                    &self.id,
                    AnalysisEvent::AnalysisFailed {
                        error_msg: err.to_string(),
                    },
                );
                return Err(err);
            }
        };

        let parsed = parse_reply(&response.text);
        for warning in &parsed.warnings {
            warn!(session = %self.id, %warning, "Reply field fell back to default");
        }

        let record = self.ledger.append(parsed.analysis, Local::now().fixed_offset());
        info!(
            seq = record.sequence_number,
            produce = %record.produce_name,
            freshness = record.freshness_score,
            "Analysis recorded"
        );
        EventLogger::log_event(
            &self.id,
            AnalysisEvent::AnalysisCompleted {
                sequence_number: record.sequence_number,
                produce: record.produce_name.clone(),
                freshness: record.freshness_score,
                lifespan_days: record.expected_lifespan_days,
                latency_ms: response.latency_ms,
            },
        );
        Ok(record)
    }
}
