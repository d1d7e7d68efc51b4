use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Label used when the reply names no produce.
pub const UNSPECIFIED_PRODUCE: &str = "Not specified";

/// Fields extracted from one model reply, before the ledger stamps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProduceAnalysis {
    pub produce_name: String,
    pub freshness_score: u32,
    pub expected_lifespan_days: u32,
    pub visual_indicators: Vec<String>,
}

impl Default for ProduceAnalysis {
    fn default() -> Self {
        Self {
            produce_name: UNSPECIFIED_PRODUCE.to_string(),
            freshness_score: 0,
            expected_lifespan_days: 0,
            visual_indicators: Vec::new(),
        }
    }
}

/// One analyzed image, as held by the session ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub sequence_number: u32,
    pub timestamp: DateTime<FixedOffset>,
    pub produce_name: String,
    pub freshness_score: u32,
    pub expected_lifespan_days: u32,
    pub visual_indicators: Vec<String>,
}

impl Record {
    pub fn new(sequence_number: u32, timestamp: DateTime<FixedOffset>, analysis: ProduceAnalysis) -> Self {
        Self {
            sequence_number,
            timestamp,
            produce_name: analysis.produce_name,
            freshness_score: analysis.freshness_score,
            expected_lifespan_days: analysis.expected_lifespan_days,
            visual_indicators: analysis.visual_indicators,
        }
    }

    /// Date portion of the RFC 3339 timestamp (the text before `T`).
    pub fn date_label(&self) -> String {
        let stamp = self.timestamp.to_rfc3339();
        match stamp.split_once('T') {
            Some((date, _)) => date.to_string(),
            None => stamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_analysis_is_unspecified() {
        let a = ProduceAnalysis::default();
        assert_eq!(a.produce_name, "Not specified");
        assert_eq!(a.freshness_score, 0);
        assert_eq!(a.expected_lifespan_days, 0);
        assert!(a.visual_indicators.is_empty());
    }

    #[test]
    fn date_label_keeps_local_date() {
        let ts = DateTime::parse_from_rfc3339("2024-11-02T23:30:00-05:00").unwrap();
        let record = Record::new(1, ts, ProduceAnalysis::default());
        assert_eq!(record.date_label(), "2024-11-02");
    }
}
