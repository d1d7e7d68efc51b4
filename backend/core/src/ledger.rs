//! Session ledger: the append-only, in-memory record sequence.
//!
//! One ledger belongs to one interactive session. It is mutated only through
//! `&mut self`, so readers always see a fully appended state.

use chrono::{DateTime, FixedOffset};

use crate::record::{ProduceAnalysis, Record};

#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<Record>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an analysis, assigning sequence number `len + 1`.
    ///
    /// Timestamps never go backwards in append order: a stamp earlier than
    /// the previous record's is clamped to it.
    pub fn append(&mut self, analysis: ProduceAnalysis, timestamp: DateTime<FixedOffset>) -> &Record {
        let timestamp = match self.records.last() {
            Some(prev) if timestamp < prev.timestamp => prev.timestamp,
            _ => timestamp,
        };
        let sequence_number = self.records.len() as u32 + 1;
        self.records.push(Record::new(sequence_number, timestamp, analysis));
        &self.records[self.records.len() - 1]
    }

    /// All records, oldest first.
    pub fn snapshot(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn named(name: &str) -> ProduceAnalysis {
        ProduceAnalysis {
            produce_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn sequence_numbers_are_one_based_and_contiguous() {
        let mut ledger = Ledger::new();
        let start = ts("2024-05-01T10:00:00+02:00");
        for i in 0..25 {
            ledger.append(named(&format!("item-{i}")), start + Duration::seconds(i));
        }
        let seqs: Vec<u32> = ledger.snapshot().iter().map(|r| r.sequence_number).collect();
        assert_eq!(seqs, (1..=25).collect::<Vec<_>>());
        assert_eq!(ledger.snapshot()[0].produce_name, "item-0");
        assert_eq!(ledger.last().unwrap().produce_name, "item-24");
    }

    #[test]
    fn empty_ledger_snapshot_is_empty() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert!(ledger.snapshot().is_empty());
        assert!(ledger.last().is_none());
    }

    #[test]
    fn backwards_timestamp_is_clamped() {
        let mut ledger = Ledger::new();
        ledger.append(named("a"), ts("2024-05-01T10:00:00+00:00"));
        let second = ledger.append(named("b"), ts("2024-05-01T09:59:00+00:00"));
        assert_eq!(second.timestamp, ts("2024-05-01T10:00:00+00:00"));
        assert_eq!(second.sequence_number, 2);
    }
}
