use freshlens_core::Record;

/// Report columns, in order.
pub const HEADERS: [&str; 5] = [
    "Sl No",
    "Timestamp",
    "Produce",
    "Freshness",
    "Expected Lifespan (Days)",
];

pub const COLUMN_COUNT: usize = HEADERS.len();

/// Index of the free-text column, the one that gets shortened first.
pub const PRODUCE_COLUMN: usize = 2;

/// The ledger flattened to display strings: one row per record, ledger order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub rows: Vec<[String; COLUMN_COUNT]>,
}

impl ReportTable {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            rows: records.iter().map(row_for).collect(),
        }
    }

    pub fn header(&self) -> [String; COLUMN_COUNT] {
        HEADERS.map(str::to_string)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn row_for(record: &Record) -> [String; COLUMN_COUNT] {
    [
        record.sequence_number.to_string(),
        record.date_label(),
        record.produce_name.clone(),
        record.freshness_score.to_string(),
        record.expected_lifespan_days.to_string(),
    ]
}
