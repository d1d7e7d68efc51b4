//! Text renderings of analyses and the session history.

use freshlens_core::Record;
use freshlens_report::{ReportTable, PRODUCE_COLUMN};

use crate::terminal_output::{render_table, styled, Column, BOLD, DIM};

pub const EMPTY_HISTORY: &str = "No produce analyzed yet.";

/// The analysis card printed after each successful call.
pub fn format_analysis(record: &Record) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", styled(BOLD, "Analysis Results")));
    out.push_str(&format!("  Produce:             {}\n", record.produce_name));
    out.push_str(&format!("  Freshness Score:     {}/10\n", record.freshness_score));
    out.push_str(&format!(
        "  Expected Shelf Life: {} days\n",
        record.expected_lifespan_days
    ));
    out.push_str("  Visual Indicators:\n");
    if record.visual_indicators.is_empty() {
        out.push_str(&format!("    {}\n", styled(DIM, "(none reported)")));
    }
    for indicator in &record.visual_indicators {
        out.push_str(&format!("    • {indicator}\n"));
    }
    out
}

/// The ledger as a table, built from the same rows as the PDF report.
pub fn history_table(records: &[Record]) -> String {
    let table = ReportTable::from_records(records);
    if table.is_empty() {
        return format!("{EMPTY_HISTORY}\n");
    }

    let columns: Vec<Column> = table
        .header()
        .into_iter()
        .enumerate()
        .map(|(i, h)| {
            let col = Column::center(h);
            if i == PRODUCE_COLUMN { col.with_max_width(32) } else { col }
        })
        .collect();
    let rows: Vec<Vec<String>> = table.rows.into_iter().map(Vec::from).collect();

    render_table(&columns, &rows)
}
