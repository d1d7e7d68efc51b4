//! PDF export of the session ledger.
//!
//! The report is a title, a generation timestamp, and one table row per
//! record, paginated with the header row repeated on every page.

pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod table;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use freshlens_core::{FreshError, Record};
use tracing::{error, info};

pub use layout::{layout, DocumentLayout, DrawOp, PageLayout};
pub use table::{ReportTable, HEADERS, PRODUCE_COLUMN};

/// Report file name: `<prefix>_%Y%m%d_%H%M%S.pdf`.
pub fn default_report_name<Tz: TimeZone>(prefix: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}_{}.pdf", at.format("%Y%m%d_%H%M%S"))
}

/// Render `records` to a PDF at `path`, stamped with the current local time.
pub fn generate_pdf_report(records: &[Record], path: &Path) -> Result<PathBuf, FreshError> {
    generate_pdf_report_at(records, path, &Local::now())
}

/// Render `records` to a PDF at `path` with an explicit generation time.
///
/// On failure no file is left at `path`.
pub fn generate_pdf_report_at<Tz: TimeZone>(
    records: &[Record],
    path: &Path,
    generated_at: &DateTime<Tz>,
) -> Result<PathBuf, FreshError>
where
    Tz::Offset: std::fmt::Display,
{
    let table = ReportTable::from_records(records);
    let label = generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let doc_layout = layout(&table, &label);

    let result = pdf::build_document(&doc_layout)
        .map_err(|e| FreshError::Export(format!("failed to build document: {e}")))
        .and_then(|mut doc| {
            pdf::save_atomically(&mut doc, path)
                .map_err(|e| FreshError::Export(format!("failed to write {}: {e}", path.display())))
        });

    match &result {
        Ok(written) => info!(
            path = %written.display(),
            rows = table.rows.len(),
            pages = doc_layout.pages.len(),
            "PDF report written"
        ),
        Err(e) => error!(path = %path.display(), error = %e, "PDF report failed"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use freshlens_core::ProduceAnalysis;
    use lopdf::content::Content;
    use lopdf::{Document, Object};

    fn records(n: u32) -> Vec<Record> {
        let ts = DateTime::parse_from_rfc3339("2024-09-14T08:15:00-04:00").unwrap();
        (1..=n)
            .map(|i| {
                Record::new(
                    i,
                    ts,
                    ProduceAnalysis {
                        produce_name: format!("Pepper {i}"),
                        freshness_score: 7,
                        expected_lifespan_days: 4,
                        visual_indicators: vec![],
                    },
                )
            })
            .collect()
    }

    fn fixed_time() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-09-15T10:30:45+00:00").unwrap()
    }

    fn page_strings(doc: &Document, page_no: u32) -> Vec<String> {
        let pages = doc.get_pages();
        let page_id = pages[&page_no];
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn default_name_uses_timestamp() {
        assert_eq!(
            default_report_name("produce_analysis_report", &fixed_time()),
            "produce_analysis_report_20240915_103045.pdf"
        );
    }

    #[test]
    fn empty_ledger_exports_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        generate_pdf_report_at(&[], &path, &fixed_time()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        let strings = page_strings(&doc, 1);
        assert_eq!(strings[0], "Fresh Produce Analysis Report");
        assert_eq!(strings[1], "Report Generated: 2024-09-15 10:30:45");
        assert_eq!(&strings[2..], &HEADERS.map(String::from));
    }

    #[test]
    fn long_ledger_spans_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.pdf");
        let recs = records(75);
        generate_pdf_report_at(&recs, &path, &fixed_time()).unwrap();

        let doc = Document::load(&path).unwrap();
        let page_count = doc.get_pages().len() as u32;
        assert!(page_count >= 3);

        let mut sequence = Vec::new();
        for page_no in 1..=page_count {
            let strings = page_strings(&doc, page_no);
            let start = if page_no == 1 { 2 } else { 0 };
            assert_eq!(strings[start], "Sl No");
            for row in strings[start + 5..].chunks(5) {
                assert_eq!(row[1], "2024-09-14");
                sequence.push(row[0].parse::<u32>().unwrap());
            }
        }
        assert_eq!(sequence, (1..=75).collect::<Vec<_>>());
    }

    #[test]
    fn unwritable_destination_fails_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-subdir").join("report.pdf");
        let err = generate_pdf_report_at(&records(2), &path, &fixed_time()).unwrap_err();
        assert!(matches!(err, FreshError::Export(_)));
        assert!(err.user_message().starts_with("Error generating PDF report:"));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn existing_report_is_replaced_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"stale").unwrap();
        generate_pdf_report_at(&records(1), &path, &fixed_time()).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
        assert!(!dir.path().join("report.pdf.tmp").exists());
    }
}
