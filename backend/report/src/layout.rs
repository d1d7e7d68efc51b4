//! Page layout for the report: column widths, pagination, and the drawing
//! operations of every page, independent of the PDF object model.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.

use std::ops::Range;

use crate::metrics::{text_width, truncate_to_width, Font};
use crate::table::{ReportTable, COLUMN_COUNT, PRODUCE_COLUMN};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 72.0;

pub const TITLE: &str = "Fresh Produce Analysis Report";
const TITLE_SIZE: f32 = 18.0;
const TITLE_LEADING: f32 = 22.0;
const TITLE_SPACE_AFTER: f32 = 26.0;
const BODY_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 12.0;
const DATE_SPACE_AFTER: f32 = 12.0;

const HEADER_SIZE: f32 = 12.0;
const HEADER_ROW_HEIGHT: f32 = 30.0;
const HEADER_BASELINE: f32 = 12.0;
const ROW_HEIGHT: f32 = 18.0;
const ROW_BASELINE: f32 = 5.0;
const CELL_PADDING: f32 = 6.0;
const MIN_COLUMN_WIDTH: f32 = 36.0;

pub const GRID_WIDTH: f32 = 1.0;
pub const BOX_WIDTH: f32 = 2.0;
pub const HEADER_FILL_GRAY: f32 = 0.5;
pub const HEADER_TEXT_GRAY: f32 = 0.96;

/// One drawing primitive on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled rectangle in the given gray level.
    FillRect { x: f32, y: f32, width: f32, height: f32, gray: f32 },
    /// Straight line in black.
    Line { x1: f32, y1: f32, x2: f32, y2: f32, width: f32 },
    /// Rectangle outline in black.
    StrokeRect { x: f32, y: f32, width: f32, height: f32, line_width: f32 },
    /// Text with its baseline starting at (x, y).
    Text { x: f32, y: f32, font: Font, size: f32, gray: f32, text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Indices into the table rows drawn on this page.
    pub rows: Range<usize>,
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub column_widths: [f32; COLUMN_COUNT],
    pub pages: Vec<PageLayout>,
}

/// Lay out the title block and the table across as many pages as needed.
///
/// The header row is repeated at the top of each page. An empty table still
/// produces one page with the header row.
pub fn layout(table: &ReportTable, generated_label: &str) -> DocumentLayout {
    let header = table.header();
    let column_widths = fit_columns(natural_widths(&header, table), PAGE_WIDTH - 2.0 * MARGIN);
    let table_width: f32 = column_widths.iter().sum();
    let table_x = MARGIN + (PAGE_WIDTH - 2.0 * MARGIN - table_width) / 2.0;

    let mut pages = Vec::new();
    let mut next_row = 0;
    loop {
        let first_page = pages.is_empty();
        let mut ops = Vec::new();
        let mut top = PAGE_HEIGHT - MARGIN;

        if first_page {
            top = title_block(&mut ops, top, generated_label);
        }

        let capacity = ((top - MARGIN - HEADER_ROW_HEIGHT) / ROW_HEIGHT).floor().max(1.0) as usize;
        let end = (next_row + capacity).min(table.rows.len());
        let rows = next_row..end;

        let grid = TableGrid {
            x: table_x,
            top,
            widths: &column_widths,
        };
        grid.draw(&mut ops, &header, &table.rows[rows.clone()]);

        pages.push(PageLayout { rows, ops });
        next_row = end;
        if next_row >= table.rows.len() {
            break;
        }
    }

    DocumentLayout {
        column_widths,
        pages,
    }
}

/// Title and generation line; returns the y where the table starts.
fn title_block(ops: &mut Vec<DrawOp>, top: f32, generated_label: &str) -> f32 {
    let title_width = text_width(TITLE, Font::HelveticaBold, TITLE_SIZE);
    ops.push(DrawOp::Text {
        x: (PAGE_WIDTH - title_width) / 2.0,
        y: top - TITLE_SIZE,
        font: Font::HelveticaBold,
        size: TITLE_SIZE,
        gray: 0.0,
        text: TITLE.to_string(),
    });
    let top = top - TITLE_LEADING - TITLE_SPACE_AFTER;

    ops.push(DrawOp::Text {
        x: MARGIN,
        y: top - BODY_SIZE,
        font: Font::Helvetica,
        size: BODY_SIZE,
        gray: 0.0,
        text: format!("Report Generated: {generated_label}"),
    });
    top - BODY_LEADING - DATE_SPACE_AFTER
}

fn natural_widths(header: &[String; COLUMN_COUNT], table: &ReportTable) -> [f32; COLUMN_COUNT] {
    let mut widths = [0.0f32; COLUMN_COUNT];
    for (i, width) in widths.iter_mut().enumerate() {
        let header_width = text_width(&header[i], Font::HelveticaBold, HEADER_SIZE);
        let body_width = table
            .rows
            .iter()
            .map(|row| text_width(&row[i], Font::Helvetica, BODY_SIZE))
            .fold(0.0f32, f32::max);
        *width = header_width.max(body_width) + 2.0 * CELL_PADDING;
    }
    widths
}

/// Make the table fit `available`: the free-text Produce column gives way
/// first; if that is not enough every column is scaled down evenly.
fn fit_columns(mut widths: [f32; COLUMN_COUNT], available: f32) -> [f32; COLUMN_COUNT] {
    let total: f32 = widths.iter().sum();
    if total <= available {
        return widths;
    }

    let excess = total - available;
    let slack = (widths[PRODUCE_COLUMN] - MIN_COLUMN_WIDTH).max(0.0);
    widths[PRODUCE_COLUMN] -= excess.min(slack);

    let total: f32 = widths.iter().sum();
    if total > available {
        let scale = available / total;
        for w in &mut widths {
            *w *= scale;
        }
    }
    widths
}

struct TableGrid<'a> {
    x: f32,
    top: f32,
    widths: &'a [f32; COLUMN_COUNT],
}

impl TableGrid<'_> {
    fn draw(&self, ops: &mut Vec<DrawOp>, header: &[String; COLUMN_COUNT], rows: &[[String; COLUMN_COUNT]]) {
        let width: f32 = self.widths.iter().sum();
        let height = HEADER_ROW_HEIGHT + ROW_HEIGHT * rows.len() as f32;
        let bottom = self.top - height;
        let header_bottom = self.top - HEADER_ROW_HEIGHT;

        ops.push(DrawOp::FillRect {
            x: self.x,
            y: header_bottom,
            width,
            height: HEADER_ROW_HEIGHT,
            gray: HEADER_FILL_GRAY,
        });
        self.cells(ops, header, header_bottom + HEADER_BASELINE, Font::HelveticaBold, HEADER_SIZE, HEADER_TEXT_GRAY);

        for (i, row) in rows.iter().enumerate() {
            let row_bottom = header_bottom - ROW_HEIGHT * (i + 1) as f32;
            self.cells(ops, row, row_bottom + ROW_BASELINE, Font::Helvetica, BODY_SIZE, 0.0);
        }

        // Grid: row separators, then column separators.
        for i in 0..rows.len() {
            let y = header_bottom - ROW_HEIGHT * i as f32;
            let line_width = if i == 0 { BOX_WIDTH } else { GRID_WIDTH };
            ops.push(DrawOp::Line { x1: self.x, y1: y, x2: self.x + width, y2: y, width: line_width });
        }
        if rows.is_empty() {
            ops.push(DrawOp::Line {
                x1: self.x,
                y1: header_bottom,
                x2: self.x + width,
                y2: header_bottom,
                width: BOX_WIDTH,
            });
        }
        let mut x = self.x;
        for w in &self.widths[..COLUMN_COUNT - 1] {
            x += *w;
            ops.push(DrawOp::Line { x1: x, y1: self.top, x2: x, y2: bottom, width: GRID_WIDTH });
        }

        ops.push(DrawOp::StrokeRect {
            x: self.x,
            y: bottom,
            width,
            height,
            line_width: BOX_WIDTH,
        });
    }

    fn cells(&self, ops: &mut Vec<DrawOp>, cells: &[String; COLUMN_COUNT], baseline: f32, font: Font, size: f32, gray: f32) {
        let mut left = self.x;
        for (cell, column_width) in cells.iter().zip(self.widths.iter().copied()) {
            let text = truncate_to_width(cell, font, size, column_width - 2.0 * CELL_PADDING);
            let text_w = text_width(&text, font, size);
            ops.push(DrawOp::Text {
                x: left + (column_width - text_w) / 2.0,
                y: baseline,
                font,
                size,
                gray,
                text,
            });
            left += column_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::HEADERS;

    fn table_of(n: usize) -> ReportTable {
        ReportTable {
            rows: (1..=n)
                .map(|i| [i.to_string(), "2024-01-01".into(), format!("Apple {i}"), "8".into(), "6".into()])
                .collect(),
        }
    }

    fn texts(page: &PageLayout) -> Vec<&str> {
        page.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_table_is_one_page_with_header_only() {
        let doc = layout(&table_of(0), "2024-01-01 09:00:00");
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].rows, 0..0);
        let t = texts(&doc.pages[0]);
        assert_eq!(t[0], TITLE);
        assert_eq!(t[1], "Report Generated: 2024-01-01 09:00:00");
        assert_eq!(&t[2..], &HEADERS);
    }

    #[test]
    fn long_tables_paginate_in_order_with_repeated_header() {
        let table = table_of(150);
        let doc = layout(&table, "now");
        assert!(doc.pages.len() > 3);

        let mut expected_start = 0;
        for (i, page) in doc.pages.iter().enumerate() {
            assert_eq!(page.rows.start, expected_start);
            expected_start = page.rows.end;

            let t = texts(page);
            let header_at = if i == 0 { 2 } else { 0 };
            assert_eq!(&t[header_at..header_at + COLUMN_COUNT], &HEADERS);
            if i > 0 {
                assert!(!t.contains(&TITLE));
            }
            let first_row = &table.rows[page.rows.start];
            assert_eq!(t[header_at + COLUMN_COUNT], first_row[0]);
        }
        assert_eq!(expected_start, 150);
    }

    #[test]
    fn everything_stays_inside_the_margins() {
        let doc = layout(&table_of(80), "now");
        for page in &doc.pages {
            for op in &page.ops {
                if let DrawOp::StrokeRect { x, y, width, height, .. } = op {
                    assert!(*x >= MARGIN - 0.01);
                    assert!(*y >= MARGIN - 0.01);
                    assert!(x + width <= PAGE_WIDTH - MARGIN + 0.01);
                    assert!(y + height <= PAGE_HEIGHT - MARGIN + 0.01);
                }
            }
        }
    }

    #[test]
    fn oversized_produce_column_is_shrunk_and_truncated() {
        let mut table = table_of(1);
        table.rows[0][2] = "An extraordinarily long produce description that cannot possibly fit".repeat(3);
        let doc = layout(&table, "now");
        let total: f32 = doc.column_widths.iter().sum();
        assert!(total <= PAGE_WIDTH - 2.0 * MARGIN + 0.01);
        let produce = texts(&doc.pages[0])[2 + COLUMN_COUNT + 2];
        assert!(produce.ends_with("..."));
    }

    #[test]
    fn header_band_is_gray_with_light_text() {
        let doc = layout(&table_of(2), "now");
        let ops = &doc.pages[0].ops;
        assert!(ops.iter().any(|op| matches!(op, DrawOp::FillRect { gray, .. } if *gray == HEADER_FILL_GRAY)));
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Text { font: Font::HelveticaBold, gray, text, .. } if *gray == HEADER_TEXT_GRAY && text == "Sl No"
        )));
    }
}
