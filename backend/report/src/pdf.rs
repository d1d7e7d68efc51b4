//! Turns a [`DocumentLayout`] into a PDF and writes it atomically.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::layout::{DocumentLayout, DrawOp, PAGE_HEIGHT, PAGE_WIDTH};
use crate::metrics::{encode_win_ansi, Font};

/// Build the PDF object graph for a laid-out report.
pub fn build_document(layout: &DocumentLayout) -> lopdf::Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = |doc: &mut Document, font: Font| {
        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        })
    };
    let regular = font_id(&mut doc, Font::Helvetica);
    let bold = font_id(&mut doc, Font::HelveticaBold);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Helvetica.resource() => regular,
            Font::HelveticaBold.resource() => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page.ops.iter().flat_map(operations_for).collect::<Vec<_>>(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(crate::layout::TITLE),
        "Producer" => Object::string_literal("freshlens"),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();
    Ok(doc)
}

fn operations_for(op: &DrawOp) -> Vec<Operation> {
    match op {
        DrawOp::FillRect { x, y, width, height, gray } => vec![
            Operation::new("q", vec![]),
            Operation::new("g", vec![(*gray).into()]),
            Operation::new("re", vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ],
        DrawOp::Line { x1, y1, x2, y2, width } => vec![
            Operation::new("w", vec![(*width).into()]),
            Operation::new("m", vec![(*x1).into(), (*y1).into()]),
            Operation::new("l", vec![(*x2).into(), (*y2).into()]),
            Operation::new("S", vec![]),
        ],
        DrawOp::StrokeRect { x, y, width, height, line_width } => vec![
            Operation::new("w", vec![(*line_width).into()]),
            Operation::new("re", vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()]),
            Operation::new("S", vec![]),
        ],
        DrawOp::Text { x, y, font, size, gray, text } => vec![
            Operation::new("BT", vec![]),
            Operation::new("g", vec![(*gray).into()]),
            Operation::new("Tf", vec![font.resource().into(), (*size).into()]),
            Operation::new("Td", vec![(*x).into(), (*y).into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ],
    }
}

/// Write `doc` to `path` through a sibling temp file.
///
/// Either the complete document ends up at `path` or nothing does.
pub fn save_atomically(doc: &mut Document, path: &Path) -> std::io::Result<PathBuf> {
    let tmp_path = tmp_path_for(path);
    let result = (|| {
        let mut file = File::create(&tmp_path)?;
        doc.save_to(&mut file)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        file.flush()?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(path.to_path_buf())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
