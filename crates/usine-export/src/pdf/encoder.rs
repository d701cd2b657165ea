use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use usine_core::{UsineError, UsineResult};

use super::font::{encode_win_ansi, Face};
use super::layout::{
    LaidOutRow, PdfLayout, PlacedText, BODY_SIZE, CELL_PADDING, HEADER_CELL_SIZE, LINE_FACTOR,
};
use crate::template::ReportTemplate;

const HEADER_FILL: f32 = 0.85;
const RULE_GRAY: f32 = 0.6;

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn pdf_text(text: &str) -> UsineResult<Object> {
    Ok(Object::String(encode_win_ansi(text)?, StringFormat::Literal))
}

fn pdf_err(err: lopdf::Error) -> UsineError {
    UsineError::render("pdf", err.to_string())
}

/// Writes a laid-out report as a PDF document.
pub fn encode(
    layout: &PdfLayout,
    template: &ReportTemplate,
    generated_at: DateTime<Utc>,
) -> UsineResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_ids: Vec<(Face, ObjectId)> = [Face::Regular, Face::Bold]
        .into_iter()
        .map(|face| {
            let id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            (face, id)
        })
        .collect();

    let mut fonts = lopdf::Dictionary::new();
    for (face, id) in &font_ids {
        fonts.set(face.resource_name().to_vec(), *id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let total = layout.page_count();
    let mut page_ids = Vec::with_capacity(total);
    for (index, rows) in layout.pages.iter().enumerate() {
        let operations = page_operations(layout, rows, index + 1)?;
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(pdf_err)?,
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| (*id).into()).collect::<Vec<Object>>(),
        "Count" => page_ids.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            real(layout.page_width),
            real(layout.page_height),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Title" => pdf_text(&template.title)?,
        "Producer" => pdf_text("usine")?,
        "CreationDate" => Object::string_literal(
            generated_at.format("D:%Y%m%d%H%M%SZ").to_string(),
        ),
    };
    if let Some(author) = template.author.as_deref() {
        info.set("Author", pdf_text(author)?);
    }
    if let Some(subtitle) = template.subtitle.as_deref() {
        info.set("Subject", pdf_text(subtitle)?);
    }
    let info_id = doc.add_object(info);
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|err| UsineError::render("pdf", err.to_string()))?;
    Ok(buffer)
}

fn page_operations(
    layout: &PdfLayout,
    rows: &[LaidOutRow],
    number: usize,
) -> UsineResult<Vec<Operation>> {
    let mut ops = Vec::new();

    for line in &layout.header {
        push_text(&mut ops, line)?;
    }

    let left = layout.columns.first().map(|c| c.x).unwrap_or_default();
    let width = layout.table_width();
    let mut top = layout.table_top;

    // Column title band.
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "rg",
        vec![real(HEADER_FILL), real(HEADER_FILL), real(HEADER_FILL)],
    ));
    ops.push(Operation::new(
        "re",
        vec![
            real(left),
            real(top - layout.header_row.height),
            real(width),
            real(layout.header_row.height),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));
    push_row(&mut ops, layout, &layout.header_row, top, Face::Bold, HEADER_CELL_SIZE)?;
    top -= layout.header_row.height;

    for row in rows {
        push_row(&mut ops, layout, row, top, Face::Regular, BODY_SIZE)?;
        top -= row.height;
    }

    // Grid: horizontal rules under every row, verticals at column edges.
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "RG",
        vec![real(RULE_GRAY), real(RULE_GRAY), real(RULE_GRAY)],
    ));
    ops.push(Operation::new("w", vec![real(0.5)]));
    let table_top = layout.table_top;
    let mut y = table_top - layout.header_row.height;
    push_line(&mut ops, left, table_top, left + width, table_top);
    push_line(&mut ops, left, y, left + width, y);
    for row in rows {
        y -= row.height;
        push_line(&mut ops, left, y, left + width, y);
    }
    let mut x = left;
    push_line(&mut ops, x, table_top, x, top);
    for column in &layout.columns {
        x += column.width;
        push_line(&mut ops, x, table_top, x, top);
    }
    ops.push(Operation::new("Q", vec![]));

    for line in layout.footer(number) {
        push_text(&mut ops, &line)?;
    }
    Ok(ops)
}

fn push_row(
    ops: &mut Vec<Operation>,
    layout: &PdfLayout,
    row: &LaidOutRow,
    top: f32,
    face: Face,
    size: f32,
) -> UsineResult<()> {
    for (column, lines) in layout.columns.iter().zip(&row.cells) {
        for (index, text) in lines.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            push_text(
                ops,
                &PlacedText {
                    text: text.clone(),
                    face,
                    size,
                    x: column.x + CELL_PADDING,
                    y: top - CELL_PADDING - size - index as f32 * size * LINE_FACTOR,
                },
            )?;
        }
    }
    Ok(())
}

fn push_text(ops: &mut Vec<Operation>, line: &PlacedText) -> UsineResult<()> {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![
            Object::Name(line.face.resource_name().to_vec()),
            real(line.size),
        ],
    ));
    ops.push(Operation::new("Td", vec![real(line.x), real(line.y)]));
    ops.push(Operation::new("Tj", vec![pdf_text(&line.text)?]));
    ops.push(Operation::new("ET", vec![]));
    Ok(())
}

fn push_line(ops: &mut Vec<Operation>, x1: f32, y1: f32, x2: f32, y2: f32) {
    ops.push(Operation::new("m", vec![real(x1), real(y1)]));
    ops.push(Operation::new("l", vec![real(x2), real(y2)]));
    ops.push(Operation::new("S", vec![]));
}
