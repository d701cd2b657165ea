//! Page layout for tabular PDF reports.
//!
//! Layout is computed up front, independent of the PDF encoder: column
//! boxes, wrapped cell lines, and the split of rows across pages. The total
//! page count must be known before any footer ("Page N / M") is written.

use chrono::{DateTime, Utc};
use usine_core::{UsineError, UsineResult};

use super::font::{text_width, Face};
use crate::report::RenderContext;
use crate::table::ReportTable;

pub const MARGIN: f32 = 36.0;
pub const TITLE_SIZE: f32 = 16.0;
pub const SUBTITLE_SIZE: f32 = 11.0;
pub const META_SIZE: f32 = 8.0;
pub const HEADER_CELL_SIZE: f32 = 8.5;
pub const BODY_SIZE: f32 = 8.0;
pub const FOOTER_SIZE: f32 = 8.0;
pub const LINE_FACTOR: f32 = 1.25;
pub const CELL_PADDING: f32 = 3.0;
pub const MIN_COLUMN_WIDTH: f32 = 24.0;
const HEADER_GAP: f32 = 10.0;
const FOOTER_BAND: f32 = 18.0;
const ELLIPSIS: char = '…';

/// A single line of text at an absolute position (baseline, in points).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub face: Face,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnBox {
    pub x: f32,
    pub width: f32,
}

/// One table row after wrapping: the lines of each cell and the row height.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutRow {
    pub cells: Vec<Vec<String>>,
    pub height: f32,
}

impl LaidOutRow {
    /// First line of every cell, for quick inspection.
    pub fn first_lines(&self) -> Vec<&str> {
        self.cells
            .iter()
            .map(|lines| lines.first().map(String::as_str).unwrap_or(""))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub columns: Vec<ColumnBox>,
    /// Page header lines, identical on every page.
    pub header: Vec<PlacedText>,
    /// Top edge of the table on every page.
    pub table_top: f32,
    pub header_row: LaidOutRow,
    /// Body rows of each page. Never empty: an empty table still has a page.
    pub pages: Vec<Vec<LaidOutRow>>,
    footer_text: Option<String>,
}

impl PdfLayout {
    pub fn compute(table: &ReportTable, context: &RenderContext<'_>) -> UsineResult<Self> {
        let (page_width, page_height) = context.page.dimensions();
        let printable_width = page_width - 2.0 * MARGIN;
        let max_lines = context.max_cell_lines.max(1);

        let columns = column_boxes(&table.widths, &table.headers, printable_width)?;

        let header = page_header(context, page_height, printable_width);
        let table_top = header
            .last()
            .map(|line| line.y - HEADER_GAP)
            .unwrap_or(page_height - MARGIN);
        let table_bottom = MARGIN + FOOTER_BAND;

        let header_row = layout_row(
            &table.headers,
            &columns,
            Face::Bold,
            HEADER_CELL_SIZE,
            max_lines,
        );
        let body_height = table_top - table_bottom - header_row.height;
        if body_height <= 0.0 {
            return Err(UsineError::Layout(
                "page too small for the report header and column titles".to_string(),
            ));
        }

        let mut pages = Vec::new();
        let mut current: Vec<LaidOutRow> = Vec::new();
        let mut used = 0.0;
        for (index, cells) in table.rows.iter().enumerate() {
            let row = layout_row(cells, &columns, Face::Regular, BODY_SIZE, max_lines);
            if row.height > body_height {
                return Err(UsineError::Layout(format!(
                    "row {} is taller than the printable page body",
                    index + 1
                )));
            }
            if used + row.height > body_height && !current.is_empty() {
                pages.push(std::mem::take(&mut current));
                used = 0.0;
            }
            used += row.height;
            current.push(row);
        }
        pages.push(current);

        tracing::debug!(
            "Laid out {} rows over {} page(s), {} columns",
            table.record_count(),
            pages.len(),
            columns.len()
        );

        Ok(Self {
            page_width,
            page_height,
            columns,
            header,
            table_top,
            header_row,
            pages,
            footer_text: context.template.footer_text.clone(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn row_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    pub fn table_width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Footer lines of page `number` (1-based).
    pub fn footer(&self, number: usize) -> Vec<PlacedText> {
        let label = format!("Page {} / {}", number, self.page_count());
        let label_width = text_width(&label, Face::Regular, FOOTER_SIZE);
        let mut lines = vec![PlacedText {
            x: self.page_width - MARGIN - label_width,
            y: MARGIN,
            text: label,
            face: Face::Regular,
            size: FOOTER_SIZE,
        }];

        if let Some(footer) = self.footer_text.as_deref().filter(|t| !t.is_empty()) {
            let available = self.page_width - 2.0 * MARGIN - label_width - 12.0;
            lines.push(PlacedText {
                text: fit_line(footer, Face::Regular, FOOTER_SIZE, available),
                face: Face::Regular,
                size: FOOTER_SIZE,
                x: MARGIN,
                y: MARGIN,
            });
        }
        lines
    }
}

fn page_header(
    context: &RenderContext<'_>,
    page_height: f32,
    printable_width: f32,
) -> Vec<PlacedText> {
    let mut lines = Vec::new();
    let mut y = page_height - MARGIN - TITLE_SIZE;
    lines.push(PlacedText {
        text: fit_line(&context.template.title, Face::Bold, TITLE_SIZE, printable_width),
        face: Face::Bold,
        size: TITLE_SIZE,
        x: MARGIN,
        y,
    });

    if let Some(subtitle) = context.template.subtitle.as_deref().filter(|s| !s.is_empty()) {
        y -= SUBTITLE_SIZE * LINE_FACTOR + 2.0;
        lines.push(PlacedText {
            text: fit_line(subtitle, Face::Regular, SUBTITLE_SIZE, printable_width),
            face: Face::Regular,
            size: SUBTITLE_SIZE,
            x: MARGIN,
            y,
        });
    }

    y -= META_SIZE * LINE_FACTOR + 4.0;
    lines.push(PlacedText {
        text: generated_label(context.generated_at, context.template.author.as_deref()),
        face: Face::Regular,
        size: META_SIZE,
        x: MARGIN,
        y,
    });
    lines
}

pub fn generated_label(generated_at: DateTime<Utc>, author: Option<&str>) -> String {
    let stamp = format!(
        "Généré le {} à {} UTC",
        generated_at.format("%d/%m/%Y"),
        generated_at.format("%H:%M")
    );
    match author.filter(|a| !a.is_empty()) {
        Some(author) => format!("{} par {}", stamp, author),
        None => stamp,
    }
}

/// Width hints are relative weights. Columns without a hint get the mean of
/// the given hints, or 1.0 when no column has one.
fn column_boxes(
    hints: &[Option<f64>],
    headers: &[String],
    printable_width: f32,
) -> UsineResult<Vec<ColumnBox>> {
    if headers.is_empty() {
        return Err(UsineError::Layout("report has no columns".to_string()));
    }
    if printable_width / (headers.len() as f32) < MIN_COLUMN_WIDTH {
        return Err(UsineError::Layout(format!(
            "{} columns do not fit in {:.0}pt of printable width",
            headers.len(),
            printable_width
        )));
    }

    let given: Vec<f64> = hints
        .iter()
        .flatten()
        .copied()
        .filter(|w| *w > 0.0)
        .collect();
    let fallback = if given.is_empty() {
        1.0
    } else {
        given.iter().sum::<f64>() / given.len() as f64
    };
    let weights: Vec<f64> = (0..headers.len())
        .map(|i| {
            hints
                .get(i)
                .copied()
                .flatten()
                .filter(|w| *w > 0.0)
                .unwrap_or(fallback)
        })
        .collect();
    let total: f64 = weights.iter().sum();

    let mut x = MARGIN;
    let mut boxes = Vec::with_capacity(weights.len());
    for (weight, header) in weights.iter().zip(headers) {
        let width = (weight / total) as f32 * printable_width;
        if width < MIN_COLUMN_WIDTH {
            return Err(UsineError::Layout(format!(
                "column '{}' would be {:.0}pt wide, below the {:.0}pt minimum",
                header, width, MIN_COLUMN_WIDTH
            )));
        }
        boxes.push(ColumnBox { x, width });
        x += width;
    }
    Ok(boxes)
}

fn layout_row(
    cells: &[String],
    columns: &[ColumnBox],
    face: Face,
    size: f32,
    max_lines: usize,
) -> LaidOutRow {
    let cells: Vec<Vec<String>> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let text = cells.get(i).map(String::as_str).unwrap_or("");
            wrap_cell(text, face, size, column.width - 2.0 * CELL_PADDING, max_lines)
        })
        .collect();
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    LaidOutRow {
        height: lines as f32 * size * LINE_FACTOR + 2.0 * CELL_PADDING,
        cells,
    }
}

/// Wraps on word boundaries, hard-breaks words wider than the column, and
/// keeps at most `max_lines` lines; a cut cell ends with an ellipsis.
pub fn wrap_cell(
    text: &str,
    face: Face,
    size: f32,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    let fits = |s: &str| text_width(s, face, size) <= max_width;
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if fits(word) {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, &fits);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }

    let max_lines = max_lines.max(1);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(last, &fits);
        }
    }
    lines
}

fn break_word(word: &str, fits: &dyn Fn(&str) -> bool) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if !fits(&current) && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    pieces.push(current);
    pieces
}

fn with_ellipsis(line: &str, fits: &dyn Fn(&str) -> bool) -> String {
    let mut kept: String = line.trim_end().to_string();
    loop {
        let candidate = format!("{}{}", kept, ELLIPSIS);
        if fits(&candidate) || kept.is_empty() {
            return candidate;
        }
        kept.pop();
        kept = kept.trim_end().to_string();
    }
}

/// Single-line variant of [`wrap_cell`] for titles and footers.
fn fit_line(text: &str, face: Face, size: f32, max_width: f32) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text_width(&flat, face, size) <= max_width {
        return flat;
    }
    with_ellipsis(&flat, &|s: &str| text_width(s, face, size) <= max_width)
}
