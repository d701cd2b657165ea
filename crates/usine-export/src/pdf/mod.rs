//! Paginated table documents.

pub mod encoder;
pub mod font;
pub mod layout;

pub use layout::{wrap_cell, LaidOutRow, PdfLayout};

use usine_core::UsineResult;

use crate::format::ExportFormat;
use crate::report::{DocumentRenderer, RenderContext};
use crate::table::ReportTable;

pub struct PdfRenderer;

impl PdfRenderer {
    pub fn layout(table: &ReportTable, context: &RenderContext<'_>) -> UsineResult<PdfLayout> {
        PdfLayout::compute(table, context)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, table: &ReportTable, context: &RenderContext<'_>) -> UsineResult<Vec<u8>> {
        let layout = Self::layout(table, context)?;
        encoder::encode(&layout, context.template, context.generated_at)
    }
}
