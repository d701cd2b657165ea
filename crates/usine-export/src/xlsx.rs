//! Two-sheet workbooks: the mapped rows and a metadata sheet.

use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, FormatBorder, Workbook, Worksheet, XlsxError,
};
use usine_core::{UsineError, UsineResult};

use crate::format::ExportFormat;
use crate::report::{DocumentRenderer, RenderContext};
use crate::table::ReportTable;

pub const DATA_SHEET: &str = "Données";
pub const METADATA_SHEET: &str = "Métadonnées";

fn xlsx_err(err: XlsxError) -> UsineError {
    UsineError::render("xlsx", err.to_string())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x1F4E78))
        .set_border(FormatBorder::Thin)
}

pub struct SpreadsheetBuilder;

impl SpreadsheetBuilder {
    fn write_data(
        sheet: &mut Worksheet,
        table: &ReportTable,
        header: &Format,
    ) -> Result<(), XlsxError> {
        sheet.set_name(DATA_SHEET)?;

        for (col, title) in table.headers.iter().enumerate() {
            let col = col as u16;
            sheet.write_string_with_format(0, col, title, header)?;
            if let Some(width) = table.widths.get(col as usize).copied().flatten() {
                sheet.set_column_width(col, width)?;
            }
        }

        for (index, row) in table.rows.iter().enumerate() {
            let row_num = (index + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(row_num, col as u16, value)?;
                }
            }
        }

        sheet.set_freeze_panes(1, 0)?;
        Ok(())
    }

    fn write_metadata(
        sheet: &mut Worksheet,
        table: &ReportTable,
        context: &RenderContext<'_>,
        header: &Format,
    ) -> Result<(), XlsxError> {
        sheet.set_name(METADATA_SHEET)?;
        sheet.write_string_with_format(0, 0, "Propriété", header)?;
        sheet.write_string_with_format(0, 1, "Valeur", header)?;

        let template = context.template;
        let generated = context
            .generated_at
            .format("%d/%m/%Y %H:%M:%S UTC")
            .to_string();

        let mut row = 1;
        sheet.write_string(row, 0, "Titre")?;
        sheet.write_string(row, 1, &template.title)?;
        row += 1;
        if let Some(subtitle) = template.subtitle.as_deref() {
            sheet.write_string(row, 0, "Sous-titre")?;
            sheet.write_string(row, 1, subtitle)?;
            row += 1;
        }
        sheet.write_string(row, 0, "Généré le")?;
        sheet.write_string(row, 1, &generated)?;
        row += 1;
        sheet.write_string(row, 0, "Nombre d'enregistrements")?;
        sheet.write_number(row, 1, table.record_count() as f64)?;
        row += 1;
        sheet.write_string(row, 0, "Auteur")?;
        sheet.write_string(row, 1, template.author.as_deref().unwrap_or(""))?;

        sheet.set_column_width(0, 26)?;
        sheet.set_column_width(1, 48)?;
        Ok(())
    }

    pub fn build(table: &ReportTable, context: &RenderContext<'_>) -> UsineResult<Vec<u8>> {
        let mut workbook = Workbook::new();

        let created = ExcelDateTime::from_timestamp(context.generated_at.timestamp())
            .map_err(xlsx_err)?;
        let mut properties = DocProperties::new()
            .set_title(&context.template.title)
            .set_creation_datetime(&created);
        if let Some(author) = context.template.author.as_deref() {
            properties = properties.set_author(author);
        }
        workbook.set_properties(&properties);

        let header = header_format();
        Self::write_data(workbook.add_worksheet(), table, &header).map_err(xlsx_err)?;
        Self::write_metadata(workbook.add_worksheet(), table, context, &header)
            .map_err(xlsx_err)?;

        workbook.save_to_buffer().map_err(xlsx_err)
    }
}

impl DocumentRenderer for SpreadsheetBuilder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn render(&self, table: &ReportTable, context: &RenderContext<'_>) -> UsineResult<Vec<u8>> {
        Self::build(table, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{PageSetup, ReportTemplate};
    use chrono::{TimeZone, Utc};
    use std::io::{Cursor, Read};

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn build(table: &ReportTable, template: &ReportTemplate) -> Vec<u8> {
        let context = RenderContext {
            template,
            page: PageSetup::default(),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            max_cell_lines: 4,
        };
        SpreadsheetBuilder::build(table, &context).unwrap()
    }

    fn table(rows: usize) -> ReportTable {
        ReportTable {
            headers: vec!["Nom".to_string(), "Email".to_string()],
            widths: vec![Some(30.0), None],
            rows: (0..rows)
                .map(|i| vec![format!("Employé {}", i), String::new()])
                .collect(),
        }
    }

    #[test]
    fn test_two_sheets_in_order() {
        let bytes = build(&table(2), &ReportTemplate::new("Employés"));
        let workbook = part(&bytes, "xl/workbook.xml");

        let data = workbook.find("name=\"Données\"").unwrap();
        let meta = workbook.find("name=\"Métadonnées\"").unwrap();
        assert!(data < meta);
    }

    #[test]
    fn test_empty_export_has_header_row_only() {
        let bytes = build(&table(0), &ReportTemplate::new("Employés"));
        let sheet = part(&bytes, "xl/worksheets/sheet1.xml");

        assert_eq!(sheet.matches("<row ").count(), 1);
        assert!(sheet.contains("<row r=\"1\""));
    }

    #[test]
    fn test_one_data_row_per_record() {
        let bytes = build(&table(3), &ReportTemplate::new("Employés"));
        let sheet = part(&bytes, "xl/worksheets/sheet1.xml");
        assert_eq!(sheet.matches("<row ").count(), 4);
    }

    #[test]
    fn test_metadata_sheet_contents() {
        let template = ReportTemplate::new("Employés").with_author("RH");
        let bytes = build(&table(3), &template);
        let strings = part(&bytes, "xl/sharedStrings.xml");

        for expected in [
            "Titre",
            "Employés",
            "Généré le",
            "01/03/2024 10:00:00 UTC",
            "enregistrements",
            "Auteur",
            "RH",
        ] {
            assert!(strings.contains(expected), "missing {}", expected);
        }
        let meta = part(&bytes, "xl/worksheets/sheet2.xml");
        assert!(meta.contains("<v>3</v>"));
    }

    #[test]
    fn test_width_hint_applied_verbatim() {
        let bytes = build(&table(1), &ReportTemplate::new("Employés"));
        let sheet = part(&bytes, "xl/worksheets/sheet1.xml");
        // 30 characters in Excel's column unit, including its cell padding.
        assert!(sheet.contains(r#"<col min="1" max="1" width="30.7109375""#));
        assert!(!sheet.contains(r#"<col min="2""#));
    }

    #[test]
    fn test_same_inputs_same_sheets() {
        let template = ReportTemplate::new("Employés");
        let first = build(&table(2), &template);
        let second = build(&table(2), &template);
        for name in [
            "xl/worksheets/sheet1.xml",
            "xl/worksheets/sheet2.xml",
            "xl/sharedStrings.xml",
        ] {
            assert_eq!(part(&first, name), part(&second, name));
        }
    }
}
