use crate::column::{map_rows, ExportColumn};

/// Records projected through a column mapping, ready for any renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub widths: Vec<Option<f64>>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn from_records<T>(columns: &[ExportColumn<'_, T>], records: &[T]) -> Self {
        Self {
            headers: columns.iter().map(|c| c.header().to_string()).collect(),
            widths: columns.iter().map(|c| c.width_hint()).collect(),
            rows: map_rows(columns, records),
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
            .collect()
    }

    pub fn column_by_header(&self, header: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == header)?;
        Some(self.column(index))
    }
}
