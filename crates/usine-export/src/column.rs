//! Column mappings.
//!
//! A report type declares its columns once; every record is then projected
//! through the same list, in the same order. Accessors return `None` for a
//! missing value at any depth, which always renders as an empty cell.

use crate::value::FieldValue;

type Accessor<'a, T> = Box<dyn Fn(&T) -> Option<FieldValue> + Send + Sync + 'a>;
type Formatter<'a> = Box<dyn Fn(&FieldValue) -> String + Send + Sync + 'a>;

pub struct ExportColumn<'a, T> {
    header: String,
    width: Option<f64>,
    accessor: Accessor<'a, T>,
    formatter: Option<Formatter<'a>>,
}

impl<'a, T> ExportColumn<'a, T> {
    pub fn new<F>(header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<FieldValue> + Send + Sync + 'a,
    {
        Self {
            header: header.into(),
            width: None,
            accessor: Box::new(accessor),
            formatter: None,
        }
    }

    /// Relative width hint. The PDF renderer treats it as a weight, the
    /// spreadsheet applies it verbatim as a column width.
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&FieldValue) -> String + Send + Sync + 'a,
    {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn width_hint(&self) -> Option<f64> {
        self.width
    }

    pub fn raw(&self, record: &T) -> Option<FieldValue> {
        (self.accessor)(record)
    }

    pub fn cell(&self, record: &T) -> String {
        match self.raw(record) {
            Some(value) => match &self.formatter {
                Some(formatter) => formatter(&value),
                None => value.to_string(),
            },
            None => String::new(),
        }
    }
}

impl<T> std::fmt::Debug for ExportColumn<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportColumn")
            .field("header", &self.header)
            .field("width", &self.width)
            .field("has_formatter", &self.formatter.is_some())
            .finish()
    }
}

/// Projects one record into its display cells, in column order.
pub fn map_record<T>(columns: &[ExportColumn<'_, T>], record: &T) -> Vec<String> {
    columns.iter().map(|column| column.cell(record)).collect()
}

pub fn map_rows<T>(columns: &[ExportColumn<'_, T>], records: &[T]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| map_record(columns, record))
        .collect()
}

/// Formatters shared by the report generators.
pub mod formatters {
    use super::FieldValue;

    /// `dd/mm/YYYY` for dates, `dd/mm/YYYY HH:MM` for timestamps.
    pub fn french_date(value: &FieldValue) -> String {
        match value {
            FieldValue::Date(date) => date.format("%d/%m/%Y").to_string(),
            FieldValue::DateTime(at) => at.format("%d/%m/%Y %H:%M").to_string(),
            other => other.to_string(),
        }
    }

    pub fn yes_no(value: &FieldValue) -> String {
        match value {
            FieldValue::Bool(true) => "Oui".to_string(),
            FieldValue::Bool(false) => "Non".to_string(),
            other => other.to_string(),
        }
    }

    /// Decimal comma with the given number of fraction digits.
    pub fn decimal(digits: usize) -> impl Fn(&FieldValue) -> String + Send + Sync {
        move |value| match value {
            FieldValue::Number(number) => format!("{:.*}", digits, number).replace('.', ","),
            FieldValue::Integer(number) => number.to_string(),
            other => other.to_string(),
        }
    }
}
