use usine_core::UsineResult;
use usine_domain::{EmployeeDirectory, Incident, Severity};

use crate::column::{formatters, ExportColumn};
use crate::report::{render_table, ExportedFile, ReportDomain, ReportOptions};
use crate::table::ReportTable;
use crate::value::FieldValue;

/// Severity is read as its stored code and shown as its French label.
fn severity_label(value: &FieldValue) -> String {
    let raw = value.to_string();
    Severity::from_code(&raw)
        .map(|severity| severity.label().to_string())
        .unwrap_or(raw)
}

pub fn incident_columns(directory: &EmployeeDirectory) -> Vec<ExportColumn<'_, Incident>> {
    vec![
        ExportColumn::new("Date", |i: &Incident| Some(i.occurred_at.into()))
            .width(16.0)
            .formatter(formatters::french_date),
        ExportColumn::new("Titre", |i: &Incident| Some(i.title.as_str().into())).width(30.0),
        ExportColumn::new("Type", |i: &Incident| Some(i.incident_type.label().into()))
            .width(16.0),
        ExportColumn::new("Gravité", |i: &Incident| Some(i.severity.code().into()))
            .width(10.0)
            .formatter(severity_label),
        ExportColumn::new("Statut", |i: &Incident| Some(i.status.label().into())).width(14.0),
        ExportColumn::new("Lieu", |i: &Incident| Some(i.location.as_str().into())).width(18.0),
        ExportColumn::new("Déclaré par", move |i: &Incident| {
            Some(directory.display_name(i.reported_by.as_ref()).into())
        })
        .width(20.0),
        ExportColumn::new("Assigné à", move |i: &Incident| {
            Some(directory.display_name(i.assigned_to.as_ref()).into())
        })
        .width(20.0),
        ExportColumn::new("Description", |i: &Incident| {
            Some(i.description.as_str())
                .filter(|text| !text.is_empty())
                .map(Into::into)
        })
        .width(40.0),
    ]
}

pub fn incidents_report(
    incidents: &[Incident],
    directory: &EmployeeDirectory,
    options: &ReportOptions,
) -> UsineResult<ExportedFile> {
    let columns = incident_columns(directory);
    let table = ReportTable::from_records(&columns, incidents);
    render_table(ReportDomain::Incidents, &table, options)
}
