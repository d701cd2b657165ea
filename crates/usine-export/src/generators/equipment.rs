use chrono::NaiveDate;
use usine_core::UsineResult;
use usine_domain::{EmployeeDirectory, Equipment};

use crate::column::{formatters, ExportColumn};
use crate::report::{render_table, ExportedFile, ReportDomain, ReportOptions};
use crate::table::ReportTable;

/// Columns of the equipment inventory. `today` decides which items are
/// flagged as overdue for maintenance.
pub fn equipment_columns(
    directory: &EmployeeDirectory,
    today: NaiveDate,
) -> Vec<ExportColumn<'_, Equipment>> {
    vec![
        ExportColumn::new("Nom", |e: &Equipment| Some(e.name.as_str().into())).width(24.0),
        ExportColumn::new("Catégorie", |e: &Equipment| Some(e.category.as_str().into()))
            .width(16.0),
        ExportColumn::new("N° de série", |e: &Equipment| {
            e.serial_number.as_ref().map(Into::into)
        })
        .width(16.0),
        ExportColumn::new("Emplacement", |e: &Equipment| Some(e.location.as_str().into()))
            .width(18.0),
        ExportColumn::new("Statut", |e: &Equipment| Some(e.status.label().into())).width(14.0),
        ExportColumn::new("Attribué à", move |e: &Equipment| {
            Some(directory.display_name(e.assigned_to.as_ref()).into())
        })
        .width(20.0),
        ExportColumn::new("Dernière maintenance", |e: &Equipment| {
            e.last_maintenance.map(Into::into)
        })
        .width(14.0)
        .formatter(formatters::french_date),
        ExportColumn::new("Prochaine maintenance", |e: &Equipment| {
            e.next_maintenance.map(Into::into)
        })
        .width(14.0)
        .formatter(formatters::french_date),
        ExportColumn::new("En retard", move |e: &Equipment| {
            e.next_maintenance.map(|_| e.maintenance_overdue(today).into())
        })
        .width(9.0)
        .formatter(formatters::yes_no),
    ]
}

pub fn equipment_report(
    equipment: &[Equipment],
    directory: &EmployeeDirectory,
    options: &ReportOptions,
) -> UsineResult<ExportedFile> {
    let columns = equipment_columns(directory, options.generated_at.date_naive());
    let table = ReportTable::from_records(&columns, equipment);
    render_table(ReportDomain::Equipment, &table, options)
}
