use usine_core::UsineResult;
use usine_domain::{EmployeeDirectory, Training};

use crate::column::{formatters, ExportColumn};
use crate::report::{render_table, ExportedFile, ReportDomain, ReportOptions};
use crate::table::ReportTable;

pub fn training_columns(directory: &EmployeeDirectory) -> Vec<ExportColumn<'_, Training>> {
    vec![
        ExportColumn::new("Intitulé", |t: &Training| Some(t.title.as_str().into())).width(28.0),
        ExportColumn::new("Catégorie", |t: &Training| Some(t.category.as_str().into()))
            .width(16.0),
        ExportColumn::new("Formateur", |t: &Training| t.instructor.as_ref().map(Into::into))
            .width(18.0),
        ExportColumn::new("Date", |t: &Training| Some(t.date.into()))
            .width(12.0)
            .formatter(formatters::french_date),
        ExportColumn::new("Durée (h)", |t: &Training| Some(t.duration_hours.into()))
            .width(9.0)
            .formatter(formatters::decimal(1)),
        ExportColumn::new("Participants", |t: &Training| Some(t.participants.len().into()))
            .width(10.0),
        ExportColumn::new("Liste des participants", move |t: &Training| {
            Some(directory.join_names(&t.participants, ", "))
                .filter(|names| !names.is_empty())
                .map(Into::into)
        })
        .width(40.0),
        ExportColumn::new("Statut", |t: &Training| Some(t.status.label().into())).width(12.0),
    ]
}

pub fn trainings_report(
    trainings: &[Training],
    directory: &EmployeeDirectory,
    options: &ReportOptions,
) -> UsineResult<ExportedFile> {
    let columns = training_columns(directory);
    let table = ReportTable::from_records(&columns, trainings);
    render_table(ReportDomain::Trainings, &table, options)
}
