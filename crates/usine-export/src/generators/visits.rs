use usine_core::UsineResult;
use usine_domain::{EmployeeDirectory, Visit};

use crate::column::{formatters, ExportColumn};
use crate::report::{render_table, ExportedFile, ReportDomain, ReportOptions};
use crate::table::ReportTable;

pub fn visit_columns(directory: &EmployeeDirectory) -> Vec<ExportColumn<'_, Visit>> {
    vec![
        ExportColumn::new("Visiteur", |v: &Visit| Some(v.visitor_name.as_str().into()))
            .width(22.0),
        ExportColumn::new("Société", |v: &Visit| v.company.as_ref().map(Into::into)).width(20.0),
        ExportColumn::new("Hôte", move |v: &Visit| {
            Some(directory.display_name(v.host_id.as_ref()).into())
        })
        .width(22.0),
        ExportColumn::new("Objet", |v: &Visit| Some(v.purpose.as_str().into())).width(28.0),
        ExportColumn::new("Prévue le", |v: &Visit| Some(v.scheduled_at.into()))
            .width(16.0)
            .formatter(formatters::french_date),
        ExportColumn::new("Arrivée", |v: &Visit| v.check_in.map(Into::into))
            .width(16.0)
            .formatter(formatters::french_date),
        ExportColumn::new("Départ", |v: &Visit| v.check_out.map(Into::into))
            .width(16.0)
            .formatter(formatters::french_date),
        ExportColumn::new("Durée (min)", |v: &Visit| v.duration_minutes().map(Into::into))
            .width(10.0),
        ExportColumn::new("Badge", |v: &Visit| v.badge_number.as_ref().map(Into::into))
            .width(10.0),
        ExportColumn::new("Statut", |v: &Visit| Some(v.status.label().into())).width(12.0),
    ]
}

pub fn visits_report(
    visits: &[Visit],
    directory: &EmployeeDirectory,
    options: &ReportOptions,
) -> UsineResult<ExportedFile> {
    let columns = visit_columns(directory);
    let table = ReportTable::from_records(&columns, visits);
    render_table(ReportDomain::Visits, &table, options)
}
