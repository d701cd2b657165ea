use usine_core::UsineResult;
use usine_domain::Employee;

use crate::column::{formatters, ExportColumn};
use crate::report::{render_table, ExportedFile, ReportDomain, ReportOptions};
use crate::table::ReportTable;

pub fn employee_columns() -> Vec<ExportColumn<'static, Employee>> {
    vec![
        ExportColumn::new("Nom", |e: &Employee| Some(e.full_name().into())).width(28.0),
        ExportColumn::new("Email", |e: &Employee| e.email.as_ref().map(Into::into)).width(30.0),
        ExportColumn::new("Téléphone", |e: &Employee| e.phone.as_ref().map(Into::into))
            .width(16.0),
        ExportColumn::new("Département", |e: &Employee| Some(e.department.as_str().into()))
            .width(20.0),
        ExportColumn::new("Poste", |e: &Employee| Some(e.position.as_str().into())).width(22.0),
        ExportColumn::new("Date d'embauche", |e: &Employee| e.hire_date.map(Into::into))
            .width(14.0)
            .formatter(formatters::french_date),
        ExportColumn::new("Statut", |e: &Employee| Some(e.status.label().into())).width(12.0),
        ExportColumn::new("Formations HSE", |e: &Employee| {
            e.stats.map(|s| s.hse_trainings_completed.into())
        })
        .width(12.0),
    ]
}

pub fn employees_report(
    employees: &[Employee],
    options: &ReportOptions,
) -> UsineResult<ExportedFile> {
    let columns = employee_columns();
    let table = ReportTable::from_records(&columns, employees);
    render_table(ReportDomain::Employees, &table, options)
}
