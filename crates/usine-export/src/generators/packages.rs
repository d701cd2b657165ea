use usine_core::UsineResult;
use usine_domain::{EmployeeDirectory, Package};

use crate::column::{formatters, ExportColumn};
use crate::report::{render_table, ExportedFile, ReportDomain, ReportOptions};
use crate::table::ReportTable;

pub fn package_columns(directory: &EmployeeDirectory) -> Vec<ExportColumn<'_, Package>> {
    vec![
        ExportColumn::new("Type", |p: &Package| Some(p.kind.label().into())).width(10.0),
        ExportColumn::new("N° de suivi", |p: &Package| {
            p.tracking_number.as_ref().map(Into::into)
        })
        .width(18.0),
        ExportColumn::new("Expéditeur", |p: &Package| Some(p.sender.as_str().into())).width(22.0),
        ExportColumn::new("Destinataire", move |p: &Package| {
            Some(directory.display_name(p.recipient_id.as_ref()).into())
        })
        .width(22.0),
        ExportColumn::new("Transporteur", |p: &Package| p.carrier.as_ref().map(Into::into))
            .width(14.0),
        ExportColumn::new("Reçu le", |p: &Package| Some(p.received_at.into()))
            .width(16.0)
            .formatter(formatters::french_date),
        ExportColumn::new("Retiré le", |p: &Package| p.picked_up_at.map(Into::into))
            .width(16.0)
            .formatter(formatters::french_date),
        ExportColumn::new("Statut", |p: &Package| Some(p.status.label().into())).width(16.0),
    ]
}

pub fn packages_report(
    packages: &[Package],
    directory: &EmployeeDirectory,
    options: &ReportOptions,
) -> UsineResult<ExportedFile> {
    let columns = package_columns(directory);
    let table = ReportTable::from_records(&columns, packages);
    render_table(ReportDomain::Packages, &table, options)
}
