//! One report generator per data domain.
//!
//! Generators pick the columns and formatters of their domain, project the
//! records and hand the table to the renderer. They never mutate their
//! inputs, and references to missing employees become placeholder labels.

pub mod employees;
pub mod equipment;
pub mod incidents;
pub mod packages;
pub mod trainings;
pub mod visits;

pub use employees::{employee_columns, employees_report};
pub use equipment::{equipment_columns, equipment_report};
pub use incidents::{incident_columns, incidents_report};
pub use packages::{package_columns, packages_report};
pub use trainings::{training_columns, trainings_report};
pub use visits::{visit_columns, visits_report};

use usine_core::UsineResult;
use usine_domain::FacilityDataset;

use crate::report::{ExportedFile, ReportDomain, ReportOptions};

/// Runs the generator of `domain` over the matching collection.
pub fn generate(
    domain: ReportDomain,
    dataset: &FacilityDataset,
    options: &ReportOptions,
) -> UsineResult<ExportedFile> {
    let directory = dataset.directory();
    match domain {
        ReportDomain::Employees => employees_report(&dataset.employees, options),
        ReportDomain::Visits => visits_report(&dataset.visits, &directory, options),
        ReportDomain::Incidents => incidents_report(&dataset.incidents, &directory, options),
        ReportDomain::Trainings => trainings_report(&dataset.trainings, &directory, options),
        ReportDomain::Equipment => equipment_report(&dataset.equipment, &directory, options),
        ReportDomain::Packages => packages_report(&dataset.packages, &directory, options),
    }
}

/// Number of records `generate` would export for `domain`.
pub fn record_count(domain: ReportDomain, dataset: &FacilityDataset) -> usize {
    match domain {
        ReportDomain::Employees => dataset.employees.len(),
        ReportDomain::Visits => dataset.visits.len(),
        ReportDomain::Incidents => dataset.incidents.len(),
        ReportDomain::Trainings => dataset.trainings.len(),
        ReportDomain::Equipment => dataset.equipment.len(),
        ReportDomain::Packages => dataset.packages.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ExportFormat;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_every_domain_exports_empty_dataset() {
        let dataset = FacilityDataset::empty();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

        for format in [ExportFormat::Pdf, ExportFormat::Xlsx] {
            let options = ReportOptions::new(format).generated_at(at);
            for domain in ReportDomain::ALL {
                let file = generate(domain, &dataset, &options).unwrap();
                assert_eq!(file.record_count, 0);
                assert_eq!(
                    file.filename,
                    format!("{}-2024-03-01.{}", domain.slug(), format.extension())
                );
                assert!(!file.is_empty());
            }
        }
    }
}
