pub mod dataset;
pub mod directory;
pub mod employee;
pub mod equipment;
pub mod incident;
pub mod package;
pub mod training;
pub mod visit;

pub use dataset::FacilityDataset;
pub use directory::{EmployeeDirectory, UNASSIGNED_LABEL, UNKNOWN_LABEL};
pub use employee::{Employee, EmployeeId, EmployeeStats, EmployeeStatus};
pub use equipment::{Equipment, EquipmentId, EquipmentStatus};
pub use incident::{Incident, IncidentId, IncidentStatus, IncidentType, Severity};
pub use package::{Package, PackageId, PackageKind, PackageStatus};
pub use training::{Training, TrainingId, TrainingStatus};
pub use visit::{Visit, VisitId, VisitStatus};
