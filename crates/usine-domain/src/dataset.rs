use serde::{Deserialize, Serialize};

use crate::{
    directory::EmployeeDirectory, Employee, Equipment, Incident, Package, Training, Visit,
};

/// Collections already fetched by the data layer, one list per domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilityDataset {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub visits: Vec<Visit>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub trainings: Vec<Training>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl FacilityDataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn directory(&self) -> EmployeeDirectory {
        EmployeeDirectory::from_employees(&self.employees)
    }
}
