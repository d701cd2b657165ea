use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type EmployeeId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    #[default]
    Active,
    OnLeave,
    Inactive,
}

impl EmployeeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Actif",
            EmployeeStatus::OnLeave => "En congé",
            EmployeeStatus::Inactive => "Inactif",
        }
    }
}

/// Counters maintained by the dashboard for each employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    #[serde(default)]
    pub hse_trainings_completed: u32,
    #[serde(default)]
    pub incidents_reported: u32,
    #[serde(default)]
    pub visits_hosted: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub department: String,
    pub position: String,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub stats: Option<EmployeeStats>,
}

impl Employee {
    pub fn new(first_name: &str, last_name: &str, department: &str, position: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            phone: None,
            department: department.to_string(),
            position: position.to_string(),
            hire_date: None,
            status: EmployeeStatus::Active,
            stats: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
