use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::employee::EmployeeId;

pub type EquipmentId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    #[default]
    Operational,
    Maintenance,
    OutOfService,
    Retired,
}

impl EquipmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "Opérationnel",
            EquipmentStatus::Maintenance => "En maintenance",
            EquipmentStatus::OutOfService => "Hors service",
            EquipmentStatus::Retired => "Réformé",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: EquipmentStatus,
    #[serde(default)]
    pub assigned_to: Option<EmployeeId>,
    #[serde(default)]
    pub last_maintenance: Option<NaiveDate>,
    #[serde(default)]
    pub next_maintenance: Option<NaiveDate>,
}

impl Equipment {
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: category.to_string(),
            serial_number: None,
            location: String::new(),
            status: EquipmentStatus::Operational,
            assigned_to: None,
            last_maintenance: None,
            next_maintenance: None,
        }
    }

    pub fn maintenance_overdue(&self, today: NaiveDate) -> bool {
        self.next_maintenance.is_some_and(|due| due < today)
            && self.status != EquipmentStatus::Retired
    }
}
