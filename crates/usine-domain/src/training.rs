use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::employee::EmployeeId;

pub type TrainingId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    #[default]
    Planned,
    Completed,
    Cancelled,
}

impl TrainingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TrainingStatus::Planned => "Planifiée",
            TrainingStatus::Completed => "Réalisée",
            TrainingStatus::Cancelled => "Annulée",
        }
    }
}

/// An HSE training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: TrainingId,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub instructor: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub duration_hours: f64,
    #[serde(default)]
    pub participants: Vec<EmployeeId>,
    #[serde(default)]
    pub status: TrainingStatus,
}

impl Training {
    pub fn new(title: &str, category: &str, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            category: category.to_string(),
            instructor: None,
            date,
            duration_hours: 0.0,
            participants: Vec::new(),
            status: TrainingStatus::Planned,
        }
    }
}
