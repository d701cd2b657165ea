use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::employee::EmployeeId;

pub type VisitId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl VisitStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VisitStatus::Scheduled => "Planifiée",
            VisitStatus::InProgress => "En cours",
            VisitStatus::Completed => "Terminée",
            VisitStatus::Cancelled => "Annulée",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: VisitId,
    pub visitor_name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub host_id: Option<EmployeeId>,
    pub purpose: String,
    #[serde(default)]
    pub status: VisitStatus,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub badge_number: Option<String>,
}

impl Visit {
    pub fn new(visitor_name: &str, purpose: &str, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            visitor_name: visitor_name.to_string(),
            company: None,
            host_id: None,
            purpose: purpose.to_string(),
            status: VisitStatus::Scheduled,
            scheduled_at,
            check_in: None,
            check_out: None,
            badge_number: None,
        }
    }

    /// Minutes spent on site, known once the visitor has checked out.
    pub fn duration_minutes(&self) -> Option<i64> {
        match (self.check_in, self.check_out) {
            (Some(start), Some(end)) if end >= start => Some((end - start).num_minutes()),
            _ => None,
        }
    }
}
