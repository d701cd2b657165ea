use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::employee::EmployeeId;

pub type IncidentId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Faible",
            Severity::Medium => "Moyen",
            Severity::High => "Élevé",
            Severity::Critical => "Critique",
        }
    }

    /// Parses the raw value stored by the backend.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Accident,
    NearMiss,
    Environmental,
    Security,
    #[default]
    Other,
}

impl IncidentType {
    pub fn label(&self) -> &'static str {
        match self {
            IncidentType::Accident => "Accident",
            IncidentType::NearMiss => "Presque accident",
            IncidentType::Environmental => "Environnemental",
            IncidentType::Security => "Sûreté",
            IncidentType::Other => "Autre",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    #[default]
    Reported,
    Investigating,
    Resolved,
    Closed,
}

impl IncidentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            IncidentStatus::Reported => "Signalé",
            IncidentStatus::Investigating => "En investigation",
            IncidentStatus::Resolved => "Résolu",
            IncidentStatus::Closed => "Clôturé",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: IncidentId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub incident_type: IncidentType,
    pub severity: Severity,
    #[serde(default)]
    pub status: IncidentStatus,
    #[serde(default)]
    pub location: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub reported_by: Option<EmployeeId>,
    #[serde(default)]
    pub assigned_to: Option<EmployeeId>,
}

impl Incident {
    pub fn new(title: &str, severity: Severity, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            incident_type: IncidentType::Other,
            severity,
            status: IncidentStatus::Reported,
            location: String::new(),
            occurred_at,
            reported_by: None,
            assigned_to: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_codes_round_trip_labels() {
        for code in ["low", "medium", "high", "critical"] {
            let severity = Severity::from_code(code).unwrap();
            assert_eq!(severity.code(), code);
        }
        assert_eq!(Severity::from_code("urgent"), None);
        assert_eq!(Severity::High.label(), "Élevé");
    }

    #[test]
    fn test_type_field_renamed() {
        let json = r#"{
            "id": "0b9f7c52-3e0a-4c1e-8d57-1f2a3b4c5d6e",
            "title": "Chute de plain-pied",
            "type": "near_miss",
            "severity": "medium",
            "occurredAt": "2024-03-01T08:30:00Z"
        }"#;
        let incident: Incident = serde_json::from_str(json).unwrap();
        assert_eq!(incident.incident_type, IncidentType::NearMiss);
        assert_eq!(incident.status, IncidentStatus::Reported);
    }
}
