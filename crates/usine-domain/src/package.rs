use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::employee::EmployeeId;

pub type PackageId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageKind {
    #[default]
    Package,
    Mail,
}

impl PackageKind {
    pub fn label(&self) -> &'static str {
        match self {
            PackageKind::Package => "Colis",
            PackageKind::Mail => "Courrier",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    #[default]
    Received,
    Notified,
    PickedUp,
    Returned,
}

impl PackageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PackageStatus::Received => "Reçu",
            PackageStatus::Notified => "Destinataire notifié",
            PackageStatus::PickedUp => "Retiré",
            PackageStatus::Returned => "Retourné",
        }
    }
}

/// An item logged at the reception desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: PackageId,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub kind: PackageKind,
    pub sender: String,
    #[serde(default)]
    pub recipient_id: Option<EmployeeId>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub status: PackageStatus,
    pub received_at: DateTime<Utc>,
    #[serde(default)]
    pub picked_up_at: Option<DateTime<Utc>>,
}

impl Package {
    pub fn new(sender: &str, kind: PackageKind, received_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tracking_number: None,
            kind,
            sender: sender.to_string(),
            recipient_id: None,
            carrier: None,
            status: PackageStatus::Received,
            received_at,
            picked_up_at: None,
        }
    }
}
