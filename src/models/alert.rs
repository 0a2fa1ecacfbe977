//! Fleet alerts raised by the telemetry simulator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehicle::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub alert_type: String,
    pub message: String,
    pub severity: Severity,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(vehicle: &Vehicle, alert_type: &str, message: String, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            vehicle_name: vehicle.name.clone(),
            alert_type: alert_type.to_string(),
            message,
            severity,
            resolved: false,
            created_at: Utc::now(),
        }
    }
}
