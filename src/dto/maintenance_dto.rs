use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStats {
    pub fleet_health_score: f64,
    pub vehicles_critical: usize,
    pub vehicles_due_soon: usize,
    pub vehicles_healthy: usize,
    pub predicted_faults: Vec<PredictedFault>,
    pub trend_data: Vec<HealthMetric>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedFault {
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub component: String,
    pub predicted_date: String,
    pub probability: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetric {
    pub month: String,
    pub average_health: f64,
}
