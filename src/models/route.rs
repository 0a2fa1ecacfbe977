//! Route candidates produced by the routing workflow
//!
//! A `RouteOption` is immutable once fetched: label, color and energy
//! class are fixed by the candidate's position in the result list, not
//! by its actual distance/duration.

use serde::{Deserialize, Serialize};

use crate::models::vehicle::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUse {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOption {
    pub id: String,
    #[serde(rename = "type")]
    pub label: String,
    pub color: String,
    pub distance_km: f64,
    pub duration_min: i64,
    pub energy: EnergyUse,
    pub geometry: Vec<GeoPoint>,
}

/// Fixed decoration applied by result index: 0 is always the fastest
/// (green), 1 the alternative (orange), 2 the scenic option (blue).
pub const ROUTE_STYLES: [(&str, &str, &str, EnergyUse); 3] = [
    ("fastest", "Fastest Route", "#10b981", EnergyUse::High),
    ("traffic", "Alternative Route", "#f59e0b", EnergyUse::Medium),
    ("eco", "Scenic Route", "#3b82f6", EnergyUse::Low),
];
