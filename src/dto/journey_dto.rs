use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{route::EnergyUse, vehicle::VehicleType};

/// Location input for the journey planner. Display strings come from
/// the text fields, coordinates from a map click (optionally resolved
/// through the reverse geocoder first).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyLocationsRequest {
    pub start_location: String,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub drop_location: String,
    pub drop_lat: Option<f64>,
    pub drop_lng: Option<f64>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub seats: Option<i32>,
    pub is_ev: Option<bool>,
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveLocationRequest {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct ResolveLocationResponse {
    pub address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyBookRequest {
    pub vehicle_id: Uuid,
}

/// Congested stretch of the selected polyline, as point indices.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CongestionSegment {
    pub from_index: usize,
    pub to_index: usize,
    pub delay_min: i64,
}

/// Derived display attributes of the selected route. Computed entirely
/// from cached data; requesting analytics never triggers network calls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAnalyticsResponse {
    pub route_id: String,
    #[serde(rename = "type")]
    pub label: String,
    pub color: String,
    pub live_eta_min: i64,
    pub distance_km: f64,
    pub energy: EnergyUse,
    pub traffic_status: String,
    pub peak_hour: String,
    pub road_blocks: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congestion: Option<CongestionSegment>,
}
