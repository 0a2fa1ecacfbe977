use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleType};

/// Search context for vehicle recommendations. The booking page sends
/// its full search state; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSearchRequest {
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub seats: Option<i32>,
    pub is_ev: Option<bool>,
    pub start_location: Option<String>,
    pub drop_location: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub vehicle_id: Uuid,
    pub start_location: String,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub drop_location: String,
    pub drop_lat: Option<f64>,
    pub drop_lng: Option<f64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub estimated_price: Option<f64>,
}

/// A recommended vehicle with its demonstration fare attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub price: f64,
}
