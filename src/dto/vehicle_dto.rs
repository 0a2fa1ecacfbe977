use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::{FuelType, GeoPoint, VehicleStatus, VehicleType};

/// Request to register a new vehicle in the fleet inventory.
/// Telemetry fields are optional; defaults match a freshly parked
/// vehicle (full battery, stationary, New Delhi depot).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,

    pub fuel_type: Option<FuelType>,

    #[validate(range(min = 1, max = 60))]
    pub seats: Option<i32>,

    pub status: Option<VehicleStatus>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub battery: Option<f64>,

    pub location: Option<GeoPoint>,
}

/// Partial update of a vehicle; absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,

    pub fuel_type: Option<FuelType>,

    #[validate(range(min = 1, max = 60))]
    pub seats: Option<i32>,

    pub status: Option<VehicleStatus>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub battery: Option<f64>,

    pub speed: Option<f64>,

    pub location: Option<GeoPoint>,
}
