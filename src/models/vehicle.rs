//! Vehicle model
//!
//! The vehicle record carries the fleet-inventory attributes plus the
//! live telemetry fields (battery, speed, position) that the simulator
//! perturbs on every tick. Wire format keeps the original dashboard
//! contract: camelCase fields and display status strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operational status of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Idle,
    #[serde(rename = "In Use")]
    InUse,
    #[serde(rename = "Needs Service")]
    NeedsService,
}

/// Vehicle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleType {
    Truck,
    Van,
    Scooter,
    Car,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Electric,
    Petrol,
    Diesel,
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Fleet vehicle with live telemetry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    pub fuel_type: FuelType,
    pub seats: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<Uuid>,
    // Telemetry
    pub battery: f64,
    pub speed: f64,
    pub location: GeoPoint,
    pub last_update: DateTime<Utc>,
    // Simulation counters
    pub total_distance_km: f64,
    pub distance_since_service_km: f64,
}

impl Vehicle {
    pub fn new(
        name: String,
        vehicle_type: VehicleType,
        fuel_type: FuelType,
        seats: i32,
        location: GeoPoint,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            vehicle_type,
            status: VehicleStatus::Idle,
            fuel_type,
            seats,
            driver_id: None,
            battery: 100.0,
            speed: 0.0,
            location,
            last_update: Utc::now(),
            total_distance_km: 0.0,
            distance_since_service_km: 0.0,
        }
    }

    /// Top speed the simulator will let this vehicle reach, in km/h.
    pub fn max_speed_kmh(&self) -> f64 {
        match self.vehicle_type {
            VehicleType::Truck => 80.0,
            VehicleType::Van => 90.0,
            VehicleType::Scooter => 60.0,
            VehicleType::Car => 120.0,
        }
    }

    pub fn is_electric(&self) -> bool {
        self.fuel_type == FuelType::Electric
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_display_strings_on_the_wire() {
        let json = serde_json::to_string(&VehicleStatus::InUse).unwrap();
        assert_eq!(json, "\"In Use\"");
        let back: VehicleStatus = serde_json::from_str("\"Needs Service\"").unwrap();
        assert_eq!(back, VehicleStatus::NeedsService);
    }

    #[test]
    fn new_vehicle_defaults_to_idle_full_battery() {
        let v = Vehicle::new(
            "Test".to_string(),
            VehicleType::Car,
            FuelType::Petrol,
            4,
            GeoPoint::new(28.6139, 77.2090),
        );
        assert_eq!(v.status, VehicleStatus::Idle);
        assert_eq!(v.battery, 100.0);
        assert_eq!(v.speed, 0.0);
    }
}
