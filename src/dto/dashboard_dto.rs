//! Per-role dashboard metric responses.
//!
//! All values are pre-formatted display strings, matching the widgets
//! that render them verbatim.

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMetricsResponse {
    pub total_users: String,
    pub total_fleets: String,
    pub total_bookings: String,
    pub active_users: String,
    pub completed_trips: String,
    pub total_revenue: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetManagerMetricsResponse {
    pub active_vehicles: String,
    pub total_fleet_size: String,
    pub active_trips: String,
    pub completed_trips: String,
    pub active_drivers: String,
    pub weekly_revenue: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverMetricsResponse {
    pub todays_trips: String,
    pub todays_earnings: String,
    pub distance_covered: String,
    pub driver_rating: String,
    pub completed_trips: String,
    pub acceptance_rate: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMetricsResponse {
    pub active_bookings: String,
    pub total_trips: String,
    pub total_spent: String,
    pub amount_saved: String,
    pub upcoming_trips: String,
    pub favorite_routes: String,
}
