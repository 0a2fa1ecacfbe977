pub mod alert_routes;
pub mod auth_routes;
pub mod booking_routes;
pub mod dashboard_routes;
pub mod journey_routes;
pub mod maintenance_routes;
pub mod user_routes;
pub mod vehicle_routes;
