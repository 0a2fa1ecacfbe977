pub mod auth_service;
pub mod booking_service;
pub mod dashboard_service;
pub mod geocoding_service;
pub mod journey_service;
pub mod maintenance_service;
pub mod routing_service;
pub mod telemetry_service;
