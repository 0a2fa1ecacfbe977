pub mod alert_controller;
pub mod auth_controller;
pub mod booking_controller;
pub mod dashboard_controller;
pub mod journey_controller;
pub mod maintenance_controller;
pub mod user_controller;
pub mod vehicle_controller;
