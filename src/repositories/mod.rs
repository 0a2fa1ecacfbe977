pub mod alert_repository;
pub mod booking_repository;
pub mod user_repository;
pub mod vehicle_repository;
