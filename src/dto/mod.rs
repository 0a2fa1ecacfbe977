pub mod auth_dto;
pub mod booking_dto;
pub mod dashboard_dto;
pub mod journey_dto;
pub mod maintenance_dto;
pub mod user_dto;
pub mod vehicle_dto;
