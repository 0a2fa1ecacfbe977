pub mod alert;
pub mod booking;
pub mod route;
pub mod user;
pub mod vehicle;
