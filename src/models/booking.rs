//! Booking model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_location: String,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub drop_location: String,
    pub drop_lat: Option<f64>,
    pub drop_lng: Option<f64>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// A booking can only be cancelled while it is still live.
    pub fn is_cancellable(&self) -> bool {
        !matches!(
            self.status,
            BookingStatus::Completed | BookingStatus::Cancelled
        )
    }

    /// Active bookings keep their vehicle reserved.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::InProgress
        )
    }
}
