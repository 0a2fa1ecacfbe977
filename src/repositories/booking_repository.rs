//! In-memory booking store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus};

#[derive(Clone, Default)]
pub struct BookingRepository {
    inner: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl BookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, booking: Booking) -> Booking {
        let mut bookings = self.inner.write().await;
        bookings.insert(booking.id, booking.clone());
        booking
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Booking> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Bookings of one user, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> Vec<Booking> {
        let mut result: Vec<Booking> = self
            .inner
            .read()
            .await
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }

    pub async fn all(&self) -> Vec<Booking> {
        let mut result: Vec<Booking> = self.inner.read().await.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }

    pub async fn update(&self, booking: Booking) -> Option<Booking> {
        let mut bookings = self.inner.write().await;
        bookings.contains_key(&booking.id).then(|| {
            bookings.insert(booking.id, booking.clone());
            booking
        })
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn count_by_status(&self, status: BookingStatus) -> usize {
        self.inner
            .read()
            .await
            .values()
            .filter(|b| b.status == status)
            .count()
    }
}
