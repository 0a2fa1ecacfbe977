//! In-memory alert store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::alert::Alert;

#[derive(Clone, Default)]
pub struct AlertRepository {
    inner: Arc<RwLock<HashMap<Uuid, Alert>>>,
}

impl AlertRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, alert: Alert) -> Alert {
        let mut alerts = self.inner.write().await;
        alerts.insert(alert.id, alert.clone());
        alert
    }

    pub async fn insert_all(&self, batch: Vec<Alert>) {
        let mut alerts = self.inner.write().await;
        for alert in batch {
            alerts.insert(alert.id, alert);
        }
    }

    /// All alerts, newest first.
    pub async fn all(&self) -> Vec<Alert> {
        let mut result: Vec<Alert> = self.inner.read().await.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }

    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> Vec<Alert> {
        let mut result: Vec<Alert> = self
            .inner
            .read()
            .await
            .values()
            .filter(|a| a.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }

    pub async fn resolve(&self, id: Uuid) -> Option<Alert> {
        let mut alerts = self.inner.write().await;
        alerts.get_mut(&id).map(|alert| {
            alert.resolved = true;
            alert.clone()
        })
    }
}
