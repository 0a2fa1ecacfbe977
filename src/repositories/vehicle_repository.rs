//! In-memory vehicle store.
//!
//! This is the explicitly-owned replacement for the old module-level
//! vehicle list: constructed once at app start, cloned (cheaply, it is
//! an `Arc`) into every consumer, and never reachable as a global.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleStatus};

#[derive(Clone, Default)]
pub struct VehicleRepository {
    inner: Arc<RwLock<HashMap<Uuid, Vehicle>>>,
}

impl VehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, vehicle: Vehicle) -> Vehicle {
        let mut vehicles = self.inner.write().await;
        vehicles.insert(vehicle.id, vehicle.clone());
        vehicle
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Vehicle> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn find_by_driver(&self, driver_id: Uuid) -> Option<Vehicle> {
        self.inner
            .read()
            .await
            .values()
            .find(|v| v.driver_id == Some(driver_id))
            .cloned()
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Vec<Vehicle> {
        let vehicles = self.inner.read().await;
        ids.iter().filter_map(|id| vehicles.get(id).cloned()).collect()
    }

    /// All vehicles, ordered by name for stable listings.
    pub async fn all(&self) -> Vec<Vehicle> {
        let mut vehicles: Vec<Vehicle> = self.inner.read().await.values().cloned().collect();
        vehicles.sort_by(|a, b| a.name.cmp(&b.name));
        vehicles
    }

    pub async fn update(&self, vehicle: Vehicle) -> Option<Vehicle> {
        let mut vehicles = self.inner.write().await;
        vehicles.contains_key(&vehicle.id).then(|| {
            vehicles.insert(vehicle.id, vehicle.clone());
            vehicle
        })
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn count_by_status(&self, status: VehicleStatus) -> usize {
        self.inner
            .read()
            .await
            .values()
            .filter(|v| v.status == status)
            .count()
    }

    /// Run a closure against the whole fleet under a single write lock.
    /// Used by the telemetry tick so one simulation cycle is atomic with
    /// respect to concurrent API reads.
    pub async fn with_all_mut<R>(&self, f: impl FnOnce(&mut HashMap<Uuid, Vehicle>) -> R) -> R {
        let mut vehicles = self.inner.write().await;
        f(&mut vehicles)
    }
}
