use uuid::Uuid;

use crate::models::alert::Alert;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct AlertController {
    state: AppState,
}

impl AlertController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self) -> Vec<Alert> {
        self.state.alerts.all().await
    }

    pub async fn for_vehicle(&self, vehicle_id: Uuid) -> Vec<Alert> {
        self.state.alerts.find_by_vehicle(vehicle_id).await
    }

    pub async fn resolve(&self, id: Uuid) -> Result<Alert, AppError> {
        self.state
            .alerts
            .resolve(id)
            .await
            .ok_or_else(|| not_found_error("Alert", &id.to_string()))
    }
}
