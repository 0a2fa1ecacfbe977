use crate::dto::maintenance_dto::MaintenanceStats;
use crate::state::AppState;

pub struct MaintenanceController {
    state: AppState,
}

impl MaintenanceController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn fleet_stats(&self) -> MaintenanceStats {
        self.state.maintenance.fleet_stats().await
    }
}
