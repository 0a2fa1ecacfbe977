use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::MaintenanceStats;
use crate::state::AppState;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new().route("/stats", get(fleet_stats))
}

async fn fleet_stats(State(state): State<AppState>) -> Json<MaintenanceStats> {
    let controller = MaintenanceController::new(state);
    Json(controller.fleet_stats().await)
}
