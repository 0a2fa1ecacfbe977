use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::alert_controller::AlertController;
use crate::models::alert::Alert;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_alert_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alerts))
        .route("/vehicle/:vehicle_id", get(alerts_for_vehicle))
        .route("/:id/resolve", put(resolve_alert))
}

async fn list_alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    let controller = AlertController::new(state);
    Json(controller.list().await)
}

async fn alerts_for_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Json<Vec<Alert>> {
    let controller = AlertController::new(state);
    Json(controller.for_vehicle(vehicle_id).await)
}

async fn resolve_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Alert>, AppError> {
    let controller = AlertController::new(state);
    Ok(Json(controller.resolve(id).await?))
}
