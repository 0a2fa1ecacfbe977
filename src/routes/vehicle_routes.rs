use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::middleware::auth_middleware::AuthUser;
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/", post(create_vehicle))
        .route("/my-vehicle", get(my_vehicle))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/assign/:driver_id", post(assign_driver))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Json<Vec<Vehicle>> {
    let controller = VehicleController::new(state);
    Json(controller.list(&auth).await)
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state);
    Ok(Json(controller.create(&auth, request).await?))
}

async fn my_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state);
    Ok(Json(controller.my_vehicle(&auth).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state);
    Ok(Json(controller.get(id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state);
    Ok(Json(controller.update(&auth, id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state);
    controller.delete(&auth, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehicle deleted"
    })))
}

async fn assign_driver(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((id, driver_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state);
    Ok(Json(controller.assign_driver(&auth, id, driver_id).await?))
}
