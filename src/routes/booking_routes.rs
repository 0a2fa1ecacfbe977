use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{BookingRequest, RecommendedVehicle, VehicleSearchRequest};
use crate::middleware::auth_middleware::AuthUser;
use crate::models::booking::Booking;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/recommend", post(recommend_vehicles))
        .route("/my", get(my_bookings))
        .route("/:id/cancel", delete(cancel_booking))
        .route("/:id/complete", put(complete_booking))
}

async fn recommend_vehicles(
    State(state): State<AppState>,
    Json(request): Json<VehicleSearchRequest>,
) -> Json<Vec<RecommendedVehicle>> {
    let controller = BookingController::new(state);
    Json(controller.recommend(request).await)
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let controller = BookingController::new(state);
    Ok(Json(controller.create(&auth, request).await?))
}

async fn my_bookings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Json<Vec<Booking>> {
    let controller = BookingController::new(state);
    Json(controller.my_bookings(&auth).await)
}

async fn cancel_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let controller = BookingController::new(state);
    Ok(Json(controller.cancel(&auth, id).await?))
}

async fn complete_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let controller = BookingController::new(state);
    Ok(Json(controller.complete(&auth, id).await?))
}
