use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};

use crate::controllers::journey_controller::JourneyController;
use crate::dto::journey_dto::{
    JourneyBookRequest, JourneyLocationsRequest, ResolveLocationRequest, ResolveLocationResponse,
    RouteAnalyticsResponse,
};
use crate::middleware::auth_middleware::AuthUser;
use crate::models::booking::Booking;
use crate::services::journey_service::JourneySession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_journey_router() -> Router<AppState> {
    Router::new()
        .route("/", get(session))
        .route("/", delete(reset))
        .route("/locations", post(set_locations))
        .route("/resolve", post(resolve_location))
        .route("/routes", post(plan_routes))
        .route("/select/:route_id", post(select_route))
        .route("/analytics", get(analytics))
        .route("/vehicles", post(vehicles))
        .route("/book", post(book))
}

async fn session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Json<JourneySession> {
    let controller = JourneyController::new(state);
    Json(controller.session(&auth).await)
}

async fn set_locations(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<JourneyLocationsRequest>,
) -> Json<JourneySession> {
    let controller = JourneyController::new(state);
    Json(controller.set_locations(&auth, request).await)
}

async fn resolve_location(
    State(state): State<AppState>,
    Json(request): Json<ResolveLocationRequest>,
) -> Json<ResolveLocationResponse> {
    let controller = JourneyController::new(state);
    Json(controller.resolve_location(request).await)
}

async fn plan_routes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<JourneySession>, AppError> {
    let controller = JourneyController::new(state);
    Ok(Json(controller.plan_routes(&auth).await?))
}

async fn select_route(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(route_id): Path<String>,
) -> Result<Json<JourneySession>, AppError> {
    let controller = JourneyController::new(state);
    Ok(Json(controller.select_route(&auth, &route_id).await?))
}

async fn analytics(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<RouteAnalyticsResponse>, AppError> {
    let controller = JourneyController::new(state);
    Ok(Json(controller.analytics(&auth).await?))
}

async fn vehicles(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<JourneySession>, AppError> {
    let controller = JourneyController::new(state);
    Ok(Json(controller.vehicles(&auth).await?))
}

async fn book(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<JourneyBookRequest>,
) -> Result<Json<Booking>, AppError> {
    let controller = JourneyController::new(state);
    Ok(Json(controller.book(&auth, request).await?))
}

async fn reset(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Json<JourneySession> {
    let controller = JourneyController::new(state);
    Json(controller.reset(&auth).await)
}
