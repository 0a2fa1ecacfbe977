use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{
    AdminMetricsResponse, CustomerMetricsResponse, DriverMetricsResponse,
    FleetManagerMetricsResponse,
};
use crate::middleware::auth_middleware::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/admin/metrics", get(admin_metrics))
        .route("/fleet-manager/metrics", get(fleet_manager_metrics))
        .route("/driver/metrics", get(driver_metrics))
        .route("/customer/metrics", get(customer_metrics))
}

async fn admin_metrics(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<AdminMetricsResponse>, AppError> {
    let controller = DashboardController::new(state);
    Ok(Json(controller.admin_metrics(&auth).await?))
}

async fn fleet_manager_metrics(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<FleetManagerMetricsResponse>, AppError> {
    let controller = DashboardController::new(state);
    Ok(Json(controller.fleet_manager_metrics(&auth).await?))
}

async fn driver_metrics(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<DriverMetricsResponse>, AppError> {
    let controller = DashboardController::new(state);
    Ok(Json(controller.driver_metrics(&auth).await?))
}

async fn customer_metrics(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<CustomerMetricsResponse>, AppError> {
    let controller = DashboardController::new(state);
    Ok(Json(controller.customer_metrics(&auth).await?))
}
