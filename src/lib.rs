pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::auth_middleware::auth_middleware;
use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Assemble the full application router: open auth and health routes,
/// everything else under `/api` behind the JWT middleware.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/users", routes::user_routes::create_user_router())
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/bookings", routes::booking_routes::create_booking_router())
        .nest("/api/journey", routes::journey_routes::create_journey_router())
        .nest("/api/alerts", routes::alert_routes::create_alert_router())
        .nest("/api/dashboard", routes::dashboard_routes::create_dashboard_router())
        .nest("/api/maintenance", routes::maintenance_routes::create_maintenance_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let cors = if state.config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&state.config.cors_origins)
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
