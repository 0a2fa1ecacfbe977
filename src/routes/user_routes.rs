use axum::{
    extract::State,
    routing::{get, put},
    Extension, Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::user_dto::{UpdateProfileRequest, UserResponse};
use crate::middleware::auth_middleware::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/profile", put(update_profile))
}

async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = UserController::new(state);
    Ok(Json(controller.me(&auth).await?))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = UserController::new(state);
    Ok(Json(controller.update_profile(&auth, request).await?))
}
