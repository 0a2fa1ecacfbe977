//! Bearer-token authentication middleware.
//!
//! Verifies the JWT, loads the account it names, and attaches it to
//! the request as an [`AuthUser`] extension for handlers downstream.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::user::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// The authenticated caller, extracted from the verified token and the
/// user store.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let jwt_config = JwtConfig::from(state.config.as_ref());
    let claims = verify_token(token, &jwt_config)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

    // Tokens outlive accounts only if the account was deleted.
    let user = state
        .users
        .find_by_id(user_id)
        .await
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
        role: user.role,
    });

    Ok(next.run(request).await)
}
