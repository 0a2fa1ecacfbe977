use validator::Validate;

use crate::dto::user_dto::{UpdateProfileRequest, UserResponse};
use crate::middleware::auth_middleware::AuthUser;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct UserController {
    state: AppState,
}

impl UserController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn me(&self, auth: &AuthUser) -> Result<UserResponse, AppError> {
        let user = self
            .state
            .users
            .find_by_id(auth.id)
            .await
            .ok_or_else(|| not_found_error("User", &auth.id.to_string()))?;
        Ok(user.into())
    }

    pub async fn update_profile(
        &self,
        auth: &AuthUser,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, AppError> {
        request.validate()?;

        let mut user = self
            .state
            .users
            .find_by_id(auth.id)
            .await
            .ok_or_else(|| not_found_error("User", &auth.id.to_string()))?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(company_name) = request.company_name {
            user.company_name = Some(company_name);
        }
        if let Some(license_number) = request.license_number {
            user.license_number = Some(license_number);
        }

        let user = self
            .state
            .users
            .update(user)
            .await
            .ok_or_else(|| not_found_error("User", &auth.id.to_string()))?;
        Ok(user.into())
    }
}
