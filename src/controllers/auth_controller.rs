use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct AuthController {
    state: AppState,
}

impl AuthController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        self.state.auth.register(request).await
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        self.state.auth.login(request).await
    }
}
