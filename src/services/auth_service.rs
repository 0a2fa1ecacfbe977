//! Registration and login.
//!
//! Passwords are hashed with bcrypt; hashing and verification run on
//! the blocking pool so they never stall the async executor.

use tokio::task;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::user::{Role, User};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(users: UserRepository, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;
        let role = Role::parse(request.role.as_deref())?;

        if self.users.find_by_email(&request.email).await.is_some() {
            return Err(conflict_error("User", "email", &request.email));
        }

        let password_hash = hash_password(request.password).await?;

        let mut user = User::new(
            Uuid::new_v4(),
            request.name,
            request.email,
            password_hash,
            role,
        );
        user.company_name = request.company_name;
        user.license_number = request.license_number;

        let user = self.users.insert(user).await;
        info!("👤 Registered {} account for {}", role_label(user.role), user.email);

        self.respond_with_token(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        // Same error for unknown email and wrong password.
        let user = self
            .users
            .find_by_email(&request.email)
            .await
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let hash = user.password_hash.clone();
        let valid = task::spawn_blocking(move || bcrypt::verify(&request.password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Hash task failed: {}", e)))?
            .map_err(|e| AppError::Hash(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        info!("🔑 Login for {}", user.email);
        self.respond_with_token(user)
    }

    fn respond_with_token(&self, user: User) -> Result<AuthResponse, AppError> {
        let token = generate_token(&user, &self.jwt)?;
        Ok(AuthResponse {
            token,
            name: user.name,
            email: user.email,
            role: user.role,
        })
    }
}

async fn hash_password(password: String) -> Result<String, AppError> {
    task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Hash task failed: {}", e)))?
        .map_err(|e| AppError::Hash(format!("Password hashing failed: {}", e)))
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::FleetManager => "fleet manager",
        Role::Driver => "driver",
        Role::Customer => "customer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::verify_token;

    fn service() -> AuthService {
        AuthService::new(
            UserRepository::new(),
            JwtConfig {
                secret: "test-secret".to_string(),
                expiration: 3600,
            },
        )
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Priya Sharma".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            role: None,
            company_name: None,
            license_number: None,
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let svc = service();

        let registered = svc.register(register_request("priya@example.com")).await.unwrap();
        assert_eq!(registered.role, Role::Customer);
        let claims = verify_token(
            &registered.token,
            &JwtConfig {
                secret: "test-secret".to_string(),
                expiration: 3600,
            },
        )
        .unwrap();
        assert_eq!(claims.email, "priya@example.com");

        let logged_in = svc
            .login(LoginRequest {
                email: "priya@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.name, "Priya Sharma");
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let svc = service();
        svc.register(register_request("dup@example.com")).await.unwrap();

        let second = svc.register(register_request("dup@example.com")).await;
        assert!(matches!(second, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let svc = service();
        svc.register(register_request("user@example.com")).await.unwrap();

        let wrong_password = svc
            .login(LoginRequest {
                email: "user@example.com".to_string(),
                password: "not-it".to_string(),
            })
            .await;
        let unknown_email = svc
            .login(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await;

        for result in [wrong_password, unknown_email] {
            match result {
                Err(AppError::Unauthorized(msg)) => {
                    assert_eq!(msg, "Invalid email or password")
                }
                other => panic!("expected unauthorized, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[tokio::test]
    async fn invalid_role_string_is_rejected() {
        let svc = service();
        let mut request = register_request("role@example.com");
        request.role = Some("SUPERUSER".to_string());
        assert!(matches!(
            svc.register(request).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
