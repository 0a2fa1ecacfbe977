//! User model and roles

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Role of an account. Drives which dashboard and which slice of the
/// fleet a request may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    FleetManager,
    Driver,
    Customer,
}

impl Role {
    /// Parse the role string sent at registration. Missing/empty input
    /// defaults to CUSTOMER; unknown strings are rejected.
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Role::Customer),
            Some("ADMIN") => Ok(Role::Admin),
            Some("FLEET_MANAGER") => Ok(Role::FleetManager),
            Some("DRIVER") => Ok(Role::Driver),
            Some("CUSTOMER") => Ok(Role::Customer),
            Some(other) => Err(AppError::BadRequest(format!(
                "Invalid role provided: '{}'. Allowed values: ADMIN, FLEET_MANAGER, DRIVER, CUSTOMER",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    // Role specific fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>, // fleet managers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>, // drivers
}

impl User {
    pub fn new(id: Uuid, name: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            role,
            company_name: None,
            license_number: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_defaults_and_rejects() {
        assert_eq!(Role::parse(None).unwrap(), Role::Customer);
        assert_eq!(Role::parse(Some("")).unwrap(), Role::Customer);
        assert_eq!(Role::parse(Some("FLEET_MANAGER")).unwrap(), Role::FleetManager);
        assert!(Role::parse(Some("SUPERUSER")).is_err());
    }
}
