//! Role-gated dashboard metrics.
//!
//! Each metrics endpoint belongs to one dashboard; admins may look at
//! any of them.

use crate::dto::dashboard_dto::{
    AdminMetricsResponse, CustomerMetricsResponse, DriverMetricsResponse,
    FleetManagerMetricsResponse,
};
use crate::middleware::auth_middleware::AuthUser;
use crate::models::user::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct DashboardController {
    state: AppState,
}

impl DashboardController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn admin_metrics(&self, auth: &AuthUser) -> Result<AdminMetricsResponse, AppError> {
        require_role(auth, &[Role::Admin])?;
        Ok(self.state.dashboard.admin_metrics().await)
    }

    pub async fn fleet_manager_metrics(
        &self,
        auth: &AuthUser,
    ) -> Result<FleetManagerMetricsResponse, AppError> {
        require_role(auth, &[Role::FleetManager, Role::Admin])?;
        Ok(self.state.dashboard.fleet_manager_metrics().await)
    }

    pub async fn driver_metrics(&self, auth: &AuthUser) -> Result<DriverMetricsResponse, AppError> {
        require_role(auth, &[Role::Driver, Role::Admin])?;
        Ok(self.state.dashboard.driver_metrics(auth.id).await)
    }

    pub async fn customer_metrics(
        &self,
        auth: &AuthUser,
    ) -> Result<CustomerMetricsResponse, AppError> {
        Ok(self.state.dashboard.customer_metrics(auth.id).await)
    }
}

fn require_role(auth: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&auth.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "This dashboard is not available for your role".to_string(),
        ))
    }
}
