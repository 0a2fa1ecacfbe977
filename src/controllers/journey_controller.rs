use crate::dto::journey_dto::{
    JourneyBookRequest, JourneyLocationsRequest, ResolveLocationRequest, ResolveLocationResponse,
    RouteAnalyticsResponse,
};
use crate::middleware::auth_middleware::AuthUser;
use crate::models::booking::Booking;
use crate::services::journey_service::JourneySession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct JourneyController {
    state: AppState,
}

impl JourneyController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn session(&self, auth: &AuthUser) -> JourneySession {
        self.state.journey.session(auth.id).await
    }

    pub async fn set_locations(
        &self,
        auth: &AuthUser,
        request: JourneyLocationsRequest,
    ) -> JourneySession {
        self.state.journey.set_locations(auth.id, request).await
    }

    pub async fn resolve_location(
        &self,
        request: ResolveLocationRequest,
    ) -> ResolveLocationResponse {
        let address = self
            .state
            .journey
            .resolve_location(request.lat, request.lng)
            .await;
        ResolveLocationResponse { address }
    }

    pub async fn plan_routes(&self, auth: &AuthUser) -> Result<JourneySession, AppError> {
        self.state.journey.plan_routes(auth.id).await
    }

    pub async fn select_route(
        &self,
        auth: &AuthUser,
        route_id: &str,
    ) -> Result<JourneySession, AppError> {
        self.state.journey.select_route(auth.id, route_id).await
    }

    pub async fn analytics(&self, auth: &AuthUser) -> Result<RouteAnalyticsResponse, AppError> {
        self.state.journey.route_analytics(auth.id).await
    }

    pub async fn vehicles(&self, auth: &AuthUser) -> Result<JourneySession, AppError> {
        self.state.journey.proceed_to_vehicles(auth.id).await
    }

    pub async fn book(
        &self,
        auth: &AuthUser,
        request: JourneyBookRequest,
    ) -> Result<Booking, AppError> {
        self.state.journey.book(auth.id, request.vehicle_id).await
    }

    pub async fn reset(&self, auth: &AuthUser) -> JourneySession {
        self.state.journey.reset(auth.id).await
    }
}
