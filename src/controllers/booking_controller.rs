use uuid::Uuid;

use crate::dto::booking_dto::{BookingRequest, RecommendedVehicle, VehicleSearchRequest};
use crate::middleware::auth_middleware::AuthUser;
use crate::models::booking::Booking;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct BookingController {
    state: AppState,
}

impl BookingController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn recommend(&self, request: VehicleSearchRequest) -> Vec<RecommendedVehicle> {
        self.state.booking_service.recommendations(&request).await
    }

    pub async fn create(
        &self,
        auth: &AuthUser,
        request: BookingRequest,
    ) -> Result<Booking, AppError> {
        self.state.booking_service.create(auth.id, request).await
    }

    pub async fn my_bookings(&self, auth: &AuthUser) -> Vec<Booking> {
        self.state.booking_service.my_bookings(auth.id).await
    }

    pub async fn cancel(&self, auth: &AuthUser, booking_id: Uuid) -> Result<Booking, AppError> {
        self.state.booking_service.cancel(auth.id, booking_id).await
    }

    pub async fn complete(&self, auth: &AuthUser, booking_id: Uuid) -> Result<Booking, AppError> {
        self.state.booking_service.complete(auth.id, booking_id).await
    }
}
