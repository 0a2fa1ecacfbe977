//! Fleet inventory operations.
//!
//! Listing is role-scoped: admins and fleet managers see the whole
//! fleet, customers see the vehicles their active bookings reserve,
//! drivers see their assigned vehicle.

use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::middleware::auth_middleware::AuthUser;
use crate::models::user::Role;
use crate::models::vehicle::{FuelType, GeoPoint, Vehicle};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

/// Default parking spot for newly registered vehicles (New Delhi).
const DEPOT: GeoPoint = GeoPoint {
    lat: 28.6139,
    lng: 77.2090,
};

pub struct VehicleController {
    state: AppState,
}

impl VehicleController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, auth: &AuthUser) -> Vec<Vehicle> {
        match auth.role {
            Role::Admin | Role::FleetManager => self.state.vehicles.all().await,
            Role::Customer => self.state.booking_service.booked_vehicles(auth.id).await,
            Role::Driver => self
                .state
                .vehicles
                .find_by_driver(auth.id)
                .await
                .into_iter()
                .collect(),
        }
    }

    pub async fn create(
        &self,
        auth: &AuthUser,
        request: CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        self.require_manager(auth)?;
        request.validate()?;

        let mut vehicle = Vehicle::new(
            request.name,
            request.vehicle_type,
            request.fuel_type.unwrap_or(FuelType::Petrol),
            request.seats.unwrap_or(4),
            request.location.unwrap_or(DEPOT),
        );
        if let Some(status) = request.status {
            vehicle.status = status;
        }
        if let Some(battery) = request.battery {
            vehicle.battery = battery;
        }

        Ok(self.state.vehicles.insert(vehicle).await)
    }

    pub async fn get(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.state
            .vehicles
            .find_by_id(id)
            .await
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn update(
        &self,
        auth: &AuthUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        self.require_manager(auth)?;
        request.validate()?;

        let mut vehicle = self.get(id).await?;
        if let Some(name) = request.name {
            vehicle.name = name;
        }
        if let Some(vehicle_type) = request.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(fuel_type) = request.fuel_type {
            vehicle.fuel_type = fuel_type;
        }
        if let Some(seats) = request.seats {
            vehicle.seats = seats;
        }
        if let Some(status) = request.status {
            vehicle.status = status;
        }
        if let Some(battery) = request.battery {
            vehicle.battery = battery;
        }
        if let Some(speed) = request.speed {
            vehicle.speed = speed;
        }
        if let Some(location) = request.location {
            vehicle.location = location;
        }
        vehicle.last_update = chrono::Utc::now();

        self.state
            .vehicles
            .update(vehicle)
            .await
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn delete(&self, auth: &AuthUser, id: Uuid) -> Result<(), AppError> {
        self.require_manager(auth)?;
        if self.state.vehicles.delete(id).await {
            Ok(())
        } else {
            Err(not_found_error("Vehicle", &id.to_string()))
        }
    }

    /// The vehicle assigned to the calling driver.
    pub async fn my_vehicle(&self, auth: &AuthUser) -> Result<Vehicle, AppError> {
        self.state
            .vehicles
            .find_by_driver(auth.id)
            .await
            .ok_or_else(|| AppError::NotFound("No vehicle assigned".to_string()))
    }

    /// Assign a vehicle to a driver account.
    pub async fn assign_driver(
        &self,
        auth: &AuthUser,
        vehicle_id: Uuid,
        driver_id: Uuid,
    ) -> Result<Vehicle, AppError> {
        self.require_manager(auth)?;

        let driver = self
            .state
            .users
            .find_by_id(driver_id)
            .await
            .ok_or_else(|| not_found_error("User", &driver_id.to_string()))?;
        if driver.role != Role::Driver {
            return Err(AppError::BadRequest(
                "Vehicles can only be assigned to driver accounts".to_string(),
            ));
        }

        let mut vehicle = self.get(vehicle_id).await?;
        vehicle.driver_id = Some(driver_id);
        self.state
            .vehicles
            .update(vehicle)
            .await
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id.to_string()))
    }

    fn require_manager(&self, auth: &AuthUser) -> Result<(), AppError> {
        match auth.role {
            Role::Admin | Role::FleetManager => Ok(()),
            _ => Err(AppError::Forbidden(
                "Fleet management privileges required".to_string(),
            )),
        }
    }
}
