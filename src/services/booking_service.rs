//! Booking lifecycle and vehicle recommendations.
//!
//! Recommendations use a simple health heuristic (battery up, distance
//! since service down) over idle vehicles matching the search filters.
//! Prices are demonstration-only: base fare plus a fixed step per list
//! position — not a fare model.

use chrono::Utc;
use uuid::Uuid;

use crate::dto::booking_dto::{BookingRequest, RecommendedVehicle, VehicleSearchRequest};
use crate::models::booking::{Booking, BookingStatus};
use crate::models::vehicle::{GeoPoint, Vehicle, VehicleStatus};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};

const MAX_RECOMMENDATIONS: usize = 5;
const BASE_FARE: f64 = 250.0;
const FARE_STEP: f64 = 50.0;

#[derive(Clone)]
pub struct BookingService {
    vehicles: VehicleRepository,
    bookings: BookingRepository,
}

impl BookingService {
    pub fn new(vehicles: VehicleRepository, bookings: BookingRepository) -> Self {
        Self { vehicles, bookings }
    }

    /// Top idle vehicles for a search, best health first, priced by
    /// list position.
    pub async fn recommendations(
        &self,
        request: &VehicleSearchRequest,
    ) -> Vec<RecommendedVehicle> {
        let mut candidates: Vec<Vehicle> = self
            .vehicles
            .all()
            .await
            .into_iter()
            .filter(|v| v.status == VehicleStatus::Idle)
            .filter(|v| matches_criteria(v, request))
            .collect();

        candidates.sort_by(|a, b| {
            health_score(b)
                .partial_cmp(&health_score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(MAX_RECOMMENDATIONS);

        candidates
            .into_iter()
            .enumerate()
            .map(|(index, vehicle)| RecommendedVehicle {
                vehicle,
                price: BASE_FARE + index as f64 * FARE_STEP,
            })
            .collect()
    }

    /// Create a booking and reserve the vehicle. The vehicle must still
    /// be idle; racing bookings for the same vehicle lose with 409.
    pub async fn create(&self, user_id: Uuid, request: BookingRequest) -> Result<Booking, AppError> {
        let mut vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await
            .ok_or_else(|| not_found_error("Vehicle", &request.vehicle_id.to_string()))?;

        if vehicle.status != VehicleStatus::Idle {
            return Err(AppError::Conflict("Vehicle is not available".to_string()));
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id,
            vehicle_id: vehicle.id,
            start_location: request.start_location,
            start_lat: request.start_lat,
            start_lng: request.start_lng,
            drop_location: request.drop_location,
            drop_lat: request.drop_lat,
            drop_lng: request.drop_lng,
            start_time: request.start_time.unwrap_or_else(Utc::now),
            end_time: request.end_time,
            price: request.estimated_price.unwrap_or(BASE_FARE),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        };

        vehicle.status = VehicleStatus::InUse;
        self.vehicles.update(vehicle).await;

        Ok(self.bookings.insert(booking).await)
    }

    pub async fn my_bookings(&self, user_id: Uuid) -> Vec<Booking> {
        self.bookings.find_by_user(user_id).await
    }

    /// Cancel a live booking; the vehicle goes back to idle.
    pub async fn cancel(&self, user_id: Uuid, booking_id: Uuid) -> Result<Booking, AppError> {
        let mut booking = self
            .bookings
            .find_by_id(booking_id)
            .await
            .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))?;

        if booking.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only cancel your own bookings".to_string(),
            ));
        }
        if !booking.is_cancellable() {
            return Err(AppError::BadRequest("Booking cannot be cancelled".to_string()));
        }

        booking.status = BookingStatus::Cancelled;
        let booking = self
            .bookings
            .update(booking)
            .await
            .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))?;

        self.release_vehicle(booking.vehicle_id, None).await;
        Ok(booking)
    }

    /// Complete a booking: the vehicle goes back to idle, repositioned
    /// at the drop-off point.
    pub async fn complete(&self, user_id: Uuid, booking_id: Uuid) -> Result<Booking, AppError> {
        let mut booking = self
            .bookings
            .find_by_id(booking_id)
            .await
            .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))?;

        if booking.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only complete your own bookings".to_string(),
            ));
        }

        booking.status = BookingStatus::Completed;
        booking.end_time = Some(Utc::now());
        let booking = self
            .bookings
            .update(booking)
            .await
            .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))?;

        let drop_point = match (booking.drop_lat, booking.drop_lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };
        self.release_vehicle(booking.vehicle_id, drop_point).await;
        Ok(booking)
    }

    /// Vehicles currently reserved by a user's active bookings.
    pub async fn booked_vehicles(&self, user_id: Uuid) -> Vec<Vehicle> {
        let bookings = self.bookings.find_by_user(user_id).await;
        let mut vehicle_ids: Vec<Uuid> = bookings
            .iter()
            .filter(|b| b.is_active())
            .map(|b| b.vehicle_id)
            .collect();
        vehicle_ids.dedup();
        self.vehicles.find_by_ids(&vehicle_ids).await
    }

    async fn release_vehicle(&self, vehicle_id: Uuid, position: Option<GeoPoint>) {
        if let Some(mut vehicle) = self.vehicles.find_by_id(vehicle_id).await {
            vehicle.status = VehicleStatus::Idle;
            vehicle.speed = 0.0;
            if let Some(point) = position {
                vehicle.location = point;
            }
            vehicle.last_update = Utc::now();
            self.vehicles.update(vehicle).await;
        }
    }
}

fn matches_criteria(vehicle: &Vehicle, request: &VehicleSearchRequest) -> bool {
    if let Some(wanted) = request.vehicle_type {
        if vehicle.vehicle_type != wanted {
            return false;
        }
    }
    if let Some(seats) = request.seats {
        if vehicle.seats < seats {
            return false;
        }
    }
    if let Some(is_ev) = request.is_ev {
        if is_ev != vehicle.is_electric() {
            return false;
        }
    }
    true
}

/// Recommendation heuristic: high battery is better, high mileage since
/// the last service is worse.
fn health_score(vehicle: &Vehicle) -> f64 {
    100.0 + vehicle.battery * 0.5 - (vehicle.distance_since_service_km / 1000.0) * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{FuelType, VehicleType};

    fn service() -> BookingService {
        BookingService::new(VehicleRepository::new(), BookingRepository::new())
    }

    fn vehicle(name: &str, vtype: VehicleType, fuel: FuelType, seats: i32) -> Vehicle {
        Vehicle::new(
            name.to_string(),
            vtype,
            fuel,
            seats,
            GeoPoint::new(22.7196, 75.8577),
        )
    }

    fn booking_request(vehicle_id: Uuid) -> BookingRequest {
        BookingRequest {
            vehicle_id,
            start_location: "Rajwada Palace".to_string(),
            start_lat: Some(22.7196),
            start_lng: Some(75.8577),
            drop_location: "Indore Airport".to_string(),
            drop_lat: Some(22.7279),
            drop_lng: Some(75.8011),
            start_time: None,
            end_time: None,
            estimated_price: Some(300.0),
        }
    }

    #[tokio::test]
    async fn recommendations_skip_busy_vehicles_and_price_by_index() {
        let svc = service();
        let idle = svc
            .vehicles
            .insert(vehicle("Honda City - Prime", VehicleType::Car, FuelType::Petrol, 5))
            .await;
        let mut busy = vehicle("Tesla Model 3 - Alpha", VehicleType::Car, FuelType::Electric, 5);
        busy.status = VehicleStatus::InUse;
        svc.vehicles.insert(busy).await;

        let recs = svc.recommendations(&VehicleSearchRequest::default()).await;
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].vehicle.id, idle.id);
        assert_eq!(recs[0].price, 250.0);
    }

    #[tokio::test]
    async fn recommendations_filter_by_type_seats_and_ev() {
        let svc = service();
        svc.vehicles
            .insert(vehicle("Ola S1 Pro", VehicleType::Scooter, FuelType::Electric, 2))
            .await;
        svc.vehicles
            .insert(vehicle("Tata Ace - Logistics", VehicleType::Truck, FuelType::Diesel, 2))
            .await;
        let ev_car = svc
            .vehicles
            .insert(vehicle("Tesla Model 3 - Alpha", VehicleType::Car, FuelType::Electric, 5))
            .await;

        let request = VehicleSearchRequest {
            vehicle_type: Some(VehicleType::Car),
            seats: Some(4),
            is_ev: Some(true),
            ..VehicleSearchRequest::default()
        };
        let recs = svc.recommendations(&request).await;
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].vehicle.id, ev_car.id);

        // Explicit non-EV search excludes electric vehicles.
        let request = VehicleSearchRequest {
            is_ev: Some(false),
            ..VehicleSearchRequest::default()
        };
        let recs = svc.recommendations(&request).await;
        assert!(recs.iter().all(|r| !r.vehicle.is_electric()));
    }

    #[tokio::test]
    async fn recommendations_rank_healthier_vehicles_first() {
        let svc = service();
        let mut worn = vehicle("Worn Car", VehicleType::Car, FuelType::Petrol, 5);
        worn.battery = 40.0;
        worn.distance_since_service_km = 900.0;
        let mut fresh = vehicle("Fresh Car", VehicleType::Car, FuelType::Petrol, 5);
        fresh.battery = 95.0;
        fresh.distance_since_service_km = 50.0;
        let fresh_id = fresh.id;
        svc.vehicles.insert(worn).await;
        svc.vehicles.insert(fresh).await;

        let recs = svc.recommendations(&VehicleSearchRequest::default()).await;
        assert_eq!(recs[0].vehicle.id, fresh_id);
    }

    #[tokio::test]
    async fn booking_reserves_the_vehicle() {
        let svc = service();
        let v = svc
            .vehicles
            .insert(vehicle("Honda City - Prime", VehicleType::Car, FuelType::Petrol, 5))
            .await;
        let user = Uuid::new_v4();

        let booking = svc.create(user, booking_request(v.id)).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.price, 300.0);

        let reserved = svc.vehicles.find_by_id(v.id).await.unwrap();
        assert_eq!(reserved.status, VehicleStatus::InUse);

        // A second booking for the same vehicle is rejected.
        let err = svc.create(Uuid::new_v4(), booking_request(v.id)).await;
        assert!(matches!(err, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn cancel_restores_the_vehicle_and_guards_ownership() {
        let svc = service();
        let v = svc
            .vehicles
            .insert(vehicle("Honda City - Prime", VehicleType::Car, FuelType::Petrol, 5))
            .await;
        let user = Uuid::new_v4();
        let booking = svc.create(user, booking_request(v.id)).await.unwrap();

        let stranger = svc.cancel(Uuid::new_v4(), booking.id).await;
        assert!(matches!(stranger, Err(AppError::Forbidden(_))));

        let cancelled = svc.cancel(user, booking.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        let released = svc.vehicles.find_by_id(v.id).await.unwrap();
        assert_eq!(released.status, VehicleStatus::Idle);

        // Cancelled bookings cannot be cancelled again.
        assert!(matches!(
            svc.cancel(user, booking.id).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn complete_moves_the_vehicle_to_the_drop_point() {
        let svc = service();
        let v = svc
            .vehicles
            .insert(vehicle("Honda City - Prime", VehicleType::Car, FuelType::Petrol, 5))
            .await;
        let user = Uuid::new_v4();
        let booking = svc.create(user, booking_request(v.id)).await.unwrap();

        let done = svc.complete(user, booking.id).await.unwrap();
        assert_eq!(done.status, BookingStatus::Completed);
        assert!(done.end_time.is_some());

        let parked = svc.vehicles.find_by_id(v.id).await.unwrap();
        assert_eq!(parked.status, VehicleStatus::Idle);
        assert_eq!(parked.location, GeoPoint::new(22.7279, 75.8011));
    }
}
