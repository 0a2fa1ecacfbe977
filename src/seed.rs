//! Demo data seeding.
//!
//! Populates the stores with a small fleet and one account per role so
//! a fresh instance is immediately usable. Runs only when the stores
//! are empty and `SEED_DEMO_DATA` is on.

use tracing::info;
use uuid::Uuid;

use crate::models::user::{Role, User};
use crate::models::vehicle::{FuelType, GeoPoint, Vehicle, VehicleStatus, VehicleType};
use crate::state::AppState;
use crate::utils::errors::AppError;

const DEMO_PASSWORD: &str = "password123";

pub async fn seed_demo_data(state: &AppState) -> Result<(), AppError> {
    if state.users.count().await > 0 || state.vehicles.count().await > 0 {
        info!("Stores already populated, skipping demo seed");
        return Ok(());
    }

    let password_hash = bcrypt::hash(DEMO_PASSWORD, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Hash(format!("Failed to hash demo password: {}", e)))?;

    let accounts = [
        ("Admin User", "admin@fleet.dev", Role::Admin),
        ("Meera Kapoor", "manager@fleet.dev", Role::FleetManager),
        ("Ravi Singh", "driver@fleet.dev", Role::Driver),
        ("Priya Sharma", "customer@fleet.dev", Role::Customer),
    ];

    let mut driver_id = None;
    for (name, email, role) in accounts {
        let mut user = User::new(
            Uuid::new_v4(),
            name.to_string(),
            email.to_string(),
            password_hash.clone(),
            role,
        );
        match role {
            Role::FleetManager => user.company_name = Some("NeuroFleet Logistics".to_string()),
            Role::Driver => user.license_number = Some("DL-0420110149646".to_string()),
            _ => {}
        }
        if role == Role::Driver {
            driver_id = Some(user.id);
        }
        state.users.insert(user).await;
    }

    let fleet = [
        (
            "Tesla Model 3 - Alpha",
            VehicleType::Car,
            FuelType::Electric,
            5,
            GeoPoint::new(28.6139, 77.2090),
        ),
        (
            "Tata Ace - Logistics",
            VehicleType::Truck,
            FuelType::Diesel,
            2,
            GeoPoint::new(28.5355, 77.3910),
        ),
        (
            "Honda City - Prime",
            VehicleType::Car,
            FuelType::Petrol,
            5,
            GeoPoint::new(28.7041, 77.1025),
        ),
        (
            "Ola S1 Pro",
            VehicleType::Scooter,
            FuelType::Electric,
            2,
            GeoPoint::new(28.4595, 77.0266),
        ),
    ];

    for (index, (name, vehicle_type, fuel_type, seats, location)) in fleet.into_iter().enumerate()
    {
        let mut vehicle = Vehicle::new(
            name.to_string(),
            vehicle_type,
            fuel_type,
            seats,
            location,
        );
        // One vehicle starts mid-trip so the simulator has something to
        // move, assigned to the demo driver.
        if index == 1 {
            vehicle.status = VehicleStatus::InUse;
            vehicle.speed = 42.0;
            vehicle.battery = 78.0;
            vehicle.driver_id = driver_id;
        }
        state.vehicles.insert(vehicle).await;
    }

    info!(
        "🌱 Seeded {} demo accounts and {} vehicles",
        state.users.count().await,
        state.vehicles.count().await
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::EnvironmentConfig;

    #[tokio::test]
    async fn seeding_twice_does_not_duplicate() {
        let state = AppState::new(EnvironmentConfig {
            jwt_secret: "test".to_string(),
            ..EnvironmentConfig::default()
        });

        seed_demo_data(&state).await.unwrap();
        let users = state.users.count().await;
        let vehicles = state.vehicles.count().await;
        assert_eq!(users, 4);
        assert_eq!(vehicles, 4);

        seed_demo_data(&state).await.unwrap();
        assert_eq!(state.users.count().await, users);
        assert_eq!(state.vehicles.count().await, vehicles);
    }
}
