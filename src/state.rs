//! Shared application state.
//!
//! Repositories and services are cheap to clone (everything shareable
//! sits behind an `Arc`), so the whole state is cloned per request.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::alert_repository::AlertRepository;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::auth_service::AuthService;
use crate::services::booking_service::BookingService;
use crate::services::dashboard_service::DashboardService;
use crate::services::geocoding_service::{NominatimClient, ReverseGeocoder};
use crate::services::journey_service::JourneyService;
use crate::services::maintenance_service::MaintenanceService;
use crate::services::routing_service::{OsrmClient, RoutingProvider, RoutingService};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub users: UserRepository,
    pub vehicles: VehicleRepository,
    pub bookings: BookingRepository,
    pub alerts: AlertRepository,
    pub auth: AuthService,
    pub booking_service: BookingService,
    pub journey: JourneyService,
    pub dashboard: DashboardService,
    pub maintenance: MaintenanceService,
}

impl AppState {
    /// State wired against the real OSRM and Nominatim endpoints.
    pub fn new(config: EnvironmentConfig) -> Self {
        let routing: Arc<dyn RoutingProvider> =
            Arc::new(OsrmClient::new(config.osrm_base_url.clone()));
        let geocoder: Arc<dyn ReverseGeocoder> =
            Arc::new(NominatimClient::new(config.nominatim_base_url.clone()));
        Self::with_providers(config, routing, geocoder)
    }

    /// State with injectable external clients, used by tests.
    pub fn with_providers(
        config: EnvironmentConfig,
        routing: Arc<dyn RoutingProvider>,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        let users = UserRepository::new();
        let vehicles = VehicleRepository::new();
        let bookings = BookingRepository::new();
        let alerts = AlertRepository::new();

        let auth = AuthService::new(users.clone(), JwtConfig::from(&config));
        let booking_service = BookingService::new(vehicles.clone(), bookings.clone());
        let journey = JourneyService::new(
            RoutingService::new(routing),
            geocoder,
            booking_service.clone(),
        );
        let dashboard = DashboardService::new(users.clone(), vehicles.clone(), bookings.clone());
        let maintenance = MaintenanceService::new(vehicles.clone());

        Self {
            config: Arc::new(config),
            users,
            vehicles,
            bookings,
            alerts,
            auth,
            booking_service,
            journey,
            dashboard,
            maintenance,
        }
    }
}
