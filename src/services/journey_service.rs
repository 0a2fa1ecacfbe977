//! Guided journey workflow.
//!
//! Each user gets a session that walks forward through four stages:
//! location input, route choice, route analytics, vehicle choice. The
//! only way back is a reset. Route analytics are derived entirely from
//! the cached route — requesting them never hits the network.
//!
//! Route planning is the one network-bound step, so sessions carry a
//! generation counter: a plan snapshots the generation before calling
//! out and only commits its result if the session has not been reset
//! or re-pointed in the meantime. Stale results are discarded with a
//! conflict instead of clobbering newer state.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::dto::booking_dto::{BookingRequest, RecommendedVehicle, VehicleSearchRequest};
use crate::dto::journey_dto::{CongestionSegment, JourneyLocationsRequest, RouteAnalyticsResponse};
use crate::models::booking::Booking;
use crate::models::route::RouteOption;
use crate::models::vehicle::GeoPoint;
use crate::services::booking_service::BookingService;
use crate::services::geocoding_service::{coordinate_label, ReverseGeocoder};
use crate::services::routing_service::RoutingService;
use crate::utils::errors::AppError;

/// Extra minutes shown on the traffic route, and the delay attributed
/// to its congested stretch.
const TRAFFIC_DELAY_MIN: i64 = 2;
const CONGESTION_START_FRACTION: f64 = 0.4;
const CONGESTION_END_FRACTION: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JourneyStage {
    Input,
    Routes,
    Analytics,
    Vehicles,
}

/// Per-user workflow state. Serialized as the session snapshot the
/// planner page rehydrates from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneySession {
    pub stage: JourneyStage,
    pub search: JourneyLocationsRequest,
    pub routes: Vec<RouteOption>,
    pub selected_route_id: Option<String>,
    pub recommendations: Vec<RecommendedVehicle>,
    /// Bumped on every reset or location change; a route plan only
    /// commits if the generation it started from is still current.
    #[serde(skip)]
    generation: u64,
}

impl Default for JourneySession {
    fn default() -> Self {
        Self {
            stage: JourneyStage::Input,
            search: JourneyLocationsRequest::default(),
            routes: Vec::new(),
            selected_route_id: None,
            recommendations: Vec::new(),
            generation: 0,
        }
    }
}

impl JourneySession {
    fn selected_route(&self) -> Option<&RouteOption> {
        let id = self.selected_route_id.as_deref()?;
        self.routes.iter().find(|r| r.id == id)
    }

    /// Restart at the input stage, keeping (or replacing) the search.
    fn restart(&mut self, search: JourneyLocationsRequest) {
        self.stage = JourneyStage::Input;
        self.search = search;
        self.routes.clear();
        self.selected_route_id = None;
        self.recommendations.clear();
        self.generation += 1;
    }
}

#[derive(Clone)]
pub struct JourneyService {
    sessions: Arc<RwLock<HashMap<Uuid, JourneySession>>>,
    routing: RoutingService,
    geocoder: Arc<dyn ReverseGeocoder>,
    bookings: BookingService,
}

impl JourneyService {
    pub fn new(
        routing: RoutingService,
        geocoder: Arc<dyn ReverseGeocoder>,
        bookings: BookingService,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            routing,
            geocoder,
            bookings,
        }
    }

    /// Current session snapshot, a fresh one if the user has none.
    pub async fn session(&self, user_id: Uuid) -> JourneySession {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Store the journey locations and restart the workflow at the
    /// input stage. Changing locations always invalidates everything
    /// derived from the previous ones.
    pub async fn set_locations(
        &self,
        user_id: Uuid,
        request: JourneyLocationsRequest,
    ) -> JourneySession {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id).or_default();
        session.restart(request);
        session.clone()
    }

    /// Resolve map-click coordinates into a display address. A failing
    /// geocoder degrades to the bare coordinate string so the picker
    /// keeps working offline.
    pub async fn resolve_location(&self, lat: f64, lng: f64) -> String {
        match self.geocoder.reverse(lat, lng).await {
            Ok(address) => address,
            Err(e) => {
                debug!("Reverse geocoding failed, falling back to coordinates: {}", e);
                coordinate_label(lat, lng)
            }
        }
    }

    /// Plan routes for the stored locations and advance to the route
    /// stage. The network call runs without holding the session lock;
    /// the result is committed only if the session was not reset in
    /// the meantime.
    pub async fn plan_routes(&self, user_id: Uuid) -> Result<JourneySession, AppError> {
        let (start, end, generation) = {
            let mut sessions = self.sessions.write().await;
            let session = sessions.entry(user_id).or_default();
            let search = &session.search;
            let start = match (search.start_lat, search.start_lng) {
                (Some(lat), Some(lng)) => GeoPoint::new(lat, lng),
                _ => {
                    return Err(AppError::BadRequest(
                        "Start coordinates are required".to_string(),
                    ))
                }
            };
            let end = match (search.drop_lat, search.drop_lng) {
                (Some(lat), Some(lng)) => GeoPoint::new(lat, lng),
                _ => {
                    return Err(AppError::BadRequest(
                        "Drop coordinates are required".to_string(),
                    ))
                }
            };
            (start, end, session.generation)
        };

        let routes = self.routing.plan_routes(start, end).await?;

        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id).or_default();
        if session.generation != generation {
            return Err(AppError::Conflict(
                "Journey was restarted while routes were being planned".to_string(),
            ));
        }

        info!("🧭 Planned {} route option(s) for user {}", routes.len(), user_id);
        session.routes = routes;
        session.selected_route_id = None;
        session.recommendations.clear();
        session.stage = JourneyStage::Routes;
        Ok(session.clone())
    }

    /// Pick one of the planned routes and advance to analytics.
    pub async fn select_route(
        &self,
        user_id: Uuid,
        route_id: &str,
    ) -> Result<JourneySession, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id).or_default();

        if session.stage != JourneyStage::Routes && session.stage != JourneyStage::Analytics {
            return Err(AppError::Conflict(
                "No routes to select from at this stage".to_string(),
            ));
        }
        if !session.routes.iter().any(|r| r.id == route_id) {
            return Err(AppError::NotFound(format!(
                "Route '{}' is not among the planned options",
                route_id
            )));
        }

        session.selected_route_id = Some(route_id.to_string());
        session.stage = JourneyStage::Analytics;
        Ok(session.clone())
    }

    /// Analytics for the selected route, derived from cached data only.
    pub async fn route_analytics(&self, user_id: Uuid) -> Result<RouteAnalyticsResponse, AppError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(&user_id)
            .ok_or_else(|| AppError::Conflict("No route selected yet".to_string()))?;
        let route = session
            .selected_route()
            .ok_or_else(|| AppError::Conflict("No route selected yet".to_string()))?;
        Ok(derive_analytics(route))
    }

    /// Advance to the vehicle stage: fetch recommendations matching the
    /// stored search, then commit. The vehicle fetch runs outside the
    /// session lock, guarded by the generation counter like planning.
    pub async fn proceed_to_vehicles(&self, user_id: Uuid) -> Result<JourneySession, AppError> {
        let (criteria, generation) = {
            let sessions = self.sessions.read().await;
            let session = sessions
                .get(&user_id)
                .ok_or_else(|| AppError::Conflict("No route selected yet".to_string()))?;
            if session.selected_route().is_none() {
                return Err(AppError::Conflict("No route selected yet".to_string()));
            }
            (search_criteria(&session.search), session.generation)
        };

        let recommendations = self.bookings.recommendations(&criteria).await;

        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id).or_default();
        if session.generation != generation {
            return Err(AppError::Conflict(
                "Journey was restarted while vehicles were being fetched".to_string(),
            ));
        }

        session.recommendations = recommendations;
        session.stage = JourneyStage::Vehicles;
        Ok(session.clone())
    }

    /// Book one of the recommended vehicles and close out the journey.
    /// The price is taken from the recommendation, not from the client.
    pub async fn book(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<Booking, AppError> {
        let request = {
            let sessions = self.sessions.read().await;
            let session = sessions
                .get(&user_id)
                .ok_or_else(|| AppError::Conflict("Journey is not at the vehicle stage".to_string()))?;
            if session.stage != JourneyStage::Vehicles {
                return Err(AppError::Conflict(
                    "Journey is not at the vehicle stage".to_string(),
                ));
            }
            let recommendation = session
                .recommendations
                .iter()
                .find(|r| r.vehicle.id == vehicle_id)
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Vehicle '{}' is not among the recommendations",
                        vehicle_id
                    ))
                })?;

            let search = &session.search;
            BookingRequest {
                vehicle_id,
                start_location: search.start_location.clone(),
                start_lat: search.start_lat,
                start_lng: search.start_lng,
                drop_location: search.drop_location.clone(),
                drop_lat: search.drop_lat,
                drop_lng: search.drop_lng,
                start_time: search.start_time,
                end_time: None,
                estimated_price: Some(recommendation.price),
            }
        };

        let booking = self.bookings.create(user_id, request).await?;
        self.reset(user_id).await;
        info!("✅ Journey completed with booking {}", booking.id);
        Ok(booking)
    }

    /// Drop everything and start over at the input stage.
    pub async fn reset(&self, user_id: Uuid) -> JourneySession {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id).or_default();
        session.restart(JourneyLocationsRequest::default());
        session.clone()
    }
}

fn search_criteria(search: &JourneyLocationsRequest) -> VehicleSearchRequest {
    VehicleSearchRequest {
        vehicle_type: search.vehicle_type,
        seats: search.seats,
        is_ev: search.is_ev,
        start_location: Some(search.start_location.clone()),
        drop_location: Some(search.drop_location.clone()),
        start_time: search.start_time,
    }
}

/// Display attributes for the selected route. The "traffic" option is
/// the only one rendered as congested: it gets a fixed extra delay and
/// a congestion stretch spanning 40%-50% of its polyline.
fn derive_analytics(route: &RouteOption) -> RouteAnalyticsResponse {
    let is_traffic = route.id == "traffic";
    let congestion = is_traffic.then(|| {
        let points = route.geometry.len();
        CongestionSegment {
            from_index: (points as f64 * CONGESTION_START_FRACTION) as usize,
            to_index: (points as f64 * CONGESTION_END_FRACTION) as usize,
            delay_min: TRAFFIC_DELAY_MIN,
        }
    });

    RouteAnalyticsResponse {
        route_id: route.id.clone(),
        label: route.label.clone(),
        color: route.color.clone(),
        live_eta_min: route.duration_min + if is_traffic { TRAFFIC_DELAY_MIN } else { 0 },
        distance_km: route.distance_km,
        energy: route.energy,
        traffic_status: if is_traffic {
            "Moderate Congestion".to_string()
        } else {
            "Smooth Flow".to_string()
        },
        peak_hour: "Off-peak".to_string(),
        road_blocks: "None".to_string(),
        congestion,
    }
}
