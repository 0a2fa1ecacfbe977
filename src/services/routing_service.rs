//! Driving-route computation against an OSRM-style routing service.
//!
//! The provider sits behind a trait so tests (and a self-hosted OSRM)
//! can be swapped in. `plan_routes` implements the alternative-route
//! policy: ask for alternatives, and when the service returns fewer
//! than three candidates, force detours through via-points offset
//! perpendicular to the straight start→end vector.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::route::{RouteOption, ROUTE_STYLES};
use crate::models::vehicle::GeoPoint;
use crate::utils::errors::AppError;

/// A raw route as returned by the routing provider.
#[derive(Debug, Clone)]
pub struct RawRoute {
    pub distance_m: f64,
    pub duration_s: f64,
    pub geometry: Vec<GeoPoint>,
}

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Compute driving routes through the given waypoints, in order.
    async fn route(
        &self,
        waypoints: &[GeoPoint],
        alternatives: bool,
    ) -> Result<Vec<RawRoute>, AppError>;
}

// ---------------------------------------------------------------------------
// OSRM HTTP client
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    // GeoJSON order: [longitude, latitude]
    coordinates: Vec<[f64; 2]>,
}

pub struct OsrmClient {
    base_url: String,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }
}

#[async_trait]
impl RoutingProvider for OsrmClient {
    async fn route(
        &self,
        waypoints: &[GeoPoint],
        alternatives: bool,
    ) -> Result<Vec<RawRoute>, AppError> {
        let coords = waypoints
            .iter()
            .map(|p| format!("{},{}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");

        let mut url = format!(
            "{}/route/v1/driving/{}?overview=full&geometries=geojson",
            self.base_url, coords
        );
        if alternatives {
            url.push_str("&alternatives=true");
        }

        debug!("🗺️ Routing request: {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "FleetDispatch/1.0")
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Routing request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Routing service returned {}: {}",
                status, body
            )));
        }

        let parsed: OsrmResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse routing response: {}", e)))?;

        Ok(parsed
            .routes
            .into_iter()
            .map(|r| RawRoute {
                distance_m: r.distance,
                duration_s: r.duration,
                geometry: r
                    .geometry
                    .coordinates
                    .into_iter()
                    .map(|c| GeoPoint::new(c[1], c[0]))
                    .collect(),
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Route planning
// ---------------------------------------------------------------------------

const MAX_ROUTE_OPTIONS: usize = 3;
const VIA_OFFSET_FACTOR: f64 = 0.3;

/// Via-points for forced detours: midpoint shifted perpendicular to the
/// start→end vector, one to each side. A degenerate start == end input
/// collapses both offsets to the midpoint itself — the planner then just
/// requests duplicate routes instead of failing.
pub fn detour_via_points(start: GeoPoint, end: GeoPoint) -> (GeoPoint, GeoPoint) {
    let d_lat = end.lat - start.lat;
    let d_lng = end.lng - start.lng;
    let mid_lat = (start.lat + end.lat) / 2.0;
    let mid_lng = (start.lng + end.lng) / 2.0;

    let via1 = GeoPoint::new(
        mid_lat - d_lng * VIA_OFFSET_FACTOR,
        mid_lng + d_lat * VIA_OFFSET_FACTOR,
    );
    let via2 = GeoPoint::new(
        mid_lat + d_lng * VIA_OFFSET_FACTOR,
        mid_lng - d_lat * VIA_OFFSET_FACTOR,
    );
    (via1, via2)
}

#[derive(Clone)]
pub struct RoutingService {
    provider: std::sync::Arc<dyn RoutingProvider>,
}

impl RoutingService {
    pub fn new(provider: std::sync::Arc<dyn RoutingProvider>) -> Self {
        Self { provider }
    }

    /// Fetch up to three route candidates between two points.
    ///
    /// A failed primary request aborts the whole operation; failed
    /// detour requests are logged and skipped. Labels and colors are
    /// assigned strictly by result index.
    pub async fn plan_routes(
        &self,
        start: GeoPoint,
        end: GeoPoint,
    ) -> Result<Vec<RouteOption>, AppError> {
        let mut fetched = self.provider.route(&[start, end], true).await?;

        if fetched.len() < MAX_ROUTE_OPTIONS {
            let (via1, via2) = detour_via_points(start, end);
            for via in [via1, via2] {
                match self.provider.route(&[start, via, end], false).await {
                    Ok(mut routes) => {
                        if !routes.is_empty() {
                            fetched.push(routes.remove(0));
                        }
                    }
                    Err(e) => warn!("Detour route request failed: {}", e),
                }
            }
        }

        fetched.truncate(MAX_ROUTE_OPTIONS);
        if fetched.is_empty() {
            return Err(AppError::NotFound("No routes found".to_string()));
        }

        Ok(fetched
            .into_iter()
            .enumerate()
            .map(|(i, raw)| decorate_route(i, raw))
            .collect())
    }
}

fn decorate_route(index: usize, raw: RawRoute) -> RouteOption {
    let (id, label, color, energy) = ROUTE_STYLES[index.min(ROUTE_STYLES.len() - 1)];
    RouteOption {
        id: id.to_string(),
        label: label.to_string(),
        color: color.to_string(),
        distance_km: (raw.distance_m / 1000.0 * 10.0).round() / 10.0,
        duration_min: (raw.duration_s / 60.0).round() as i64,
        energy,
        geometry: raw.geometry,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::route::EnergyUse;
    use std::sync::{Arc, Mutex};

    /// Scripted provider: returns the queued responses in order and
    /// records every request's waypoints.
    pub(crate) struct MockProvider {
        pub responses: Mutex<Vec<Result<Vec<RawRoute>, AppError>>>,
        pub requests: Mutex<Vec<Vec<GeoPoint>>>,
    }

    impl MockProvider {
        pub fn new(responses: Vec<Result<Vec<RawRoute>, AppError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RoutingProvider for MockProvider {
        async fn route(
            &self,
            waypoints: &[GeoPoint],
            _alternatives: bool,
        ) -> Result<Vec<RawRoute>, AppError> {
            self.requests.lock().unwrap().push(waypoints.to_vec());
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Ok(Vec::new())
            } else {
                responses.remove(0)
            }
        }
    }

    pub(crate) fn raw(distance_m: f64, duration_s: f64) -> RawRoute {
        RawRoute {
            distance_m,
            duration_s,
            geometry: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)],
        }
    }

    fn start_end() -> (GeoPoint, GeoPoint) {
        (GeoPoint::new(22.7196, 75.8577), GeoPoint::new(22.6708, 75.9064))
    }

    #[tokio::test]
    async fn single_primary_route_triggers_exactly_two_detours() {
        let provider = Arc::new(MockProvider::new(vec![
            Ok(vec![raw(10_000.0, 900.0)]),
            Ok(vec![raw(12_000.0, 1100.0)]),
            Ok(vec![raw(14_000.0, 1300.0)]),
        ]));
        let service = RoutingService::new(provider.clone());
        let (start, end) = start_end();

        let routes = service.plan_routes(start, end).await.unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 3); // 1 primary + exactly 2 detours
        assert_eq!(requests[1].len(), 3); // detours go through a via-point
        assert_eq!(requests[2].len(), 3);
        assert_eq!(routes.len(), 3);
    }

    #[tokio::test]
    async fn three_primary_routes_skip_detours_entirely() {
        let provider = Arc::new(MockProvider::new(vec![Ok(vec![
            raw(10_000.0, 900.0),
            raw(11_000.0, 1000.0),
            raw(12_000.0, 1100.0),
        ])]));
        let service = RoutingService::new(provider.clone());
        let (start, end) = start_end();

        let routes = service.plan_routes(start, end).await.unwrap();

        assert_eq!(provider.requests.lock().unwrap().len(), 1);
        assert_eq!(routes.len(), 3);
    }

    #[tokio::test]
    async fn results_are_capped_at_three() {
        let provider = Arc::new(MockProvider::new(vec![Ok(vec![
            raw(1.0, 1.0),
            raw(2.0, 2.0),
            raw(3.0, 3.0),
            raw(4.0, 4.0),
        ])]));
        let service = RoutingService::new(provider);
        let (start, end) = start_end();

        let routes = service.plan_routes(start, end).await.unwrap();
        assert_eq!(routes.len(), 3);
    }

    #[tokio::test]
    async fn labels_and_colors_are_fixed_by_index() {
        // Deliberately feed the *slowest* route first: decoration must
        // not depend on actual distance/duration.
        let provider = Arc::new(MockProvider::new(vec![Ok(vec![
            raw(50_000.0, 7200.0),
            raw(10_000.0, 600.0),
            raw(20_000.0, 1200.0),
        ])]));
        let service = RoutingService::new(provider);
        let (start, end) = start_end();

        let routes = service.plan_routes(start, end).await.unwrap();

        assert_eq!(routes[0].id, "fastest");
        assert_eq!(routes[0].label, "Fastest Route");
        assert_eq!(routes[0].color, "#10b981");
        assert_eq!(routes[0].energy, EnergyUse::High);

        assert_eq!(routes[1].id, "traffic");
        assert_eq!(routes[1].label, "Alternative Route");
        assert_eq!(routes[1].color, "#f59e0b");
        assert_eq!(routes[1].energy, EnergyUse::Medium);

        assert_eq!(routes[2].id, "eco");
        assert_eq!(routes[2].label, "Scenic Route");
        assert_eq!(routes[2].color, "#3b82f6");
        assert_eq!(routes[2].energy, EnergyUse::Low);
    }

    #[tokio::test]
    async fn failed_detours_are_skipped_not_fatal() {
        let provider = Arc::new(MockProvider::new(vec![
            Ok(vec![raw(10_000.0, 900.0)]),
            Err(AppError::ExternalApi("detour 1 down".to_string())),
            Ok(vec![raw(14_000.0, 1300.0)]),
        ]));
        let service = RoutingService::new(provider.clone());
        let (start, end) = start_end();

        let routes = service.plan_routes(start, end).await.unwrap();

        assert_eq!(provider.requests.lock().unwrap().len(), 3);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].id, "traffic");
    }

    #[tokio::test]
    async fn primary_failure_aborts_planning() {
        let provider = Arc::new(MockProvider::new(vec![Err(AppError::ExternalApi(
            "routing down".to_string(),
        ))]));
        let service = RoutingService::new(provider.clone());
        let (start, end) = start_end();

        assert!(service.plan_routes(start, end).await.is_err());
        // No detour requests after a failed primary call.
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn degenerate_endpoints_collapse_via_points_to_origin() {
        let p = GeoPoint::new(0.0, 0.0);
        let (via1, via2) = detour_via_points(p, p);
        assert_eq!(via1, GeoPoint::new(0.0, 0.0));
        assert_eq!(via2, GeoPoint::new(0.0, 0.0));
    }

    #[tokio::test]
    async fn degenerate_endpoints_request_duplicate_routes_without_crashing() {
        let p = GeoPoint::new(0.0, 0.0);
        let provider = Arc::new(MockProvider::new(vec![
            Ok(vec![raw(0.0, 0.0)]),
            Ok(vec![raw(0.0, 0.0)]),
            Ok(vec![raw(0.0, 0.0)]),
        ]));
        let service = RoutingService::new(provider.clone());

        let routes = service.plan_routes(p, p).await.unwrap();
        assert_eq!(routes.len(), 3);

        let requests = provider.requests.lock().unwrap();
        // Both detour requests degrade to the same waypoint triple.
        assert_eq!(requests[1], requests[2]);
    }

    #[test]
    fn via_points_are_perpendicular_offsets() {
        let start = GeoPoint::new(0.0, 0.0);
        let end = GeoPoint::new(0.0, 1.0); // due east
        let (via1, via2) = detour_via_points(start, end);

        // Midpoint (0, 0.5) shifted +-0.3 along latitude.
        assert!((via1.lat - (-0.3)).abs() < 1e-12);
        assert!((via1.lng - 0.5).abs() < 1e-12);
        assert!((via2.lat - 0.3).abs() < 1e-12);
        assert!((via2.lng - 0.5).abs() < 1e-12);
    }
}
