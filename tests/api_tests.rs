//! End-to-end API tests: the full router with mocked external clients,
//! driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fleet_dispatch::build_router;
use fleet_dispatch::config::environment::EnvironmentConfig;
use fleet_dispatch::models::vehicle::GeoPoint;
use fleet_dispatch::services::geocoding_service::ReverseGeocoder;
use fleet_dispatch::services::routing_service::{RawRoute, RoutingProvider};
use fleet_dispatch::state::AppState;
use fleet_dispatch::utils::errors::AppError;

/// Always returns three straight-line routes.
struct StubRouting;

#[async_trait]
impl RoutingProvider for StubRouting {
    async fn route(
        &self,
        waypoints: &[GeoPoint],
        _alternatives: bool,
    ) -> Result<Vec<RawRoute>, AppError> {
        let geometry: Vec<GeoPoint> = (0..10)
            .map(|i| {
                let t = i as f64 / 9.0;
                let first = waypoints[0];
                let last = waypoints[waypoints.len() - 1];
                GeoPoint::new(
                    first.lat + (last.lat - first.lat) * t,
                    first.lng + (last.lng - first.lng) * t,
                )
            })
            .collect();
        Ok(vec![
            RawRoute {
                distance_m: 12_000.0,
                duration_s: 900.0,
                geometry: geometry.clone(),
            },
            RawRoute {
                distance_m: 13_500.0,
                duration_s: 1_080.0,
                geometry: geometry.clone(),
            },
            RawRoute {
                distance_m: 15_000.0,
                duration_s: 1_320.0,
                geometry,
            },
        ])
    }
}

struct StubGeocoder;

#[async_trait]
impl ReverseGeocoder for StubGeocoder {
    async fn reverse(&self, _lat: f64, _lng: f64) -> Result<String, AppError> {
        Ok("MG Road, Indore, Madhya Pradesh, India".to_string())
    }
}

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "development".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        seed_demo_data: false,
        ..EnvironmentConfig::default()
    }
}

fn test_app() -> (Router, AppState) {
    let state = AppState::with_providers(test_config(), Arc::new(StubRouting), Arc::new(StubGeocoder));
    (build_router(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn register(app: &Router, name: &str, email: &str, role: Option<&str>) -> String {
    let mut body = json!({
        "name": name,
        "email": email,
        "password": "password123",
    });
    if let Some(role) = role {
        body["role"] = json!(role);
    }
    let (status, body) = send(app, post_json("/api/auth/register", None, body)).await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let (app, _) = test_app();
    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_reject_missing_and_bogus_tokens() {
    let (app, _) = test_app();

    let (status, _) = send(&app, get("/api/vehicles", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get("/api/vehicles", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_me_round_trip() {
    let (app, _) = test_app();
    register(&app, "Priya Sharma", "priya@example.com", None).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/login",
            None,
            json!({ "email": "priya@example.com", "password": "password123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "CUSTOMER");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, get("/api/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "priya@example.com");
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let (app, _) = test_app();
    register(&app, "First", "dup@example.com", None).await;

    let (status, _) = send(
        &app,
        post_json(
            "/api/auth/register",
            None,
            json!({ "name": "Second", "email": "dup@example.com", "password": "password123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn vehicle_crud_requires_manager_role() {
    let (app, _) = test_app();
    let manager = register(&app, "Meera", "manager@example.com", Some("FLEET_MANAGER")).await;
    let customer = register(&app, "Priya", "customer@example.com", None).await;

    let create = json!({
        "name": "Honda City - Prime",
        "type": "Car",
        "fuelType": "Petrol",
        "seats": 5
    });

    let (status, _) = send(&app, post_json("/api/vehicles", Some(&customer), create.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, post_json("/api/vehicles", Some(&manager), create)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Idle");
    assert_eq!(body["battery"], 100.0);
    // New vehicles park at the default depot.
    assert_eq!(body["location"]["lat"], 28.6139);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, get(&format!("/api/vehicles/{}", id), Some(&manager))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Honda City - Prime");

    // Customers with no bookings see an empty fleet.
    let (status, body) = send(&app, get("/api/vehicles", Some(&customer))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    // Managers see everything.
    let (_, body) = send(&app, get("/api/vehicles", Some(&manager))).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn booking_flow_reserves_and_releases_a_vehicle() {
    let (app, _) = test_app();
    let manager = register(&app, "Meera", "manager2@example.com", Some("FLEET_MANAGER")).await;
    let customer = register(&app, "Priya", "customer2@example.com", None).await;

    let (_, vehicle) = send(
        &app,
        post_json(
            "/api/vehicles",
            Some(&manager),
            json!({ "name": "Tesla Model 3 - Alpha", "type": "Car", "fuelType": "Electric", "seats": 5 }),
        ),
    )
    .await;
    let vehicle_id = vehicle["id"].as_str().unwrap().to_string();

    let (status, recs) = send(
        &app,
        post_json("/api/bookings/recommend", Some(&customer), json!({ "isEv": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let recs = recs.as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["price"], 250.0);

    let (status, booking) = send(
        &app,
        post_json(
            "/api/bookings",
            Some(&customer),
            json!({
                "vehicleId": vehicle_id,
                "startLocation": "Rajwada Palace",
                "dropLocation": "Indore Airport",
                "estimatedPrice": 250.0
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "booking failed: {}", booking);
    assert_eq!(booking["status"], "CONFIRMED");
    let booking_id = booking["id"].as_str().unwrap().to_string();

    // The vehicle is now reserved; a second booking conflicts.
    let (status, _) = send(
        &app,
        post_json(
            "/api/bookings",
            Some(&customer),
            json!({
                "vehicleId": vehicle_id,
                "startLocation": "A",
                "dropLocation": "B"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, cancelled) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/bookings/{}/cancel", booking_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", customer))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "CANCELLED");

    let (_, vehicle) = send(&app, get(&format!("/api/vehicles/{}", vehicle_id), Some(&manager))).await;
    assert_eq!(vehicle["status"], "Idle");
}

#[tokio::test]
async fn journey_flow_end_to_end() {
    let (app, _) = test_app();
    let manager = register(&app, "Meera", "manager3@example.com", Some("FLEET_MANAGER")).await;
    let customer = register(&app, "Priya", "customer3@example.com", None).await;

    send(
        &app,
        post_json(
            "/api/vehicles",
            Some(&manager),
            json!({ "name": "Honda City - Prime", "type": "Car", "fuelType": "Petrol", "seats": 5 }),
        ),
    )
    .await;

    // Fresh session starts at INPUT.
    let (status, session) = send(&app, get("/api/journey", Some(&customer))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["stage"], "INPUT");

    // Map click resolves through the geocoder.
    let (status, resolved) = send(
        &app,
        post_json(
            "/api/journey/resolve",
            Some(&customer),
            json!({ "lat": 22.7196, "lng": 75.8577 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["address"], "MG Road, Indore, Madhya Pradesh, India");

    let (status, _) = send(
        &app,
        post_json(
            "/api/journey/locations",
            Some(&customer),
            json!({
                "startLocation": "Rajwada Palace",
                "startLat": 22.7196,
                "startLng": 75.8577,
                "dropLocation": "Indore Airport",
                "dropLat": 22.7279,
                "dropLng": 75.8011
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, session) = send(
        &app,
        post_json("/api/journey/routes", Some(&customer), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "planning failed: {}", session);
    assert_eq!(session["stage"], "ROUTES");
    let routes = session["routes"].as_array().unwrap();
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0]["id"], "fastest");
    assert_eq!(routes[1]["id"], "traffic");
    assert_eq!(routes[2]["id"], "eco");

    let (status, session) = send(
        &app,
        post_json("/api/journey/select/traffic", Some(&customer), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["stage"], "ANALYTICS");

    let (status, analytics) = send(&app, get("/api/journey/analytics", Some(&customer))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analytics["trafficStatus"], "Moderate Congestion");
    assert_eq!(analytics["peakHour"], "Off-peak");
    assert_eq!(analytics["roadBlocks"], "None");
    assert!(analytics["congestion"].is_object());

    let (status, session) = send(
        &app,
        post_json("/api/journey/vehicles", Some(&customer), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["stage"], "VEHICLES");
    let recommendations = session["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    let vehicle_id = recommendations[0]["id"].as_str().unwrap().to_string();

    let (status, booking) = send(
        &app,
        post_json(
            "/api/journey/book",
            Some(&customer),
            json!({ "vehicleId": vehicle_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "journey booking failed: {}", booking);
    assert_eq!(booking["price"], 250.0);
    assert_eq!(booking["startLocation"], "Rajwada Palace");

    // Booking resets the journey.
    let (_, session) = send(&app, get("/api/journey", Some(&customer))).await;
    assert_eq!(session["stage"], "INPUT");
}

#[tokio::test]
async fn journey_guards_stage_order() {
    let (app, _) = test_app();
    let customer = register(&app, "Priya", "customer4@example.com", None).await;

    // Selecting a route before planning any conflicts.
    let (status, _) = send(
        &app,
        post_json("/api/journey/select/fastest", Some(&customer), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Planning without coordinates is a bad request.
    let (status, _) = send(
        &app,
        post_json("/api/journey/routes", Some(&customer), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Booking before reaching the vehicle stage conflicts.
    let (status, _) = send(
        &app,
        post_json(
            "/api/journey/book",
            Some(&customer),
            json!({ "vehicleId": uuid::Uuid::new_v4() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn dashboards_are_role_gated() {
    let (app, _) = test_app();
    let admin = register(&app, "Admin", "admin@example.com", Some("ADMIN")).await;
    let customer = register(&app, "Priya", "customer5@example.com", None).await;

    let (status, metrics) = send(&app, get("/api/dashboard/admin/metrics", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["totalUsers"], "2");

    let (status, _) = send(&app, get("/api/dashboard/admin/metrics", Some(&customer))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, metrics) = send(&app, get("/api/dashboard/customer/metrics", Some(&customer))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["activeBookings"], "0");
}

#[tokio::test]
async fn maintenance_stats_cover_the_fleet() {
    let (app, state) = test_app();
    let manager = register(&app, "Meera", "manager4@example.com", Some("FLEET_MANAGER")).await;

    send(
        &app,
        post_json(
            "/api/vehicles",
            Some(&manager),
            json!({ "name": "Ola S1 Pro", "type": "Scooter", "fuelType": "Electric", "seats": 2 }),
        ),
    )
    .await;
    assert_eq!(state.vehicles.count().await, 1);

    let (status, stats) = send(&app, get("/api/maintenance/stats", Some(&manager))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["vehiclesHealthy"], 1);
    assert_eq!(stats["fleetHealthScore"], 100.0);
    assert_eq!(stats["trendData"].as_array().unwrap().len(), 5);
}
