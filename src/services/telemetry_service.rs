//! Vehicle telemetry simulator
//!
//! Produces a plausible illusion of fleet movement without real
//! hardware: on every tick, vehicles that are "In Use" get their speed
//! nudged, their battery drained and their position jittered. Vehicles
//! in any other status pass through a tick completely untouched — no
//! battery drain, no speed decay, and (resolving an ambiguity in the
//! old behavior) no position jitter either.
//!
//! The simulator owns its RNG and carries no vehicle state of its own;
//! the fleet lives in `VehicleRepository` and is handed in per tick.

use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::models::alert::{Alert, Severity};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::alert_repository::AlertRepository;
use crate::repositories::vehicle_repository::VehicleRepository;

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Seconds of simulated driving covered by one tick.
    pub tick_secs: f64,
    /// Max speed change per tick, km/h (uniform in +-jitter).
    pub speed_jitter_kmh: f64,
    /// Max positional drift per axis per tick, degrees.
    pub position_jitter_deg: f64,
    /// Battery percentage drained per tick while in use.
    pub battery_drain_pct: f64,
    /// Speed above which an Overspeeding alert fires, km/h.
    pub overspeed_threshold_kmh: f64,
    /// Distance since last service that flags a vehicle, km.
    pub service_interval_km: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_secs: 2.0,
            speed_jitter_kmh: 2.5,
            position_jitter_deg: 0.0005,
            battery_drain_pct: 0.1,
            overspeed_threshold_kmh: 100.0,
            service_interval_km: 1000.0,
        }
    }
}

pub struct TelemetrySimulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl TelemetrySimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests.
    pub fn with_seed(config: SimulatorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advance every in-use vehicle by one tick. Returns the alerts
    /// raised during this cycle. Cannot fail.
    pub fn tick<'a>(&mut self, vehicles: impl Iterator<Item = &'a mut Vehicle>) -> Vec<Alert> {
        let cfg = &self.config;
        let mut alerts = Vec::new();

        for vehicle in vehicles {
            if vehicle.status != VehicleStatus::InUse {
                continue;
            }

            let jitter = self.rng.gen_range(-cfg.speed_jitter_kmh..=cfg.speed_jitter_kmh);
            vehicle.speed = (vehicle.speed + jitter).clamp(0.0, vehicle.max_speed_kmh());
            vehicle.battery = (vehicle.battery - cfg.battery_drain_pct).max(0.0);

            let eps = cfg.position_jitter_deg;
            vehicle.location.lat += self.rng.gen_range(-eps..=eps);
            vehicle.location.lng += self.rng.gen_range(-eps..=eps);

            let covered_km = vehicle.speed * cfg.tick_secs / 3600.0;
            vehicle.total_distance_km += covered_km;
            vehicle.distance_since_service_km += covered_km;
            vehicle.last_update = Utc::now();

            if vehicle.speed > cfg.overspeed_threshold_kmh {
                alerts.push(Alert::new(
                    vehicle,
                    "Overspeeding",
                    format!(
                        "Vehicle exceeded {:.0} km/h (speed: {:.2} km/h)",
                        cfg.overspeed_threshold_kmh, vehicle.speed
                    ),
                    Severity::High,
                ));
            }

            if vehicle.battery <= 0.0 {
                vehicle.status = VehicleStatus::NeedsService;
                vehicle.speed = 0.0;
                alerts.push(Alert::new(
                    vehicle,
                    "Low Battery",
                    "Battery depleted. Vehicle flagged for service.".to_string(),
                    Severity::Critical,
                ));
            } else if vehicle.distance_since_service_km > cfg.service_interval_km {
                vehicle.status = VehicleStatus::NeedsService;
                alerts.push(Alert::new(
                    vehicle,
                    "Maintenance Required",
                    format!(
                        "Vehicle has covered {:.0} km since last service.",
                        cfg.service_interval_km
                    ),
                    Severity::Medium,
                ));
            }
        }

        alerts
    }
}

/// Spawn the background simulation loop. A single task owns the
/// simulator, so ticks can never overlap; each tick holds the vehicle
/// store's write lock only for the synchronous mutation.
pub fn spawn_simulation(
    vehicles: VehicleRepository,
    alerts: AlertRepository,
    interval_secs: u64,
) -> JoinHandle<()> {
    let config = SimulatorConfig {
        tick_secs: interval_secs as f64,
        ..SimulatorConfig::default()
    };
    let mut simulator = TelemetrySimulator::new(config);

    tokio::spawn(async move {
        info!("🛰️ Telemetry simulator running every {}s", interval_secs);
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            let raised = vehicles
                .with_all_mut(|fleet| simulator.tick(fleet.values_mut()))
                .await;
            if !raised.is_empty() {
                debug!("Telemetry tick raised {} alert(s)", raised.len());
                alerts.insert_all(raised).await;
            }
        }
    })
}
