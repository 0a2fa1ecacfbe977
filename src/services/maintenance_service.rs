//! Predictive maintenance statistics.
//!
//! Health per vehicle is a weighted blend of battery level and mileage
//! since the last service. Vehicles below the critical threshold also
//! get a predicted fault entry; the fault component, date offset and
//! probability are randomized per request, mirroring the demo feed the
//! maintenance page was built against.

use chrono::{Duration, Utc};
use rand::Rng;

use crate::dto::maintenance_dto::{HealthMetric, MaintenanceStats, PredictedFault};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;

const CRITICAL_THRESHOLD: f64 = 40.0;
const DUE_SOON_THRESHOLD: f64 = 70.0;

const FAULT_COMPONENTS: [&str; 2] = ["Battery Cells", "Brake Pads"];

/// Fixed demo series backing the health trend chart.
const TREND_MONTHS: [(&str, f64); 5] = [
    ("Jan", 92.0),
    ("Feb", 90.0),
    ("Mar", 87.0),
    ("Apr", 85.0),
    ("May", 82.0),
];

#[derive(Clone)]
pub struct MaintenanceService {
    vehicles: VehicleRepository,
}

impl MaintenanceService {
    pub fn new(vehicles: VehicleRepository) -> Self {
        Self { vehicles }
    }

    pub async fn fleet_stats(&self) -> MaintenanceStats {
        let fleet = self.vehicles.all().await;
        let mut rng = rand::thread_rng();

        let mut critical = 0;
        let mut due_soon = 0;
        let mut healthy = 0;
        let mut predicted_faults = Vec::new();
        let mut health_sum = 0.0;

        for vehicle in &fleet {
            let health = health_score(vehicle);
            health_sum += health;

            if health < CRITICAL_THRESHOLD {
                critical += 1;
                let component = FAULT_COMPONENTS[rng.gen_range(0..FAULT_COMPONENTS.len())];
                let in_days = rng.gen_range(0..7);
                predicted_faults.push(PredictedFault {
                    vehicle_id: vehicle.id,
                    vehicle_name: vehicle.name.clone(),
                    component: component.to_string(),
                    predicted_date: (Utc::now() + Duration::days(in_days))
                        .format("%Y-%m-%d")
                        .to_string(),
                    probability: rng.gen_range(85..99),
                });
            } else if health < DUE_SOON_THRESHOLD {
                due_soon += 1;
            } else {
                healthy += 1;
            }
        }

        let fleet_health_score = if fleet.is_empty() {
            100.0
        } else {
            (health_sum / fleet.len() as f64 * 10.0).round() / 10.0
        };

        MaintenanceStats {
            fleet_health_score,
            vehicles_critical: critical,
            vehicles_due_soon: due_soon,
            vehicles_healthy: healthy,
            predicted_faults,
            trend_data: TREND_MONTHS
                .iter()
                .map(|(month, average_health)| HealthMetric {
                    month: month.to_string(),
                    average_health: *average_health,
                })
                .collect(),
        }
    }
}

/// Battery counts 40%, mileage wear 60%. A vehicle loses one mileage
/// point per 100 km since its last service, floored at zero.
fn health_score(vehicle: &Vehicle) -> f64 {
    let mileage = (100.0 - vehicle.distance_since_service_km / 100.0).max(0.0);
    vehicle.battery * 0.4 + mileage * 0.6
}
