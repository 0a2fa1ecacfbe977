//! Role-specific dashboard metrics.
//!
//! Every metric is computed live from the in-memory stores and shipped
//! as a pre-formatted display string, since the dashboard widgets
//! render the values verbatim. Rating and acceptance figures have no
//! backing data yet and are fixed demo values.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::dto::dashboard_dto::{
    AdminMetricsResponse, CustomerMetricsResponse, DriverMetricsResponse,
    FleetManagerMetricsResponse,
};
use crate::models::booking::BookingStatus;
use crate::models::user::Role;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;

#[derive(Clone)]
pub struct DashboardService {
    users: UserRepository,
    vehicles: VehicleRepository,
    bookings: BookingRepository,
}

impl DashboardService {
    pub fn new(
        users: UserRepository,
        vehicles: VehicleRepository,
        bookings: BookingRepository,
    ) -> Self {
        Self {
            users,
            vehicles,
            bookings,
        }
    }

    pub async fn admin_metrics(&self) -> AdminMetricsResponse {
        let bookings = self.bookings.all().await;
        let active_users: std::collections::HashSet<Uuid> = bookings
            .iter()
            .filter(|b| b.is_active())
            .map(|b| b.user_id)
            .collect();
        let completed = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed);
        let revenue: f64 = completed.clone().map(|b| b.price).sum();

        AdminMetricsResponse {
            total_users: self.users.count().await.to_string(),
            total_fleets: self.vehicles.count().await.to_string(),
            total_bookings: bookings.len().to_string(),
            active_users: active_users.len().to_string(),
            completed_trips: completed.count().to_string(),
            total_revenue: rupees(revenue),
        }
    }

    pub async fn fleet_manager_metrics(&self) -> FleetManagerMetricsResponse {
        let bookings = self.bookings.all().await;
        let week_ago = Utc::now() - Duration::days(7);
        let weekly_revenue: f64 = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed && b.created_at >= week_ago)
            .map(|b| b.price)
            .sum();

        FleetManagerMetricsResponse {
            active_vehicles: self
                .vehicles
                .count_by_status(VehicleStatus::InUse)
                .await
                .to_string(),
            total_fleet_size: self.vehicles.count().await.to_string(),
            active_trips: bookings.iter().filter(|b| b.is_active()).count().to_string(),
            completed_trips: self
                .bookings
                .count_by_status(BookingStatus::Completed)
                .await
                .to_string(),
            active_drivers: self.users.count_by_role(Role::Driver).await.to_string(),
            weekly_revenue: rupees(weekly_revenue),
        }
    }

    pub async fn driver_metrics(&self, driver_id: Uuid) -> DriverMetricsResponse {
        let assigned = self.vehicles.find_by_driver(driver_id).await;
        let vehicle_ids: Vec<Uuid> = assigned.iter().map(|v| v.id).collect();
        let distance: f64 = assigned.iter().map(|v| v.total_distance_km).sum();

        let bookings = self.bookings.all().await;
        let today = Utc::now().date_naive();
        let mine = bookings
            .iter()
            .filter(|b| vehicle_ids.contains(&b.vehicle_id));
        let todays: Vec<_> = mine
            .clone()
            .filter(|b| b.created_at.date_naive() == today)
            .collect();
        let todays_earnings: f64 = todays
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .map(|b| b.price)
            .sum();
        let completed = mine
            .filter(|b| b.status == BookingStatus::Completed)
            .count();

        DriverMetricsResponse {
            todays_trips: todays.len().to_string(),
            todays_earnings: rupees(todays_earnings),
            distance_covered: format!("{:.1} km", distance),
            driver_rating: "4.8".to_string(),
            completed_trips: completed.to_string(),
            acceptance_rate: "95%".to_string(),
        }
    }

    pub async fn customer_metrics(&self, user_id: Uuid) -> CustomerMetricsResponse {
        let bookings = self.bookings.find_by_user(user_id).await;
        let now = Utc::now();
        let active = bookings.iter().filter(|b| b.is_active()).count();
        let upcoming = bookings
            .iter()
            .filter(|b| b.is_active() && b.start_time > now)
            .count();
        let total_spent: f64 = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .map(|b| b.price)
            .sum();
        let favorite_routes: std::collections::HashSet<&str> = bookings
            .iter()
            .map(|b| b.drop_location.as_str())
            .collect();

        CustomerMetricsResponse {
            active_bookings: active.to_string(),
            total_trips: bookings.len().to_string(),
            total_spent: rupees(total_spent),
            // Demo figure: 10% of spend presented as savings.
            amount_saved: rupees(total_spent * 0.10),
            upcoming_trips: upcoming.to_string(),
            favorite_routes: favorite_routes.len().to_string(),
        }
    }
}

fn rupees(amount: f64) -> String {
    format!("₹{:.0}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::Booking;
    use crate::models::user::User;
    use crate::models::vehicle::{FuelType, GeoPoint, Vehicle, VehicleType};

    fn service() -> DashboardService {
        DashboardService::new(
            UserRepository::new(),
            VehicleRepository::new(),
            BookingRepository::new(),
        )
    }

    fn completed_booking(user_id: Uuid, vehicle_id: Uuid, price: f64) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id,
            vehicle_id,
            start_location: "A".to_string(),
            start_lat: None,
            start_lng: None,
            drop_location: "B".to_string(),
            drop_lat: None,
            drop_lng: None,
            start_time: Utc::now(),
            end_time: Some(Utc::now()),
            price,
            status: BookingStatus::Completed,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn admin_metrics_sum_completed_revenue() {
        let svc = service();
        let user = svc
            .users
            .insert(User::new(
                Uuid::new_v4(),
                "Asha".to_string(),
                "asha@example.com".to_string(),
                "hash".to_string(),
                Role::Customer,
            ))
            .await;
        svc.bookings
            .insert(completed_booking(user.id, Uuid::new_v4(), 300.0))
            .await;
        svc.bookings
            .insert(completed_booking(user.id, Uuid::new_v4(), 450.0))
            .await;

        let metrics = svc.admin_metrics().await;
        assert_eq!(metrics.total_users, "1");
        assert_eq!(metrics.total_bookings, "2");
        assert_eq!(metrics.completed_trips, "2");
        assert_eq!(metrics.total_revenue, "₹750");
    }

    #[tokio::test]
    async fn driver_metrics_aggregate_assigned_vehicles() {
        let svc = service();
        let driver_id = Uuid::new_v4();
        let mut v = Vehicle::new(
            "Tata Ace - Logistics".to_string(),
            VehicleType::Truck,
            FuelType::Diesel,
            2,
            GeoPoint::new(22.7196, 75.8577),
        );
        v.driver_id = Some(driver_id);
        v.total_distance_km = 123.45;
        let v = svc.vehicles.insert(v).await;
        svc.bookings
            .insert(completed_booking(Uuid::new_v4(), v.id, 500.0))
            .await;

        let metrics = svc.driver_metrics(driver_id).await;
        assert_eq!(metrics.distance_covered, "123.5 km");
        assert_eq!(metrics.todays_trips, "1");
        assert_eq!(metrics.todays_earnings, "₹500");
        assert_eq!(metrics.completed_trips, "1");
    }

    #[tokio::test]
    async fn customer_metrics_count_only_own_bookings() {
        let svc = service();
        let me = Uuid::new_v4();
        svc.bookings
            .insert(completed_booking(me, Uuid::new_v4(), 200.0))
            .await;
        svc.bookings
            .insert(completed_booking(Uuid::new_v4(), Uuid::new_v4(), 999.0))
            .await;

        let metrics = svc.customer_metrics(me).await;
        assert_eq!(metrics.total_trips, "1");
        assert_eq!(metrics.total_spent, "₹200");
        assert_eq!(metrics.amount_saved, "₹20");
    }
}
