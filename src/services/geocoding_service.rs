//! Reverse geocoding against a Nominatim-style service.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::utils::errors::AppError;

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve a coordinate pair into a human-readable address.
    async fn reverse(&self, lat: f64, lng: f64) -> Result<String, AppError>;
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
}

pub struct NominatimClient {
    base_url: String,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, lat: f64, lng: f64) -> Result<String, AppError> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}",
            self.base_url, lat, lng
        );
        debug!("🌐 Reverse geocoding request: {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "FleetDispatch/1.0")
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Geocoding request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "Geocoding service returned {}",
                status
            )));
        }

        let parsed: NominatimResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse geocoding response: {}", e)))?;

        parsed
            .display_name
            .ok_or_else(|| AppError::NotFound("No address found for these coordinates".to_string()))
    }
}

/// Coordinate fallback used when the geocoder is unavailable: the
/// location picker still needs *some* display string.
pub fn coordinate_label(lat: f64, lng: f64) -> String {
    format!("{:.4}, {:.4}", lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_label_uses_four_decimals() {
        assert_eq!(coordinate_label(22.71959, 75.85770), "22.7196, 75.8577");
    }
}
