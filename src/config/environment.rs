//! Environment configuration
//!
//! Every knob can be overridden through environment variables; defaults
//! are development-friendly so the service boots without a `.env`.

use std::env;

/// Environment configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    // External collaborators
    pub osrm_base_url: String,
    pub nominatim_base_url: String,
    // Telemetry simulator
    pub simulation_interval_secs: u64,
    pub seed_demo_data: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "dev-only-insecure-secret".to_string()),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            osrm_base_url: env::var("OSRM_BASE_URL")
                .unwrap_or_else(|_| "https://router.project-osrm.org".to_string()),
            nominatim_base_url: env::var("NOMINATIM_BASE_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            simulation_interval_secs: env::var("SIMULATION_INTERVAL_SECS")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .expect("SIMULATION_INTERVAL_SECS must be a valid number"),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }
}

impl EnvironmentConfig {
    /// Check whether we are running in development mode
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Server bind address
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
