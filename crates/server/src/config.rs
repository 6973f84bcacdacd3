//! Server configuration from environment variables.

use std::net::SocketAddr;

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: String,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Parse configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RELAYPAD_BIND_ADDR`: listen address (default: "0.0.0.0:5000")
    /// - `RELAYPAD_DB_PATH`: aurora-db data directory (default: "aurora_db_data")
    /// - `RELAYPAD_ALLOWED_ORIGINS`: comma-separated CORS origins
    ///   (default: "http://localhost:5173")
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("RELAYPAD_BIND_ADDR")
            .ok()
            .and_then(|addr| addr.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 5000)));

        let db_path =
            std::env::var("RELAYPAD_DB_PATH").unwrap_or_else(|_| "aurora_db_data".to_string());

        let allowed_origins = std::env::var("RELAYPAD_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            bind_addr,
            db_path,
            allowed_origins,
        }
    }
}
