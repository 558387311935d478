//! Runtime configuration
//!
//! All configuration comes from the environment. The Google Maps API key is
//! required up front: a missing key is a startup error, not a per-request
//! one.

use crate::error::{KippoError, Result};

/// Default frontend origin for CORS (Vite dev server)
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Server configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Maps API key (`GOOGLE_MAPS_API_KEY`)
    pub api_key: String,
    /// Bind host (`HOST`)
    pub host: String,
    /// Bind port (`PORT`)
    pub port: u16,
    /// Allowed CORS origin (`FRONTEND_URL`)
    pub cors_origin: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_MAPS_API_KEY").map_err(|_| {
            KippoError::config("GOOGLE_MAPS_API_KEY is not set in environment variables")
        })?;

        let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match std::env::var("PORT") {
            Ok(value) => value.parse::<u16>().map_err(|_| {
                KippoError::config(format!("PORT must be a number in [1, 65535], got {}", value))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let cors_origin =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Self {
            api_key,
            host,
            port,
            cors_origin,
        })
    }

    /// Socket address string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
