//! services/console/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Every value has a fixed default, matching
//! the defaults the hosted console shipped with.

use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the Botverse REST API.
    pub api_base_url: String,
    /// Origin used when rendering embed codes for existing tokens locally.
    pub widget_base_url: String,
    pub admin_username: String,
    pub admin_password: String,
    /// Where the signed-in flag and username are persisted between runs.
    pub state_path: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Remote API and Widget Origins ---
        let api_base_url = std::env::var("BOTVERSE_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        let widget_base_url = std::env::var("WIDGET_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        // --- Admin Credentials (static-secret comparison, client side only) ---
        let admin_username =
            std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "botverse_admin".to_string());
        let admin_password = std::env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| "BotVerse@2024!SecureAdmin".to_string());

        // --- Local State and Logging ---
        let state_path = std::env::var("BOTVERSE_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".botverse/session.json"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api_base_url,
            widget_base_url,
            admin_username,
            admin_password,
            state_path,
            log_level,
        })
    }
}
