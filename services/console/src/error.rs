//! services/console/src/error.rs
//!
//! Defines the primary error type for the entire console service.

use crate::config::ConfigError;
use botverse_core::ports::PortError;
use botverse_core::session::SessionError;

/// The primary error type for the `console` service.
///
/// Gateway and session failures display as the single human-readable message
/// the user sees; server error bodies are never carried this far.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("{0}")]
    Port(#[from] PortError),

    /// A session-precondition failure caught before any call is issued.
    #[error("{0}")]
    Session(#[from] SessionError),

    /// A failed or missing sign-in.
    #[error("{0}")]
    Unauthorized(String),

    /// A missing-precondition validation failure caught before any call is
    /// issued.
    #[error("{0}")]
    Validation(String),

    /// Represents a standard Input/Output error (e.g., reading the state file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
