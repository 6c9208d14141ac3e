//! Unified error types for the backend service.

use thiserror::Error;

/// Unified error type for the backend service.
///
/// Request handlers are infallible; these errors only surface while the
/// service is starting up or serving.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, BackendError>;
