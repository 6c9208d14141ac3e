//! Register-file backend HTTP service.
//!
//! Serves two informational endpoints under `/api`:
//!
//! ```text
//! GET /api/hello   -> {"message": "Hello from Spring Boot Backend!", "status": "success"}
//! GET /api/status  -> {"status": "Backend is running", "timestamp": <ms>, "service": "register-file-backend"}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: HTTP handlers, routes and OpenAPI document
//! - [`metrics`]: Prometheus request metrics
//! - [`utils`]: Clock and shutdown helpers

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{BackendError, Result};
