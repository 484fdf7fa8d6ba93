//! Core utilities: configuration, errors, logging and the HTTP server

pub mod config;
pub mod error;
pub mod logging;
pub mod web_server;

// Re-exports for convenience
pub use config::{Config, ConfigError};
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_configuration};
