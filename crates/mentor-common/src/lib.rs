//! # mentor-common
//!
//! Shared utilities including configuration, error handling, token verification, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService, TokenSubject};
pub use config::{
    AppConfig, AppSettings, BookingConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ServerConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, TracingConfig, TracingError};
