//! Application configuration structs
//!
//! Loads configuration from environment variables (and an optional `.env`).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub booking: BookingConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations at start-up
    #[serde(default)]
    pub run_migrations: bool,
}

/// JWT verification settings
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Expected `iss` claim, if the provider sets one
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Booking pricing policy
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BookingConfig {
    /// Platform share of each booking price, 0..=100
    #[serde(default = "default_platform_fee_percent")]
    pub platform_fee_percent: u8,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            platform_fee_percent: default_platform_fee_percent(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "mentor-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_platform_fee_percent() -> u8 {
    10
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(key))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(raw) => raw.parse()?,
            None => Environment::default(),
        };

        let port = required(&lookup, "API_PORT")?;
        let port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("API_PORT", port))?;

        let platform_fee_percent = parse_or(
            &lookup,
            "BOOKING_PLATFORM_FEE_PERCENT",
            default_platform_fee_percent(),
        )?;
        if platform_fee_percent > 100 {
            return Err(ConfigError::InvalidValue(
                "BOOKING_PLATFORM_FEE_PERCENT",
                platform_fee_percent.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port,
            },
            database: DatabaseConfig {
                url: required(&lookup, "DATABASE_URL")?,
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    default_max_connections(),
                )?,
                min_connections: parse_or(
                    &lookup,
                    "DATABASE_MIN_CONNECTIONS",
                    default_min_connections(),
                )?,
                run_migrations: parse_or(&lookup, "DATABASE_RUN_MIGRATIONS", false)?,
            },
            jwt: JwtConfig {
                secret: required(&lookup, "JWT_SECRET")?,
                issuer: lookup("JWT_ISSUER").filter(|s| !s.is_empty()),
                access_token_expiry: parse_or(
                    &lookup,
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    default_access_token_expiry(),
                )?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(
                    &lookup,
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second(),
                )?,
                burst: parse_or(&lookup, "RATE_LIMIT_BURST", default_burst())?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            booking: BookingConfig {
                platform_fee_percent,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
