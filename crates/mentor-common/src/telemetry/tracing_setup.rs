//! Tracing and logging setup
//!
//! Configures the `tracing` subscriber with environment-based filtering.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::Environment;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: Level,
    /// Enable JSON output format
    pub json: bool,
    /// Include span close events (with busy/idle timings)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    /// Include the span list in JSON output
    pub span_list: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            file_line: true,
            span_list: false,
        }
    }
}

impl TracingConfig {
    /// Development configuration with debug logging
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            json: false,
            span_events: true,
            file_line: true,
            span_list: false,
        }
    }

    /// Production configuration with JSON logging
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            json: true,
            span_events: false,
            file_line: false,
            span_list: true,
        }
    }

    /// Pick the configuration matching the deployment environment
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Staging | Environment::Production => Self::production(),
        }
    }

    fn filter(&self) -> EnvFilter {
        // sqlx logs every statement at info; keep it quiet unless asked for
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn", self.level)))
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls return `AlreadyInitialized`.
pub fn try_init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    let registry = tracing_subscriber::registry().with(config.filter());

    if config.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(config.span_list)
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_span_events(config.span_events());

        registry
            .with(fmt_layer)
            .try_init()
            .map_err(|_| TracingError::AlreadyInitialized)
    } else {
        let fmt_layer = fmt::layer()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_span_events(config.span_events());

        registry
            .with(fmt_layer)
            .try_init()
            .map_err(|_| TracingError::AlreadyInitialized)
    }
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
