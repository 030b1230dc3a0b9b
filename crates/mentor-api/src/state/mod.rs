//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, token verifier and configuration.

use std::sync::Arc;

use mentor_common::{AppConfig, JwtService};
use mentor_db::PgPool;
use mentor_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all repositories
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Access token verifier
    jwt_service: Arc<JwtService>,
    /// Pool handle kept for readiness probes
    pool: PgPool,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        jwt_service: JwtService,
        pool: PgPool,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            jwt_service: Arc::new(jwt_service),
            pool,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Get the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("config", &"AppConfig")
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}
