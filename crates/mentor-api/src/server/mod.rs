//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use mentor_common::{AppConfig, AppError, JwtService};
use mentor_db::{
    create_pool, default_migrations_dir, run_migrations, PgAppointmentRepository,
    PgAvailabilityRepository, PgBookingRepository, PgMentorRepository, PgPool,
    PgServiceRepository, PgTimeSlotRepository, PgUserRepository, PoolConfig,
};
use mentor_service::{ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Wire the PostgreSQL repositories into a service context
pub fn build_service_context(pool: &PgPool, config: &AppConfig) -> Result<ServiceContext, AppError> {
    ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .mentor_repo(Arc::new(PgMentorRepository::new(pool.clone())))
        .service_repo(Arc::new(PgServiceRepository::new(pool.clone())))
        .time_slot_repo(Arc::new(PgTimeSlotRepository::new(pool.clone())))
        .booking_repo(Arc::new(PgBookingRepository::new(pool.clone())))
        .appointment_repo(Arc::new(PgAppointmentRepository::new(pool.clone())))
        .availability_repo(Arc::new(PgAvailabilityRepository::new(pool.clone())))
        .booking_config(config.booking)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &default_migrations_dir())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("Database migrations applied");
    }

    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.issuer.clone(),
    );

    let service_context = build_service_context(&pool, &config)?;

    Ok(AppState::new(service_context, config, jwt_service, pool))
}

/// Run the HTTP server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read listener address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
