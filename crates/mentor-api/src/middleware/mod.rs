//! Middleware stack for the API server
//!
//! Provides logging, request ID generation, CORS, rate limiting, and timeouts.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use mentor_common::{AppError, CorsConfig, RateLimitConfig};
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upper bound on handling one request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request ID, tracing and timeout layers shared by every route
pub fn apply_middleware(router: Router<AppState>) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        // Timeout (returns 503 Service Unavailable on timeout)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            REQUEST_TIMEOUT,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Full middleware stack for the API routes: CORS and rate limiting on top
/// of [`apply_middleware`]
///
/// Layers wrap outward, so a request passes rate limit, request id, trace,
/// timeout and CORS in that order.
pub fn apply_middleware_with_config(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Result<Router<AppState>, AppError> {
    // One token every `period` with `burst` held in reserve, shared by all callers
    let period_ms = (1000 / u64::from(rate_limit_config.requests_per_second.max(1))).max(1);
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(period_ms)
        .burst_size(rate_limit_config.burst.max(1))
        .key_extractor(GlobalKeyExtractor)
        .finish()
        .ok_or_else(|| AppError::Config("invalid rate limit configuration".to_string()))?;

    let router = router.layer(create_cors_layer(cors_config, is_production));

    Ok(apply_middleware(router).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let base_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id.clone(),
        ])
        .expose_headers([
            request_id,
            HeaderName::from_static("x-ratelimit-limit"),
            HeaderName::from_static("x-ratelimit-remaining"),
            HeaderName::from_static("x-ratelimit-reset"),
        ]);

    // Production only honours configured origins; development falls back to any
    if !is_production && config.allowed_origins.is_empty() {
        tracing::warn!(
            "CORS: Allowing any origin (development mode). \
             Configure CORS_ALLOWED_ORIGINS for production."
        );
        return base_layer.allow_origin(Any);
    }

    if config.allowed_origins.is_empty() {
        tracing::warn!(
            "CORS: No allowed origins configured in production mode. \
             Requests from browsers will be blocked."
        );
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin = %origin, "Invalid CORS origin");
                None
            })
        })
        .collect();

    tracing::info!(count = origins.len(), "CORS: Allowing configured origins");
    base_layer.allow_origin(AllowOrigin::list(origins))
}
