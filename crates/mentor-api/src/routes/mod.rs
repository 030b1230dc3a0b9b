//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{appointments, availability, bookings, health, mentors, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(mentor_routes())
        .merge(booking_routes())
        .merge(appointment_routes())
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/@me",
        get(users::get_current_user).put(users::sync_current_user),
    )
}

/// Mentor directory routes
fn mentor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/mentors",
            get(mentors::browse_mentors).post(mentors::create_mentor),
        )
        .route(
            "/mentors/:mentor_id",
            get(mentors::get_mentor).patch(mentors::update_mentor),
        )
        // Service offerings
        .route(
            "/mentors/:mentor_id/services",
            get(mentors::list_services).post(mentors::create_service),
        )
        .route(
            "/mentors/:mentor_id/services/:service_id",
            delete(mentors::deactivate_service),
        )
        // Time slots
        .route(
            "/mentors/:mentor_id/slots",
            get(mentors::list_slots).post(mentors::create_slot),
        )
        .route(
            "/mentors/:mentor_id/slots/:slot_id",
            delete(mentors::deactivate_slot),
        )
        // Weekly availability
        .route(
            "/mentors/:mentor_id/availability",
            get(availability::get_availability).put(availability::replace_availability),
        )
}

/// Booking routes
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/bookings/:booking_id", get(bookings::get_booking))
        .route("/bookings/:booking_id/cancel", post(bookings::cancel_booking))
        .route(
            "/bookings/:booking_id/status",
            patch(bookings::update_booking_status),
        )
        .route(
            "/bookings/:booking_id/payment-status",
            patch(bookings::update_payment_status),
        )
}

/// Appointment routes
fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/appointments/conflicts", get(appointments::find_conflicts))
        .route(
            "/appointments/:appointment_id",
            get(appointments::get_appointment),
        )
        .route(
            "/appointments/:appointment_id/reschedule",
            post(appointments::reschedule_appointment),
        )
        .route(
            "/appointments/:appointment_id/cancel",
            post(appointments::cancel_appointment),
        )
        .route(
            "/appointments/:appointment_id/status",
            patch(appointments::update_appointment_status),
        )
}
