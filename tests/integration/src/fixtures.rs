//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use chrono::{DateTime, Duration, DurationRound, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A whole hour at least `days` days from now
pub fn future_hour(days: i64) -> DateTime<Utc> {
    let now = Utc::now() + Duration::days(days);
    now.duration_trunc(Duration::hours(1)).unwrap_or(now) + Duration::hours(1)
}

/// Synced caller and its bearer token
#[derive(Debug, Clone)]
pub struct Persona {
    pub user: UserBody,
    pub token: String,
}

// ============================================================================
// Requests
// ============================================================================

/// Create mentor profile request
#[derive(Debug, Serialize)]
pub struct CreateMentorRequest {
    pub title: String,
    pub bio: Option<String>,
    pub expertise: Vec<String>,
    pub hourly_rate_cents: i64,
    pub currency: Option<String>,
}

impl CreateMentorRequest {
    pub fn unique() -> Self {
        Self {
            title: format!("Staff Engineer {}", unique_suffix()),
            bio: Some("Distributed systems and career coaching".to_string()),
            expertise: vec!["Rust".to_string(), "Databases".to_string()],
            hourly_rate_cents: 12_000,
            currency: Some("usd".to_string()),
        }
    }
}

/// Create service request
#[derive(Debug, Serialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
}

impl CreateServiceRequest {
    pub fn hour_session() -> Self {
        Self {
            name: format!("Code review {}", unique_suffix()),
            description: None,
            duration_minutes: 60,
            price_cents: 10_000,
        }
    }
}

/// Create time slot request
#[derive(Debug, Serialize)]
pub struct CreateTimeSlotRequest {
    pub service_id: Uuid,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub max_bookings: i32,
}

impl CreateTimeSlotRequest {
    /// One hour starting `days` days out
    pub fn hour(service_id: Uuid, days: i64, max_bookings: i32) -> Self {
        let start = future_hour(days);
        Self {
            service_id,
            start_date_time: start,
            end_date_time: start + Duration::hours(1),
            max_bookings,
        }
    }
}

/// Create booking request
#[derive(Debug, Serialize)]
pub struct CreateBookingRequest {
    pub mentor_id: Uuid,
    pub service_id: Uuid,
    pub time_slot_id: Uuid,
    pub student_notes: Option<String>,
}

impl CreateBookingRequest {
    pub fn for_slot(slot: &SlotBody) -> Self {
        Self {
            mentor_id: slot.mentor_id,
            service_id: slot.service_id,
            time_slot_id: slot.id,
            student_notes: Some("Looking forward to it".to_string()),
        }
    }
}

/// Create appointment request
#[derive(Debug, Serialize)]
pub struct CreateAppointmentRequest {
    pub mentor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub notes: Option<String>,
}

/// Status change request
#[derive(Debug, Serialize)]
pub struct StatusRequest {
    pub status: &'static str,
}

// ============================================================================
// Responses
// ============================================================================

/// User response
#[derive(Debug, Clone, Deserialize)]
pub struct UserBody {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Mentor response
#[derive(Debug, Deserialize)]
pub struct MentorBody {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub expertise: Vec<String>,
    pub currency: String,
    pub is_verified: bool,
    pub is_active: bool,
}

/// Service response
#[derive(Debug, Deserialize)]
pub struct ServiceBody {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub price_cents: i64,
    pub is_active: bool,
}

/// Time slot response
#[derive(Debug, Deserialize)]
pub struct SlotBody {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub service_id: Uuid,
    pub max_bookings: i32,
    pub current_bookings: i32,
    pub remaining_capacity: i32,
    pub is_booked: bool,
}

/// Availability window response
#[derive(Debug, Deserialize)]
pub struct AvailabilityBody {
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
}

/// Booking response
#[derive(Debug, Deserialize)]
pub struct BookingBody {
    pub id: Uuid,
    pub student_id: Uuid,
    pub time_slot_id: Uuid,
    pub status: String,
    pub payment_status: String,
    pub price_cents: i64,
    pub platform_fee_cents: i64,
    pub mentor_earnings_cents: i64,
    pub cancelled_by: Option<Uuid>,
}

/// Appointment response
#[derive(Debug, Deserialize)]
pub struct AppointmentBody {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub user_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
}

/// Offset-paginated list
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}
