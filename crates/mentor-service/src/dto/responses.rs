//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Money is reported in minor currency units.

use chrono::{DateTime, NaiveTime, Utc};
use mentor_core::{BookingStatus, PaymentStatus, UserRole};
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// Common Response Types
// ============================================================================

/// Offset-paginated list
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, limit: i64, offset: i64) -> Self {
        let has_more = i64::try_from(data.len()).is_ok_and(|len| len == limit);
        Self {
            data,
            pagination: PaginationMeta {
                limit,
                offset,
                has_more,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub limit: i64,
    pub offset: i64,
    /// A full page came back, so another may follow
    pub has_more: bool,
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Mentor Directory Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MentorResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub bio: Option<String>,
    pub expertise: Vec<String>,
    pub hourly_rate_cents: i64,
    pub currency: String,
    pub timezone: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSlotResponse {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub service_id: Uuid,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub max_bookings: i32,
    pub current_bookings: i32,
    pub remaining_capacity: i32,
    pub is_booked: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub timezone: String,
    pub is_active: bool,
}

// ============================================================================
// Booking Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    pub service_id: Uuid,
    pub time_slot_id: Uuid,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub price_cents: i64,
    pub platform_fee_cents: i64,
    pub mentor_earnings_cents: i64,
    pub currency: String,
    pub student_notes: Option<String>,
    pub mentor_notes: Option<String>,
    pub meeting_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Appointment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub user_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub meeting_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health of each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
