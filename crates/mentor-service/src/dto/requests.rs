//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, NaiveTime, Utc};
use mentor_core::{BookingStatus, PaymentStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Shortest bookable appointment, in minutes
pub const MIN_APPOINTMENT_MINUTES: i32 = 15;
/// Longest bookable appointment, in minutes
pub const MAX_APPOINTMENT_MINUTES: i32 = 480;

// ============================================================================
// User Requests
// ============================================================================

/// Mirror the caller's profile from the identity provider.
///
/// Email and role always come from the access token.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SyncProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

// ============================================================================
// Mentor Requests
// ============================================================================

/// Create mentor profile request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMentorRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Bio must be at most 5000 characters"))]
    pub bio: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 expertise tags"))]
    pub expertise: Vec<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Hourly rate cannot be negative"))]
    pub hourly_rate_cents: i64,

    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Timezone must be 1-64 characters"))]
    pub timezone: Option<String>,
}

/// Update mentor profile request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMentorRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Bio must be at most 5000 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 20, message = "At most 20 expertise tags"))]
    pub expertise: Option<Vec<String>>,

    #[validate(range(min = 0, message = "Hourly rate cannot be negative"))]
    pub hourly_rate_cents: Option<i64>,

    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Timezone must be 1-64 characters"))]
    pub timezone: Option<String>,

    pub is_active: Option<bool>,

    /// Admin only
    pub is_verified: Option<bool>,
}

/// Browse mentors query
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MentorListQuery {
    #[validate(length(max = 100, message = "Search must be at most 100 characters"))]
    pub search: Option<String>,

    pub expertise: Option<String>,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "Offset cannot be negative"))]
    pub offset: i64,
}

impl Default for MentorListQuery {
    fn default() -> Self {
        Self {
            search: None,
            expertise: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Create service offering request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 15, max = 480, message = "Duration must be 15-480 minutes"))]
    pub duration_minutes: i32,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: i64,

    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,
}

/// Create time slot request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTimeSlotRequest {
    pub service_id: Uuid,

    pub start_date_time: DateTime<Utc>,

    pub end_date_time: DateTime<Utc>,

    #[serde(default = "default_max_bookings")]
    #[validate(range(min = 1, max = 100, message = "Capacity must be 1-100"))]
    pub max_bookings: i32,
}

/// Slot listing range
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct SlotListQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

// ============================================================================
// Availability Requests
// ============================================================================

/// One weekly availability window
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AvailabilitySlotRequest {
    /// 0 = Sunday .. 6 = Saturday
    #[validate(range(min = 0, max = 6, message = "Day of week must be 0-6"))]
    pub day_of_week: i16,

    pub start_time: NaiveTime,

    pub end_time: NaiveTime,

    #[serde(default = "default_timezone")]
    #[validate(length(min = 1, max = 64, message = "Timezone must be 1-64 characters"))]
    pub timezone: String,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Replace the whole weekly schedule; an empty list clears it
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReplaceAvailabilityRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "At most 100 availability windows"), nested)]
    pub slots: Vec<AvailabilitySlotRequest>,
}

// ============================================================================
// Booking Requests
// ============================================================================

/// Create booking request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub mentor_id: Uuid,

    pub service_id: Uuid,

    pub time_slot_id: Uuid,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub student_notes: Option<String>,

    /// Book on behalf of another student (admins only)
    pub student_id: Option<Uuid>,
}

/// Cancel a booking or appointment
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CancelRequest {
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// Lifecycle status change for bookings and appointments
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

/// Payment status change
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: PaymentStatus,
}

/// Which side of the marketplace to list records for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListRole {
    /// Records where the caller is the client
    Student,
    /// Records on the caller's mentor profile
    Mentor,
}

/// Listing query for bookings and appointments
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListQuery {
    /// Both sides when absent
    pub role: Option<ListRole>,

    pub status: Option<BookingStatus>,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "Offset cannot be negative"))]
    pub offset: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            role: None,
            status: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

// ============================================================================
// Appointment Requests
// ============================================================================

/// Create appointment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    pub mentor_id: Uuid,

    /// Must be in the future
    pub scheduled_at: DateTime<Utc>,

    #[validate(range(min = 15, max = 480, message = "Duration must be 15-480 minutes"))]
    pub duration_minutes: i32,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Move an appointment; the duration is kept when absent
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RescheduleAppointmentRequest {
    pub scheduled_at: DateTime<Utc>,

    #[validate(range(min = 15, max = 480, message = "Duration must be 15-480 minutes"))]
    pub duration_minutes: Option<i32>,
}

/// Probe a mentor's calendar for appointments overlapping a window
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConflictQuery {
    pub mentor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,

    #[validate(range(min = 15, max = 480, message = "Duration must be 15-480 minutes"))]
    pub duration_minutes: i32,

    /// Appointment to leave out, usually the one being moved
    pub exclude: Option<Uuid>,
}

// Default value functions
fn default_limit() -> i64 {
    20
}

fn default_max_bookings() -> i32 {
    1
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appointment_duration_bounds() {
        let mut request = CreateAppointmentRequest {
            mentor_id: Uuid::new_v4(),
            scheduled_at: Utc::now(),
            duration_minutes: MIN_APPOINTMENT_MINUTES,
            notes: None,
        };
        assert!(request.validate().is_ok());

        request.duration_minutes = MAX_APPOINTMENT_MINUTES;
        assert!(request.validate().is_ok());

        request.duration_minutes = 14;
        assert!(request.validate().is_err());

        request.duration_minutes = 481;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_availability_day_range_is_checked_per_item() {
        let json = r#"{"slots": [
            {"day_of_week": 1, "start_time": "09:00:00", "end_time": "12:00:00"},
            {"day_of_week": 7, "start_time": "09:00:00", "end_time": "12:00:00"}
        ]}"#;
        let request: ReplaceAvailabilityRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.slots[0].timezone, "UTC");
        assert!(request.slots[0].is_active);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_availability_is_valid() {
        let request: ReplaceAvailabilityRequest = serde_json::from_str(r#"{"slots": []}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.slots.is_empty());
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListQuery = serde_json::from_str(r#"{"status": "no_show"}"#).unwrap();
        assert_eq!(query.status, Some(BookingStatus::NoShow));
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 0);
        assert!(query.role.is_none());
    }

    #[test]
    fn test_time_slot_capacity_defaults_to_one() {
        let json = format!(
            r#"{{"service_id": "{}", "start_date_time": "2030-01-01T10:00:00Z", "end_date_time": "2030-01-01T11:00:00Z"}}"#,
            Uuid::nil()
        );
        let request: CreateTimeSlotRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.max_bookings, 1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<UpdateStatusRequest, _> = serde_json::from_str(r#"{"status": "archived"}"#);
        assert!(result.is_err());
    }
}
