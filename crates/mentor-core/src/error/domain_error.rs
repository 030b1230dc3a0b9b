//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::{BookingStatus, PaymentStatus, UserRole};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Mentor not found: {0}")]
    MentorNotFound(Uuid),

    #[error("Service not found: {0}")]
    ServiceNotFound(Uuid),

    #[error("Time slot not found: {0}")]
    TimeSlotNotFound(Uuid),

    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Start time must be before end time")]
    InvalidTimeRange,

    #[error("Time slot capacity must be at least 1")]
    InvalidCapacity,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Time slot is not available")]
    TimeSlotUnavailable,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Invalid payment status transition from {from} to {to}")]
    InvalidPaymentTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Booking is already {0}")]
    BookingFinalized(BookingStatus),

    #[error("Appointment is already {0}")]
    AppointmentFinalized(BookingStatus),

    #[error("Service is not available for booking")]
    ServiceInactive,

    #[error("Mentor is not accepting bookings")]
    MentorInactive,

    #[error("Cannot book a session with yourself")]
    CannotBookSelf,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Statement refused by the database for a reason other than integrity
    #[error("Query rejected: {0}")]
    QueryRejected(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a participant of this booking")]
    NotParticipant,

    #[error("Not the owner of this mentor profile")]
    NotMentorOwner,

    #[error("Role required: {0}")]
    RoleRequired(UserRole),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Scheduling conflict with {count} existing appointment(s)")]
    SchedulingConflict { count: usize },

    #[error("Mentor profile already exists for this user")]
    MentorProfileExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::MentorNotFound(_) => "UNKNOWN_MENTOR",
            Self::ServiceNotFound(_) => "UNKNOWN_SERVICE",
            Self::TimeSlotNotFound(_) => "UNKNOWN_TIME_SLOT",
            Self::BookingNotFound(_) => "UNKNOWN_BOOKING",
            Self::AppointmentNotFound(_) => "UNKNOWN_APPOINTMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidTimeRange => "INVALID_TIME_RANGE",
            Self::InvalidCapacity => "INVALID_CAPACITY",

            // Business Rules
            Self::TimeSlotUnavailable => "TIME_SLOT_UNAVAILABLE",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::InvalidPaymentTransition { .. } => "INVALID_PAYMENT_TRANSITION",
            Self::BookingFinalized(_) => "BOOKING_FINALIZED",
            Self::AppointmentFinalized(_) => "APPOINTMENT_FINALIZED",
            Self::ServiceInactive => "SERVICE_INACTIVE",
            Self::MentorInactive => "MENTOR_INACTIVE",
            Self::CannotBookSelf => "CANNOT_BOOK_SELF",
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::QueryRejected(_) => "QUERY_REJECTED",

            // Authorization
            Self::NotParticipant => "NOT_PARTICIPANT",
            Self::NotMentorOwner => "NOT_MENTOR_OWNER",
            Self::RoleRequired(_) => "ROLE_REQUIRED",

            // Conflict
            Self::SchedulingConflict { .. } => "SCHEDULING_CONFLICT",
            Self::MentorProfileExists => "MENTOR_PROFILE_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::MentorNotFound(_)
                | Self::ServiceNotFound(_)
                | Self::TimeSlotNotFound(_)
                | Self::BookingNotFound(_)
                | Self::AppointmentNotFound(_)
        )
    }

    /// Check if this is an input validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidTimeRange | Self::InvalidCapacity
        )
    }

    /// Check if this is a business rule rejection surfaced as a bad request
    pub fn is_bad_request(&self) -> bool {
        self.is_validation()
            || matches!(
                self,
                Self::TimeSlotUnavailable
                    | Self::InvalidStatusTransition { .. }
                    | Self::InvalidPaymentTransition { .. }
                    | Self::BookingFinalized(_)
                    | Self::AppointmentFinalized(_)
                    | Self::ServiceInactive
                    | Self::MentorInactive
                    | Self::CannotBookSelf
                    | Self::ConstraintViolation(_)
                    | Self::QueryRejected(_)
            )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotParticipant | Self::NotMentorOwner | Self::RoleRequired(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::SchedulingConflict { .. } | Self::MentorProfileExists
        )
    }

    /// HTTP-style status for this error
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authorization() {
            403
        } else if self.is_bad_request() {
            400
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}
