//! Repository traits (ports) - define the interface for data access
//!
//! One typed trait per aggregate. The domain layer defines what it needs,
//! and the infrastructure layer provides the implementation. Every
//! multi-step mutation below is a single atomic unit in the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{
    Appointment, Booking, Mentor, MentorAvailability, NewAppointment, NewAvailability,
    NewBooking, ServiceOffering, TimeSlot, User,
};
use crate::error::DomainError;
use crate::value_objects::{BookingStatus, PaymentStatus, TimeWindow};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Insert or refresh the profile mirrored from the identity provider.
    /// Returns the stored row (with its original `created_at`).
    async fn upsert(&self, user: &User) -> RepoResult<User>;
}

// ============================================================================
// Mentor Repository
// ============================================================================

/// Filters for browsing mentors
#[derive(Debug, Clone, Default)]
pub struct MentorQuery {
    /// Case-insensitive match on title or bio
    pub search: Option<String>,
    /// Mentor must list this expertise tag
    pub expertise: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait MentorRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Mentor>>;

    async fn find_by_user_id(&self, user_id: Uuid) -> RepoResult<Option<Mentor>>;

    /// Create a profile; a second profile for the same user is a conflict
    async fn create(&self, mentor: &Mentor) -> RepoResult<()>;

    async fn update(&self, mentor: &Mentor) -> RepoResult<()>;

    /// Active mentors matching the query, newest first
    async fn search(&self, query: &MentorQuery) -> RepoResult<Vec<Mentor>>;
}

// ============================================================================
// Service Offering Repository
// ============================================================================

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ServiceOffering>>;

    /// Offerings of a mentor, optionally only active ones
    async fn find_by_mentor(&self, mentor_id: Uuid, active_only: bool) -> RepoResult<Vec<ServiceOffering>>;

    async fn create(&self, service: &ServiceOffering) -> RepoResult<()>;

    async fn set_active(&self, id: Uuid, is_active: bool) -> RepoResult<()>;
}

// ============================================================================
// Time Slot Repository
// ============================================================================

/// Range filter for slot listings
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<TimeSlot>>;

    async fn create(&self, slot: &TimeSlot) -> RepoResult<()>;

    /// Active, not fully booked slots of a mentor starting after `now`
    async fn find_available(&self, mentor_id: Uuid, query: SlotQuery, now: DateTime<Utc>)
        -> RepoResult<Vec<TimeSlot>>;

    /// Stop offering the slot; existing bookings are unaffected
    async fn deactivate(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Booking Repository (transaction manager)
// ============================================================================

/// Listing filter for bookings.
///
/// `student_id` and `mentor_id` combine with OR so a user who is both a
/// student and a mentor sees both sides. Both unset lists everything.
#[derive(Debug, Clone, Default)]
pub struct BookingQuery {
    pub student_id: Option<Uuid>,
    pub mentor_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Booking>>;

    async fn find_many(&self, query: &BookingQuery) -> RepoResult<Vec<Booking>>;

    /// Re-read the slot under lock, check capacity, insert the booking and
    /// increment the slot counter. Fails with `TimeSlotUnavailable` when the
    /// slot is missing, inactive, full, or belongs to another mentor/service.
    async fn create_with_slot_reservation(&self, booking: NewBooking) -> RepoResult<Booking>;

    /// Cancel a non-terminal booking and recompute its slot counter from the
    /// live booking count. Terminal bookings fail with `BookingFinalized`
    /// and leave the slot untouched.
    async fn cancel(&self, id: Uuid, cancelled_by: Uuid, reason: Option<String>) -> RepoResult<Booking>;

    /// Apply a lifecycle transition other than cancellation
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> RepoResult<Booking>;

    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> RepoResult<Booking>;
}

// ============================================================================
// Appointment Repository (conflict detector)
// ============================================================================

/// Listing filter for appointments; `user_id` and `mentor_id` combine with OR
#[derive(Debug, Clone, Default)]
pub struct AppointmentQuery {
    pub user_id: Option<Uuid>,
    pub mentor_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Appointment>>;

    async fn find_many(&self, query: &AppointmentQuery) -> RepoResult<Vec<Appointment>>;

    /// Pending or confirmed appointments of the mentor whose stored interval
    /// intersects `window`
    async fn find_conflicting(
        &self,
        mentor_id: Uuid,
        window: TimeWindow,
        exclude: Option<Uuid>,
    ) -> RepoResult<Vec<Appointment>>;

    /// Insert after a conflict scan; both run under the mentor's row lock.
    /// Fails with `SchedulingConflict` when the scan is non-empty.
    async fn create_checked(&self, appointment: NewAppointment) -> RepoResult<Appointment>;

    /// Move an appointment, excluding itself from the conflict scan
    async fn reschedule_checked(&self, id: Uuid, window: TimeWindow) -> RepoResult<Appointment>;

    async fn cancel(&self, id: Uuid, cancelled_by: Uuid, reason: Option<String>) -> RepoResult<Appointment>;

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> RepoResult<Appointment>;
}

// ============================================================================
// Availability Repository (replacer)
// ============================================================================

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Rows ordered by day of week, then start time
    async fn find_by_mentor(&self, mentor_id: Uuid) -> RepoResult<Vec<MentorAvailability>>;

    /// Delete every row of the mentor and insert `slots`, atomically.
    /// An empty list leaves the mentor with no availability.
    async fn replace_all(
        &self,
        mentor_id: Uuid,
        slots: Vec<NewAvailability>,
    ) -> RepoResult<Vec<MentorAvailability>>;
}
