//! TimeSlot entity - a capacity-bearing, bookable window on a mentor's calendar

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::TimeWindow;

/// TimeSlot entity
///
/// Invariants: `0 <= current_bookings <= max_bookings` and
/// `is_booked == (current_bookings >= max_bookings)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub service_id: Uuid,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub max_bookings: i32,
    pub current_bookings: i32,
    pub is_booked: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeSlot {
    /// Create an empty, active slot
    pub fn new(
        id: Uuid,
        mentor_id: Uuid,
        service_id: Uuid,
        window: TimeWindow,
        max_bookings: i32,
    ) -> Result<Self, DomainError> {
        if max_bookings < 1 {
            return Err(DomainError::InvalidCapacity);
        }
        let now = Utc::now();
        Ok(Self {
            id,
            mentor_id,
            service_id,
            start_date_time: window.start,
            end_date_time: window.end,
            max_bookings,
            current_bookings: 0,
            is_booked: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn window(&self) -> Option<TimeWindow> {
        TimeWindow::new(self.start_date_time, self.end_date_time)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.current_bookings >= self.max_bookings
    }

    #[inline]
    pub fn remaining_capacity(&self) -> i32 {
        (self.max_bookings - self.current_bookings).max(0)
    }

    /// Active and below capacity
    #[inline]
    pub fn is_available(&self) -> bool {
        self.is_active && !self.is_full()
    }

    /// Check the slot can take one more booking for `mentor_id`/`service_id`.
    ///
    /// A slot that belongs to another mentor or service is reported the same
    /// way as a full one.
    pub fn ensure_bookable(&self, mentor_id: Uuid, service_id: Uuid) -> Result<(), DomainError> {
        if !self.is_available() || self.mentor_id != mentor_id || self.service_id != service_id {
            return Err(DomainError::TimeSlotUnavailable);
        }
        Ok(())
    }

    /// Take one unit of capacity
    pub fn reserve(&mut self) -> Result<(), DomainError> {
        if !self.is_available() {
            return Err(DomainError::TimeSlotUnavailable);
        }
        self.current_bookings += 1;
        self.is_booked = self.is_full();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reset the counter from the number of live (non-cancelled) bookings
    pub fn recompute(&mut self, live_bookings: i64) {
        let live = i32::try_from(live_bookings).unwrap_or(i32::MAX);
        self.current_bookings = live.clamp(0, self.max_bookings);
        self.is_booked = self.is_full();
        self.updated_at = Utc::now();
    }
}
