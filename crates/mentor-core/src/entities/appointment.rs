//! Appointment entity - ad-hoc sessions scheduled by time window rather than slot

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{BookingStatus, TimeWindow};

/// Appointment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub user_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub meeting_url: Option<String>,
    pub cancelled_by: Option<Uuid>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for an appointment insert
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub user_id: Uuid,
    pub window: TimeWindow,
    pub notes: Option<String>,
}

impl NewAppointment {
    pub fn into_appointment(self, now: DateTime<Utc>) -> Appointment {
        Appointment {
            id: self.id,
            mentor_id: self.mentor_id,
            user_id: self.user_id,
            scheduled_at: self.window.start,
            duration_minutes: self.window.minutes(),
            status: BookingStatus::Pending,
            notes: self.notes,
            meeting_url: None,
            cancelled_by: None,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Appointment {
    /// The occupied interval `[scheduled_at, scheduled_at + duration)`
    pub fn window(&self) -> Option<TimeWindow> {
        TimeWindow::from_duration(self.scheduled_at, self.duration_minutes)
    }

    /// Whether this appointment blocks `candidate` on the mentor's calendar
    pub fn conflicts_with(&self, candidate: &TimeWindow) -> bool {
        self.status.is_scheduled()
            && self.window().is_some_and(|w| w.overlaps(candidate))
    }

    pub fn ensure_modifiable(&self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::AppointmentFinalized(self.status));
        }
        Ok(())
    }

    pub fn cancel(&mut self, by: Uuid, reason: Option<String>, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_modifiable()?;
        self.status = BookingStatus::Cancelled;
        self.cancelled_by = Some(by);
        self.cancellation_reason = reason;
        self.updated_at = now;
        Ok(())
    }

    /// Move to a new window; the appointment goes back to pending
    pub fn reschedule(&mut self, window: TimeWindow, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_modifiable()?;
        self.scheduled_at = window.start;
        self.duration_minutes = window.minutes();
        self.status = BookingStatus::Pending;
        self.updated_at = now;
        Ok(())
    }

    pub fn check_transition(&self, next: BookingStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        Ok(())
    }
}
