//! Weekly recurring availability template

use chrono::{DateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// One recurring weekly window; `day_of_week` 0 = Sunday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorAvailability {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub timezone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input row for a full availability replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAvailability {
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub timezone: String,
    pub is_active: bool,
}

impl NewAvailability {
    /// Request-level validation. The replace itself trusts its input.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0..=6).contains(&self.day_of_week) {
            return Err(DomainError::ValidationError(format!(
                "day_of_week must be between 0 and 6, got {}",
                self.day_of_week
            )));
        }
        if self.start_time >= self.end_time {
            return Err(DomainError::InvalidTimeRange);
        }
        if self.timezone.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "timezone must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_availability(self, mentor_id: Uuid, now: DateTime<Utc>) -> MentorAvailability {
        MentorAvailability {
            id: Uuid::new_v4(),
            mentor_id,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            timezone: self.timezone,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}
