//! MentorAvailability entity <-> model mapper

use mentor_core::entities::{MentorAvailability, NewAvailability};
use uuid::Uuid;

use crate::models::AvailabilityModel;

impl From<AvailabilityModel> for MentorAvailability {
    fn from(model: AvailabilityModel) -> Self {
        MentorAvailability {
            id: model.id,
            mentor_id: model.mentor_id,
            day_of_week: model.day_of_week,
            start_time: model.start_time,
            end_time: model.end_time,
            timezone: model.timezone,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Column-wise arrays for a single `UNNEST` bulk insert
#[derive(Debug, Default)]
pub struct AvailabilityColumns {
    pub ids: Vec<Uuid>,
    pub days: Vec<i16>,
    pub start_times: Vec<chrono::NaiveTime>,
    pub end_times: Vec<chrono::NaiveTime>,
    pub timezones: Vec<String>,
    pub active: Vec<bool>,
}

impl AvailabilityColumns {
    pub fn new(slots: Vec<NewAvailability>) -> Self {
        let mut cols = Self {
            ids: Vec::with_capacity(slots.len()),
            days: Vec::with_capacity(slots.len()),
            start_times: Vec::with_capacity(slots.len()),
            end_times: Vec::with_capacity(slots.len()),
            timezones: Vec::with_capacity(slots.len()),
            active: Vec::with_capacity(slots.len()),
        };
        for slot in slots {
            cols.ids.push(Uuid::new_v4());
            cols.days.push(slot.day_of_week);
            cols.start_times.push(slot.start_time);
            cols.end_times.push(slot.end_time);
            cols.timezones.push(slot.timezone);
            cols.active.push(slot.is_active);
        }
        cols
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
