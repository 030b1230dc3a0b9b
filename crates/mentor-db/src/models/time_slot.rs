//! Time slot database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for time_slots table
#[derive(Debug, Clone, FromRow)]
pub struct TimeSlotModel {
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
