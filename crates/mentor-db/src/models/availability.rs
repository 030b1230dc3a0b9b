//! Mentor availability database model

use chrono::{DateTime, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for mentor_availability table
#[derive(Debug, Clone, FromRow)]
pub struct AvailabilityModel {
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
