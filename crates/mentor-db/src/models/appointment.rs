//! Appointment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for appointments table
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentModel {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub user_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    pub notes: Option<String>,
    pub meeting_url: Option<String>,
    pub cancelled_by: Option<Uuid>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
