//! Mentor and service offering database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for mentors table
#[derive(Debug, Clone, FromRow)]
pub struct MentorModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub bio: Option<String>,
    pub expertise: Vec<String>,
    pub hourly_rate_cents: i64,
    pub currency: String,
    pub timezone: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for services table
#[derive(Debug, Clone, FromRow)]
pub struct ServiceModel {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
