//! Mentor profile and the services a mentor offers

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Mentor profile entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mentor {
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

impl Mentor {
    /// Create a new, unverified mentor profile
    pub fn new(id: Uuid, user_id: Uuid, title: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            title,
            bio: None,
            expertise: Vec::new(),
            hourly_rate_cents: 0,
            currency: "USD".to_string(),
            timezone: "UTC".to_string(),
            is_verified: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the given user owns this profile
    #[inline]
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// A bookable offering published by a mentor (e.g. "60 min career review")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOffering {
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

impl ServiceOffering {
    pub fn new(
        id: Uuid,
        mentor_id: Uuid,
        name: String,
        duration_minutes: i32,
        price_cents: i64,
        currency: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            mentor_id,
            name,
            description: None,
            duration_minutes,
            price_cents,
            currency,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Check the offering is active and belongs to `mentor_id`
    #[inline]
    pub fn is_bookable_with(&self, mentor_id: Uuid) -> bool {
        self.is_active && self.mentor_id == mentor_id
    }
}
