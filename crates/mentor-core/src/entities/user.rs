//! User entity - a marketplace account mirrored from the identity provider

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::UserRole;

/// User entity
///
/// The identity provider owns credentials; this row only mirrors the
/// profile fields the marketplace needs and is upserted on profile sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Uuid, email: String, name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            name,
            role,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the avatar url
    pub fn with_image(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
