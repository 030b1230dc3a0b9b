//! Mentor / service offering entity <-> model mappers

use mentor_core::entities::{Mentor, ServiceOffering};

use crate::models::{MentorModel, ServiceModel};

impl From<MentorModel> for Mentor {
    fn from(model: MentorModel) -> Self {
        Mentor {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            bio: model.bio,
            expertise: model.expertise,
            hourly_rate_cents: model.hourly_rate_cents,
            currency: model.currency,
            timezone: model.timezone,
            is_verified: model.is_verified,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ServiceModel> for ServiceOffering {
    fn from(model: ServiceModel) -> Self {
        ServiceOffering {
            id: model.id,
            mentor_id: model.mentor_id,
            name: model.name,
            description: model.description,
            duration_minutes: model.duration_minutes,
            price_cents: model.price_cents,
            currency: model.currency,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
