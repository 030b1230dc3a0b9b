//! User entity <-> model mapper

use mentor_core::entities::User;
use mentor_core::error::DomainError;
use mentor_core::value_objects::UserRole;

use crate::models::UserModel;

use super::parse_column;

/// Convert UserModel to User entity
impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            email: model.email,
            name: model.name,
            role: parse_column::<UserRole>("users.role", &model.role)?,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
