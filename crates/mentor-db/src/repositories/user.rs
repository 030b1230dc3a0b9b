//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use mentor_core::entities::User;
use mentor_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, name, role, image_url, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn upsert(&self, user: &User) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (id, email, name, role, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
               SET email = EXCLUDED.email,
                   name = EXCLUDED.name,
                   role = EXCLUDED.role,
                   image_url = EXCLUDED.image_url,
                   updated_at = NOW()
            RETURNING id, email, name, role, image_url, created_at, updated_at
            ",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(&user.image_url)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        User::try_from(model)
    }
}
