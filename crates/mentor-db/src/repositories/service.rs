//! PostgreSQL implementation of ServiceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use mentor_core::entities::ServiceOffering;
use mentor_core::traits::{RepoResult, ServiceRepository};

use crate::models::ServiceModel;

use super::error::{map_db_error, service_not_found};

/// PostgreSQL implementation of ServiceRepository
#[derive(Clone)]
pub struct PgServiceRepository {
    pool: PgPool,
}

impl PgServiceRepository {
    /// Create a new PgServiceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for PgServiceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ServiceOffering>> {
        let result = sqlx::query_as::<_, ServiceModel>(
            r"
            SELECT id, mentor_id, name, description, duration_minutes, price_cents, currency,
                   is_active, created_at, updated_at
            FROM services
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ServiceOffering::from))
    }

    #[instrument(skip(self))]
    async fn find_by_mentor(&self, mentor_id: Uuid, active_only: bool) -> RepoResult<Vec<ServiceOffering>> {
        let results = sqlx::query_as::<_, ServiceModel>(
            r"
            SELECT id, mentor_id, name, description, duration_minutes, price_cents, currency,
                   is_active, created_at, updated_at
            FROM services
            WHERE mentor_id = $1 AND (is_active OR NOT $2)
            ORDER BY price_cents, name
            ",
        )
        .bind(mentor_id)
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ServiceOffering::from).collect())
    }

    #[instrument(skip(self, service), fields(service_id = %service.id))]
    async fn create(&self, service: &ServiceOffering) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO services (id, mentor_id, name, description, duration_minutes, price_cents,
                                  currency, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(service.id)
        .bind(service.mentor_id)
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.duration_minutes)
        .bind(service.price_cents)
        .bind(&service.currency)
        .bind(service.is_active)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: Uuid, is_active: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE services SET is_active = $2, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(id)
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(service_not_found(id));
        }

        Ok(())
    }
}
