//! PostgreSQL implementation of AvailabilityRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use mentor_core::entities::{MentorAvailability, NewAvailability};
use mentor_core::traits::{AvailabilityRepository, RepoResult};

use crate::mappers::AvailabilityColumns;
use crate::models::AvailabilityModel;

use super::error::{map_db_error, mentor_not_found};

/// PostgreSQL implementation of AvailabilityRepository
#[derive(Clone)]
pub struct PgAvailabilityRepository {
    pool: PgPool,
}

impl PgAvailabilityRepository {
    /// Create a new PgAvailabilityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for PgAvailabilityRepository {
    #[instrument(skip(self))]
    async fn find_by_mentor(&self, mentor_id: Uuid) -> RepoResult<Vec<MentorAvailability>> {
        let results = sqlx::query_as::<_, AvailabilityModel>(
            r"
            SELECT id, mentor_id, day_of_week, start_time, end_time, timezone, is_active,
                   created_at, updated_at
            FROM mentor_availability
            WHERE mentor_id = $1
            ORDER BY day_of_week, start_time
            ",
        )
        .bind(mentor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MentorAvailability::from).collect())
    }

    #[instrument(skip(self, slots), fields(count = slots.len()))]
    async fn replace_all(
        &self,
        mentor_id: Uuid,
        slots: Vec<NewAvailability>,
    ) -> RepoResult<Vec<MentorAvailability>> {
        let cols = AvailabilityColumns::new(slots);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Concurrent replaces for one mentor queue here; without it both
        // DELETEs miss the other's inserts and the two sets merge.
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM mentors WHERE id = $1 FOR NO KEY UPDATE")
            .bind(mentor_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| mentor_not_found(mentor_id))?;

        let removed = sqlx::query("DELETE FROM mentor_availability WHERE mentor_id = $1")
            .bind(mentor_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        let mut inserted = if cols.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, AvailabilityModel>(
                r"
                INSERT INTO mentor_availability (id, mentor_id, day_of_week, start_time, end_time,
                                                 timezone, is_active)
                SELECT id, $1, day_of_week, start_time, end_time, timezone, is_active
                FROM UNNEST($2::uuid[], $3::int2[], $4::time[], $5::time[], $6::text[], $7::bool[])
                     AS t(id, day_of_week, start_time, end_time, timezone, is_active)
                RETURNING id, mentor_id, day_of_week, start_time, end_time, timezone, is_active,
                          created_at, updated_at
                ",
            )
            .bind(mentor_id)
            .bind(&cols.ids)
            .bind(&cols.days)
            .bind(&cols.start_times)
            .bind(&cols.end_times)
            .bind(&cols.timezones)
            .bind(&cols.active)
            .fetch_all(&mut *tx)
            .await
            .map_err(map_db_error)?
        };

        tx.commit().await.map_err(map_db_error)?;

        info!(removed, inserted = inserted.len(), "Availability replaced");
        inserted.sort_by_key(|m| (m.day_of_week, m.start_time));
        Ok(inserted.into_iter().map(MentorAvailability::from).collect())
    }
}
