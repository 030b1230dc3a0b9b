//! PostgreSQL implementation of TimeSlotRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use mentor_core::entities::TimeSlot;
use mentor_core::traits::{RepoResult, SlotQuery, TimeSlotRepository};

use crate::models::TimeSlotModel;

use super::error::{map_db_error, time_slot_not_found};

/// PostgreSQL implementation of TimeSlotRepository
#[derive(Clone)]
pub struct PgTimeSlotRepository {
    pool: PgPool,
}

impl PgTimeSlotRepository {
    /// Create a new PgTimeSlotRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeSlotRepository for PgTimeSlotRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<TimeSlot>> {
        let result = sqlx::query_as::<_, TimeSlotModel>(
            r"
            SELECT id, mentor_id, service_id, start_date_time, end_date_time, max_bookings,
                   current_bookings, is_booked, is_active, created_at, updated_at
            FROM time_slots
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TimeSlot::from))
    }

    #[instrument(skip(self, slot), fields(slot_id = %slot.id))]
    async fn create(&self, slot: &TimeSlot) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO time_slots (id, mentor_id, service_id, start_date_time, end_date_time,
                                    max_bookings, current_bookings, is_booked, is_active,
                                    created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(slot.id)
        .bind(slot.mentor_id)
        .bind(slot.service_id)
        .bind(slot.start_date_time)
        .bind(slot.end_date_time)
        .bind(slot.max_bookings)
        .bind(slot.current_bookings)
        .bind(slot.is_booked)
        .bind(slot.is_active)
        .bind(slot.created_at)
        .bind(slot.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_available(
        &self,
        mentor_id: Uuid,
        query: SlotQuery,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<TimeSlot>> {
        let results = sqlx::query_as::<_, TimeSlotModel>(
            r"
            SELECT id, mentor_id, service_id, start_date_time, end_date_time, max_bookings,
                   current_bookings, is_booked, is_active, created_at, updated_at
            FROM time_slots
            WHERE mentor_id = $1
              AND is_active
              AND NOT is_booked
              AND start_date_time > $2
              AND ($3::timestamptz IS NULL OR start_date_time >= $3)
              AND ($4::timestamptz IS NULL OR start_date_time < $4)
            ORDER BY start_date_time
            LIMIT 500
            ",
        )
        .bind(mentor_id)
        .bind(now)
        .bind(query.from)
        .bind(query.to)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(TimeSlot::from).collect())
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE time_slots SET is_active = FALSE, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(time_slot_not_found(id));
        }

        Ok(())
    }
}
