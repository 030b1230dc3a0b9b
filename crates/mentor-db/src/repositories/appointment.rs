//! PostgreSQL implementation of AppointmentRepository
//!
//! Overlap is true interval intersection against each stored appointment's
//! own duration: `existing.start < candidate.end AND existing.end > candidate.start`.
//! Writers take the mentor's row lock so the scan and the write are atomic
//! with respect to other writers for the same mentor.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgConnection, PgExecutor, PgPool};
use tracing::{info, instrument};
use uuid::Uuid;

use mentor_core::entities::{Appointment, NewAppointment};
use mentor_core::error::DomainError;
use mentor_core::traits::{AppointmentQuery, AppointmentRepository, RepoResult};
use mentor_core::value_objects::{BookingStatus, TimeWindow};

use crate::mappers::appointments_from_models;
use crate::models::AppointmentModel;

use super::error::{appointment_not_found, map_db_error, mentor_not_found};

/// PostgreSQL implementation of AppointmentRepository
#[derive(Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    /// Create a new PgAppointmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn conflicting<'e, E>(
    executor: E,
    mentor_id: Uuid,
    window: TimeWindow,
    exclude: Option<Uuid>,
) -> RepoResult<Vec<Appointment>>
where
    E: PgExecutor<'e>,
{
    let results = sqlx::query_as::<_, AppointmentModel>(
        r"
        SELECT id, mentor_id, user_id, scheduled_at, duration_minutes, status, notes,
               meeting_url, cancelled_by, cancellation_reason, created_at, updated_at
        FROM appointments
        WHERE mentor_id = $1
          AND status IN ('pending', 'confirmed')
          AND scheduled_at < $3
          AND scheduled_at + make_interval(mins => duration_minutes) > $2
          AND ($4::uuid IS NULL OR id <> $4)
        ORDER BY scheduled_at
        ",
    )
    .bind(mentor_id)
    .bind(window.start)
    .bind(window.end)
    .bind(exclude)
    .fetch_all(executor)
    .await
    .map_err(map_db_error)?;

    appointments_from_models(results)
}

/// Serialize scheduling writes for one mentor
async fn lock_mentor(conn: &mut PgConnection, mentor_id: Uuid) -> RepoResult<()> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM mentors WHERE id = $1 FOR NO KEY UPDATE")
        .bind(mentor_id)
        .fetch_optional(conn)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| mentor_not_found(mentor_id))?;
    Ok(())
}

async fn lock_appointment(conn: &mut PgConnection, id: Uuid) -> RepoResult<Appointment> {
    let model = sqlx::query_as::<_, AppointmentModel>(
        r"
        SELECT id, mentor_id, user_id, scheduled_at, duration_minutes, status, notes,
               meeting_url, cancelled_by, cancellation_reason, created_at, updated_at
        FROM appointments
        WHERE id = $1
        FOR UPDATE
        ",
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(map_db_error)?
    .ok_or_else(|| appointment_not_found(id))?;

    Appointment::try_from(model)
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Appointment>> {
        let result = sqlx::query_as::<_, AppointmentModel>(
            r"
            SELECT id, mentor_id, user_id, scheduled_at, duration_minutes, status, notes,
                   meeting_url, cancelled_by, cancellation_reason, created_at, updated_at
            FROM appointments
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Appointment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &AppointmentQuery) -> RepoResult<Vec<Appointment>> {
        let results = sqlx::query_as::<_, AppointmentModel>(
            r"
            SELECT id, mentor_id, user_id, scheduled_at, duration_minutes, status, notes,
                   meeting_url, cancelled_by, cancellation_reason, created_at, updated_at
            FROM appointments
            WHERE (($1::uuid IS NULL AND $2::uuid IS NULL)
                   OR user_id = $1
                   OR mentor_id = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY scheduled_at DESC
            LIMIT $4 OFFSET $5
            ",
        )
        .bind(query.user_id)
        .bind(query.mentor_id)
        .bind(query.status.map(BookingStatus::as_str))
        .bind(query.limit.clamp(1, 100))
        .bind(query.offset.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        appointments_from_models(results)
    }

    #[instrument(skip(self))]
    async fn find_conflicting(
        &self,
        mentor_id: Uuid,
        window: TimeWindow,
        exclude: Option<Uuid>,
    ) -> RepoResult<Vec<Appointment>> {
        conflicting(&self.pool, mentor_id, window, exclude).await
    }

    #[instrument(skip(self, appointment), fields(mentor_id = %appointment.mentor_id))]
    async fn create_checked(&self, appointment: NewAppointment) -> RepoResult<Appointment> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_mentor(&mut tx, appointment.mentor_id).await?;

        let conflicts =
            conflicting(&mut *tx, appointment.mentor_id, appointment.window, None).await?;
        if !conflicts.is_empty() {
            return Err(DomainError::SchedulingConflict {
                count: conflicts.len(),
            });
        }

        let created = appointment.into_appointment(Utc::now());
        sqlx::query(
            r"
            INSERT INTO appointments (id, mentor_id, user_id, scheduled_at, duration_minutes,
                                      status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(created.id)
        .bind(created.mentor_id)
        .bind(created.user_id)
        .bind(created.scheduled_at)
        .bind(created.duration_minutes)
        .bind(created.status.as_str())
        .bind(&created.notes)
        .bind(created.created_at)
        .bind(created.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        info!(appointment_id = %created.id, "Appointment created");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn reschedule_checked(&self, id: Uuid, window: TimeWindow) -> RepoResult<Appointment> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut appointment = lock_appointment(&mut tx, id).await?;
        appointment.ensure_modifiable()?;
        lock_mentor(&mut tx, appointment.mentor_id).await?;

        let conflicts = conflicting(&mut *tx, appointment.mentor_id, window, Some(id)).await?;
        if !conflicts.is_empty() {
            return Err(DomainError::SchedulingConflict {
                count: conflicts.len(),
            });
        }

        appointment.reschedule(window, Utc::now())?;
        sqlx::query(
            r"
            UPDATE appointments
            SET scheduled_at = $2, duration_minutes = $3, status = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(appointment.scheduled_at)
        .bind(appointment.duration_minutes)
        .bind(appointment.status.as_str())
        .bind(appointment.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        info!(scheduled_at = %appointment.scheduled_at, "Appointment rescheduled");
        Ok(appointment)
    }

    #[instrument(skip(self, reason))]
    async fn cancel(&self, id: Uuid, cancelled_by: Uuid, reason: Option<String>) -> RepoResult<Appointment> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut appointment = lock_appointment(&mut tx, id).await?;
        appointment.cancel(cancelled_by, reason, Utc::now())?;

        sqlx::query(
            r"
            UPDATE appointments
            SET status = $2, cancelled_by = $3, cancellation_reason = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(appointment.status.as_str())
        .bind(appointment.cancelled_by)
        .bind(&appointment.cancellation_reason)
        .bind(appointment.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(appointment)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> RepoResult<Appointment> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut appointment = lock_appointment(&mut tx, id).await?;
        appointment.check_transition(status)?;
        appointment.status = status;
        appointment.updated_at = Utc::now();

        sqlx::query("UPDATE appointments SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .bind(appointment.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgAppointmentRepository>();
    }
}
