//! PostgreSQL implementation of BookingRepository
//!
//! Capacity is reserved under a row lock on the slot: the slot is re-read
//! with `FOR UPDATE`, the booking inserted, and the counter increment is
//! guarded by `current_bookings < max_bookings`. Concurrent reservations on
//! one slot are serialized by the lock; reservations on different slots do
//! not contend.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};
use uuid::Uuid;

use mentor_core::entities::{Booking, NewBooking, TimeSlot};
use mentor_core::error::DomainError;
use mentor_core::traits::{BookingQuery, BookingRepository, RepoResult};
use mentor_core::value_objects::{BookingStatus, PaymentStatus};

use crate::mappers::bookings_from_models;
use crate::models::{BookingModel, TimeSlotModel};

use super::error::{booking_not_found, map_db_error};

/// PostgreSQL implementation of BookingRepository
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new PgBookingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lock a booking row for the rest of the transaction
async fn lock_booking(conn: &mut PgConnection, id: Uuid) -> RepoResult<Booking> {
    let model = sqlx::query_as::<_, BookingModel>(
        r"
        SELECT id, student_id, mentor_id, service_id, time_slot_id, status, payment_status,
               price_cents, platform_fee_cents, mentor_earnings_cents, currency, student_notes,
               mentor_notes, meeting_url, cancelled_by, cancellation_reason, cancelled_at,
               created_at, updated_at
        FROM bookings
        WHERE id = $1
        FOR UPDATE
        ",
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(map_db_error)?
    .ok_or_else(|| booking_not_found(id))?;

    Booking::try_from(model)
}

/// Reset a slot's counter from its live (non-cancelled) bookings
async fn recompute_slot_counter(conn: &mut PgConnection, slot_id: Uuid) -> RepoResult<()> {
    // Lock first so the count below sees every committed reservation
    sqlx::query("SELECT id FROM time_slots WHERE id = $1 FOR UPDATE")
        .bind(slot_id)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

    sqlx::query(
        r"
        UPDATE time_slots AS s
        SET current_bookings = LEAST(live.n, s.max_bookings),
            is_booked = LEAST(live.n, s.max_bookings) >= s.max_bookings,
            updated_at = NOW()
        FROM (
            SELECT COUNT(*)::int AS n
            FROM bookings
            WHERE time_slot_id = $1 AND status <> 'cancelled'
        ) AS live
        WHERE s.id = $1
        ",
    )
    .bind(slot_id)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        let result = sqlx::query_as::<_, BookingModel>(
            r"
            SELECT id, student_id, mentor_id, service_id, time_slot_id, status, payment_status,
                   price_cents, platform_fee_cents, mentor_earnings_cents, currency, student_notes,
                   mentor_notes, meeting_url, cancelled_by, cancellation_reason, cancelled_at,
                   created_at, updated_at
            FROM bookings
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Booking::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &BookingQuery) -> RepoResult<Vec<Booking>> {
        let results = sqlx::query_as::<_, BookingModel>(
            r"
            SELECT id, student_id, mentor_id, service_id, time_slot_id, status, payment_status,
                   price_cents, platform_fee_cents, mentor_earnings_cents, currency, student_notes,
                   mentor_notes, meeting_url, cancelled_by, cancellation_reason, cancelled_at,
                   created_at, updated_at
            FROM bookings
            WHERE (($1::uuid IS NULL AND $2::uuid IS NULL)
                   OR student_id = $1
                   OR mentor_id = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            ",
        )
        .bind(query.student_id)
        .bind(query.mentor_id)
        .bind(query.status.map(BookingStatus::as_str))
        .bind(query.limit.clamp(1, 100))
        .bind(query.offset.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        bookings_from_models(results)
    }

    #[instrument(skip(self, booking), fields(booking_id = %booking.id, slot_id = %booking.time_slot_id))]
    async fn create_with_slot_reservation(&self, booking: NewBooking) -> RepoResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Re-read the slot inside the transaction, holding its row lock
        let slot = sqlx::query_as::<_, TimeSlotModel>(
            r"
            SELECT id, mentor_id, service_id, start_date_time, end_date_time, max_bookings,
                   current_bookings, is_booked, is_active, created_at, updated_at
            FROM time_slots
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(booking.time_slot_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(TimeSlot::from)
        .ok_or(DomainError::TimeSlotUnavailable)?;

        slot.ensure_bookable(booking.mentor_id, booking.service_id)?;

        let now = Utc::now();
        let model = sqlx::query_as::<_, BookingModel>(
            r"
            INSERT INTO bookings (id, student_id, mentor_id, service_id, time_slot_id, status,
                                  payment_status, price_cents, platform_fee_cents,
                                  mentor_earnings_cents, currency, student_notes,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING id, student_id, mentor_id, service_id, time_slot_id, status, payment_status,
                      price_cents, platform_fee_cents, mentor_earnings_cents, currency,
                      student_notes, mentor_notes, meeting_url, cancelled_by,
                      cancellation_reason, cancelled_at, created_at, updated_at
            ",
        )
        .bind(booking.id)
        .bind(booking.student_id)
        .bind(booking.mentor_id)
        .bind(booking.service_id)
        .bind(booking.time_slot_id)
        .bind(BookingStatus::Pending.as_str())
        .bind(PaymentStatus::Pending.as_str())
        .bind(booking.price.price_cents)
        .bind(booking.price.platform_fee_cents)
        .bind(booking.price.mentor_earnings_cents)
        .bind(&booking.price.currency)
        .bind(&booking.student_notes)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let reserved = sqlx::query(
            r"
            UPDATE time_slots
            SET current_bookings = current_bookings + 1,
                is_booked = current_bookings + 1 >= max_bookings,
                updated_at = NOW()
            WHERE id = $1 AND is_active AND current_bookings < max_bookings
            ",
        )
        .bind(booking.time_slot_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if reserved.rows_affected() == 0 {
            // Dropping the transaction rolls back the insert
            return Err(DomainError::TimeSlotUnavailable);
        }

        tx.commit().await.map_err(map_db_error)?;

        info!(
            student_id = %booking.student_id,
            remaining = slot.remaining_capacity() - 1,
            "Booking created"
        );
        Booking::try_from(model)
    }

    #[instrument(skip(self, reason))]
    async fn cancel(&self, id: Uuid, cancelled_by: Uuid, reason: Option<String>) -> RepoResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut booking = lock_booking(&mut tx, id).await?;
        let now = Utc::now();
        booking.cancel(cancelled_by, reason, now)?;

        sqlx::query(
            r"
            UPDATE bookings
            SET status = $2, cancelled_by = $3, cancellation_reason = $4, cancelled_at = $5,
                updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(booking.status.as_str())
        .bind(booking.cancelled_by)
        .bind(&booking.cancellation_reason)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        recompute_slot_counter(&mut tx, booking.time_slot_id).await?;

        tx.commit().await.map_err(map_db_error)?;

        info!(slot_id = %booking.time_slot_id, "Booking cancelled");
        Ok(booking)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> RepoResult<Booking> {
        if status == BookingStatus::Cancelled {
            return Err(DomainError::ValidationError(
                "cancellation must go through cancel".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut booking = lock_booking(&mut tx, id).await?;
        booking.check_transition(status)?;
        booking.status = status;
        booking.updated_at = Utc::now();

        sqlx::query("UPDATE bookings SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .bind(booking.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(booking)
    }

    #[instrument(skip(self))]
    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> RepoResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut booking = lock_booking(&mut tx, id).await?;
        booking.set_payment_status(status)?;

        sqlx::query("UPDATE bookings SET payment_status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .bind(booking.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(booking)
    }
}
