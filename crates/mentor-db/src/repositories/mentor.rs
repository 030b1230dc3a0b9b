//! PostgreSQL implementation of MentorRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use mentor_core::entities::Mentor;
use mentor_core::error::DomainError;
use mentor_core::traits::{MentorQuery, MentorRepository, RepoResult};

use crate::models::MentorModel;

use super::error::{map_db_error, map_unique_violation, mentor_not_found};

/// PostgreSQL implementation of MentorRepository
#[derive(Clone)]
pub struct PgMentorRepository {
    pool: PgPool,
}

impl PgMentorRepository {
    /// Create a new PgMentorRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build an `ILIKE` pattern matching `term` anywhere, with wildcards escaped
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl MentorRepository for PgMentorRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Mentor>> {
        let result = sqlx::query_as::<_, MentorModel>(
            r"
            SELECT id, user_id, title, bio, expertise, hourly_rate_cents, currency, timezone,
                   is_verified, is_active, created_at, updated_at
            FROM mentors
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Mentor::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user_id(&self, user_id: Uuid) -> RepoResult<Option<Mentor>> {
        let result = sqlx::query_as::<_, MentorModel>(
            r"
            SELECT id, user_id, title, bio, expertise, hourly_rate_cents, currency, timezone,
                   is_verified, is_active, created_at, updated_at
            FROM mentors
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Mentor::from))
    }

    #[instrument(skip(self, mentor), fields(mentor_id = %mentor.id))]
    async fn create(&self, mentor: &Mentor) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO mentors (id, user_id, title, bio, expertise, hourly_rate_cents, currency,
                                 timezone, is_verified, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(mentor.id)
        .bind(mentor.user_id)
        .bind(&mentor.title)
        .bind(&mentor.bio)
        .bind(&mentor.expertise)
        .bind(mentor.hourly_rate_cents)
        .bind(&mentor.currency)
        .bind(&mentor.timezone)
        .bind(mentor.is_verified)
        .bind(mentor.is_active)
        .bind(mentor.created_at)
        .bind(mentor.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::MentorProfileExists))?;

        Ok(())
    }

    #[instrument(skip(self, mentor), fields(mentor_id = %mentor.id))]
    async fn update(&self, mentor: &Mentor) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE mentors
            SET title = $2, bio = $3, expertise = $4, hourly_rate_cents = $5, currency = $6,
                timezone = $7, is_verified = $8, is_active = $9, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(mentor.id)
        .bind(&mentor.title)
        .bind(&mentor.bio)
        .bind(&mentor.expertise)
        .bind(mentor.hourly_rate_cents)
        .bind(&mentor.currency)
        .bind(&mentor.timezone)
        .bind(mentor.is_verified)
        .bind(mentor.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(mentor_not_found(mentor.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &MentorQuery) -> RepoResult<Vec<Mentor>> {
        let search = query.search.as_deref().map(contains_pattern);

        let results = sqlx::query_as::<_, MentorModel>(
            r"
            SELECT id, user_id, title, bio, expertise, hourly_rate_cents, currency, timezone,
                   is_verified, is_active, created_at, updated_at
            FROM mentors
            WHERE is_active
              AND ($1::text IS NULL
                   OR title ILIKE $1
                   OR bio ILIKE $1
                   OR EXISTS (SELECT 1 FROM unnest(expertise) AS tag WHERE tag ILIKE $1))
              AND ($2::text IS NULL
                   OR EXISTS (SELECT 1 FROM unnest(expertise) AS tag WHERE LOWER(tag) = LOWER($2)))
            ORDER BY is_verified DESC, created_at DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(search)
        .bind(&query.expertise)
        .bind(query.limit.clamp(1, 100))
        .bind(query.offset.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Mentor::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMentorRepository>();
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("rust"), "%rust%");
        assert_eq!(contains_pattern("100%_"), "%100\\%\\_%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
