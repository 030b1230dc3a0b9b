//! Error handling utilities for repositories

use mentor_core::error::DomainError;
use sqlx::error::ErrorKind;
use sqlx::Error as SqlxError;
use uuid::Uuid;

/// Convert SQLx error to DomainError.
///
/// Integrity violations (foreign key, check, not-null, unique) surface as
/// `ConstraintViolation` and any other statement the server refuses as
/// `QueryRejected`, both with the server's message. Pool, IO, TLS and
/// protocol failures stay infrastructure errors.
pub fn map_db_error(e: SqlxError) -> DomainError {
    let Some(db_err) = e.as_database_error() else {
        return DomainError::DatabaseError(e.to_string());
    };

    match db_err.kind() {
        ErrorKind::ForeignKeyViolation
        | ErrorKind::CheckViolation
        | ErrorKind::NotNullViolation
        | ErrorKind::UniqueViolation => {
            let name = db_err.constraint().unwrap_or("unnamed");
            DomainError::ConstraintViolation(format!("{name}: {}", db_err.message()))
        }
        _ => {
            let code = db_err.code().unwrap_or_default();
            DomainError::QueryRejected(format!("{code}: {}", db_err.message()))
        }
    }
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

pub fn mentor_not_found(id: Uuid) -> DomainError {
    DomainError::MentorNotFound(id)
}

pub fn service_not_found(id: Uuid) -> DomainError {
    DomainError::ServiceNotFound(id)
}

pub fn time_slot_not_found(id: Uuid) -> DomainError {
    DomainError::TimeSlotNotFound(id)
}

pub fn booking_not_found(id: Uuid) -> DomainError {
    DomainError::BookingNotFound(id)
}

pub fn appointment_not_found(id: Uuid) -> DomainError {
    DomainError::AppointmentNotFound(id)
}
