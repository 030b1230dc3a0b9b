//! Entity to model mappers
//!
//! Conversions between domain entities (mentor-core) and database models.
//! - `From<Model> for Entity` / `TryFrom<Model> for Entity`: rows to domain objects
//! - `AvailabilityColumns`: column arrays for bulk inserts

mod appointment;
mod availability;
mod booking;
mod mentor;
mod time_slot;
mod user;

use std::str::FromStr;

use mentor_core::error::DomainError;

pub use appointment::appointments_from_models;
pub use availability::AvailabilityColumns;
pub use booking::bookings_from_models;

/// Parse a text-encoded enum column
pub(crate) fn parse_column<T>(column: &'static str, raw: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| DomainError::DatabaseError(format!("{column}: {e}")))
}
