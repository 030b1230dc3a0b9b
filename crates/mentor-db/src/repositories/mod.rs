//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in mentor-core.
//! Each repository handles database operations for a specific domain entity.

mod appointment;
mod availability;
mod booking;
mod error;
mod mentor;
mod service;
mod time_slot;
mod user;

pub use appointment::PgAppointmentRepository;
pub use availability::PgAvailabilityRepository;
pub use booking::PgBookingRepository;
pub use mentor::PgMentorRepository;
pub use service::PgServiceRepository;
pub use time_slot::PgTimeSlotRepository;
pub use user::PgUserRepository;
