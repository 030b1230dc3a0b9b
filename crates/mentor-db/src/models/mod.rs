//! Database models - SQLx-compatible structs for PostgreSQL tables

mod appointment;
mod availability;
mod booking;
mod mentor;
mod time_slot;
mod user;

pub use appointment::AppointmentModel;
pub use availability::AvailabilityModel;
pub use booking::BookingModel;
pub use mentor::{MentorModel, ServiceModel};
pub use time_slot::TimeSlotModel;
pub use user::UserModel;
