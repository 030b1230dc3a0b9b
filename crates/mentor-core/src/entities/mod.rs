//! Domain entities - core business objects

mod appointment;
mod availability;
mod booking;
mod mentor;
mod time_slot;
mod user;

pub use appointment::{Appointment, NewAppointment};
pub use availability::{MentorAvailability, NewAvailability};
pub use booking::{Booking, BookingPrice, NewBooking};
pub use mentor::{Mentor, ServiceOffering};
pub use time_slot::TimeSlot;
pub use user::User;
