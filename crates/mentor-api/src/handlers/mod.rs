//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod appointments;
pub mod availability;
pub mod bookings;
pub mod health;
pub mod mentors;
pub mod users;
