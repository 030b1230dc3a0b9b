//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod access;
pub mod appointment;
pub mod availability;
pub mod booking;
pub mod context;
pub mod error;
pub mod mentor;
pub mod user;

// Re-export all services for convenience
pub use access::{AccessService, Actor};
pub use appointment::AppointmentService;
pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use mentor::MentorService;
pub use user::{TokenProfile, UserService};
