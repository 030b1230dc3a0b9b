//! # mentor-core
//!
//! Domain layer containing entities, value objects, domain errors and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Appointment, Booking, BookingPrice, Mentor, MentorAvailability, NewAppointment,
    NewAvailability, NewBooking, ServiceOffering, TimeSlot, User,
};
pub use error::DomainError;
pub use traits::{
    AppointmentQuery, AppointmentRepository, AvailabilityRepository, BookingQuery,
    BookingRepository, MentorQuery, MentorRepository, RepoResult, ServiceRepository, SlotQuery,
    TimeSlotRepository, UserRepository,
};
pub use value_objects::{BookingStatus, PaymentStatus, StatusParseError, TimeWindow, UserRole};
