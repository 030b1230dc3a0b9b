//! Repository traits

mod repositories;

pub use repositories::{
    AppointmentQuery, AppointmentRepository, AvailabilityRepository, BookingQuery,
    BookingRepository, MentorQuery, MentorRepository, RepoResult, ServiceRepository, SlotQuery,
    TimeSlotRepository, UserRepository,
};
