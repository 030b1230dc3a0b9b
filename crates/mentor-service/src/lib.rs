//! # mentor-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
mod testing;

pub use services::{
    AccessService, Actor, AppointmentService, AvailabilityService, BookingService,
    MentorService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    TokenProfile, UserService,
};
