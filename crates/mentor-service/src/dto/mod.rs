//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AvailabilitySlotRequest, CancelRequest, ConflictQuery, CreateAppointmentRequest, CreateBookingRequest,
    CreateMentorRequest, CreateServiceRequest, CreateTimeSlotRequest, ListQuery, ListRole,
    MentorListQuery, ReplaceAvailabilityRequest, RescheduleAppointmentRequest, SlotListQuery,
    SyncProfileRequest, UpdateMentorRequest, UpdatePaymentStatusRequest, UpdateStatusRequest,
    MAX_APPOINTMENT_MINUTES, MIN_APPOINTMENT_MINUTES,
};

pub use responses::{
    AppointmentResponse, AvailabilityResponse, BookingResponse, HealthChecks, HealthResponse, MentorResponse, PaginatedResponse, PaginationMeta, ReadinessResponse,
    ServiceResponse, TimeSlotResponse, UserResponse,
};
