//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use mentor_core::entities::{
    Appointment, Booking, Mentor, MentorAvailability, ServiceOffering, TimeSlot, User,
};

use super::responses::{
    AppointmentResponse, AvailabilityResponse, BookingResponse, MentorResponse, ServiceResponse,
    TimeSlotResponse, UserResponse,
};

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            image_url: user.image_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<Mentor> for MentorResponse {
    fn from(mentor: Mentor) -> Self {
        Self {
            id: mentor.id,
            user_id: mentor.user_id,
            title: mentor.title,
            bio: mentor.bio,
            expertise: mentor.expertise,
            hourly_rate_cents: mentor.hourly_rate_cents,
            currency: mentor.currency,
            timezone: mentor.timezone,
            is_verified: mentor.is_verified,
            is_active: mentor.is_active,
            created_at: mentor.created_at,
            updated_at: mentor.updated_at,
        }
    }
}

impl From<ServiceOffering> for ServiceResponse {
    fn from(service: ServiceOffering) -> Self {
        Self {
            id: service.id,
            mentor_id: service.mentor_id,
            name: service.name,
            description: service.description,
            duration_minutes: service.duration_minutes,
            price_cents: service.price_cents,
            currency: service.currency,
            is_active: service.is_active,
            created_at: service.created_at,
        }
    }
}

impl From<TimeSlot> for TimeSlotResponse {
    fn from(slot: TimeSlot) -> Self {
        Self {
            remaining_capacity: slot.remaining_capacity(),
            id: slot.id,
            mentor_id: slot.mentor_id,
            service_id: slot.service_id,
            start_date_time: slot.start_date_time,
            end_date_time: slot.end_date_time,
            max_bookings: slot.max_bookings,
            current_bookings: slot.current_bookings,
            is_booked: slot.is_booked,
            is_active: slot.is_active,
        }
    }
}

impl From<MentorAvailability> for AvailabilityResponse {
    fn from(row: MentorAvailability) -> Self {
        Self {
            id: row.id,
            mentor_id: row.mentor_id,
            day_of_week: row.day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            timezone: row.timezone,
            is_active: row.is_active,
        }
    }
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            student_id: booking.student_id,
            mentor_id: booking.mentor_id,
            service_id: booking.service_id,
            time_slot_id: booking.time_slot_id,
            status: booking.status,
            payment_status: booking.payment_status,
            price_cents: booking.price_cents,
            platform_fee_cents: booking.platform_fee_cents,
            mentor_earnings_cents: booking.mentor_earnings_cents,
            currency: booking.currency,
            student_notes: booking.student_notes,
            mentor_notes: booking.mentor_notes,
            meeting_url: booking.meeting_url,
            cancelled_by: booking.cancelled_by,
            cancellation_reason: booking.cancellation_reason,
            cancelled_at: booking.cancelled_at,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            ends_at: appointment
                .window()
                .map_or(appointment.scheduled_at, |w| w.end),
            id: appointment.id,
            mentor_id: appointment.mentor_id,
            user_id: appointment.user_id,
            scheduled_at: appointment.scheduled_at,
            duration_minutes: appointment.duration_minutes,
            status: appointment.status,
            notes: appointment.notes,
            meeting_url: appointment.meeting_url,
            cancelled_by: appointment.cancelled_by,
            cancellation_reason: appointment.cancellation_reason,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}
