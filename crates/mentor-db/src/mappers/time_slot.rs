//! TimeSlot entity <-> model mapper

use mentor_core::entities::TimeSlot;

use crate::models::TimeSlotModel;

impl From<TimeSlotModel> for TimeSlot {
    fn from(model: TimeSlotModel) -> Self {
        TimeSlot {
            id: model.id,
            mentor_id: model.mentor_id,
            service_id: model.service_id,
            start_date_time: model.start_date_time,
            end_date_time: model.end_date_time,
            max_bookings: model.max_bookings,
            current_bookings: model.current_bookings,
            is_booked: model.is_booked,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
