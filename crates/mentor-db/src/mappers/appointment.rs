//! Appointment entity <-> model mapper

use mentor_core::entities::Appointment;
use mentor_core::error::DomainError;

use crate::models::AppointmentModel;

use super::parse_column;

impl TryFrom<AppointmentModel> for Appointment {
    type Error = DomainError;

    fn try_from(model: AppointmentModel) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: model.id,
            mentor_id: model.mentor_id,
            user_id: model.user_id,
            scheduled_at: model.scheduled_at,
            duration_minutes: model.duration_minutes,
            status: parse_column("appointments.status", &model.status)?,
            notes: model.notes,
            meeting_url: model.meeting_url,
            cancelled_by: model.cancelled_by,
            cancellation_reason: model.cancellation_reason,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

pub fn appointments_from_models(
    models: Vec<AppointmentModel>,
) -> Result<Vec<Appointment>, DomainError> {
    models.into_iter().map(Appointment::try_from).collect()
}
