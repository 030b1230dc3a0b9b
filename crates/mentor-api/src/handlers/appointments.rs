//! Appointment handlers
//!
//! Free-form calendar appointments with overlap detection.

use axum::{extract::State, Json};
use mentor_service::dto::{
    AppointmentResponse, CancelRequest, ConflictQuery, CreateAppointmentRequest, ListQuery,
    PaginatedResponse, RescheduleAppointmentRequest, UpdateStatusRequest,
};
use mentor_service::AppointmentService;
use uuid::Uuid;

use crate::extractors::{AuthUser, IdPath, OptionalValidatedJson, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Schedule an appointment
///
/// POST /appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateAppointmentRequest>,
) -> ApiResult<Created<AppointmentResponse>> {
    let service = AppointmentService::new(state.service_context());
    let appointment = service.create_appointment(auth.actor, request).await?;
    Ok(Created(appointment))
}

/// List the caller's appointments
///
/// GET /appointments
pub async fn list_appointments(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> ApiResult<Json<PaginatedResponse<AppointmentResponse>>> {
    let service = AppointmentService::new(state.service_context());
    let page = service.list_my_appointments(auth.actor, query).await?;
    Ok(Json(page))
}

/// Appointments that would collide with a candidate window
///
/// GET /appointments/conflicts
pub async fn find_conflicts(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ConflictQuery>,
) -> ApiResult<Json<Vec<AppointmentResponse>>> {
    let service = AppointmentService::new(state.service_context());
    let conflicts = service.find_conflicts(auth.actor, query).await?;
    Ok(Json(conflicts))
}

/// Get an appointment
///
/// GET /appointments/{appointment_id}
pub async fn get_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(appointment_id): IdPath<Uuid>,
) -> ApiResult<Json<AppointmentResponse>> {
    let service = AppointmentService::new(state.service_context());
    let appointment = service.get_appointment(auth.actor, appointment_id).await?;
    Ok(Json(appointment))
}

/// Move an appointment
///
/// POST /appointments/{appointment_id}/reschedule
pub async fn reschedule_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(appointment_id): IdPath<Uuid>,
    ValidatedJson(request): ValidatedJson<RescheduleAppointmentRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    let service = AppointmentService::new(state.service_context());
    let appointment = service
        .reschedule_appointment(auth.actor, appointment_id, request)
        .await?;
    Ok(Json(appointment))
}

/// Cancel an appointment
///
/// POST /appointments/{appointment_id}/cancel
pub async fn cancel_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(appointment_id): IdPath<Uuid>,
    body: OptionalValidatedJson<CancelRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    let service = AppointmentService::new(state.service_context());
    let appointment = service
        .cancel_appointment(auth.actor, appointment_id, body.into_inner_or_default())
        .await?;
    Ok(Json(appointment))
}

/// Move an appointment through its lifecycle
///
/// PATCH /appointments/{appointment_id}/status
pub async fn update_appointment_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(appointment_id): IdPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    let service = AppointmentService::new(state.service_context());
    let appointment = service.update_status(auth.actor, appointment_id, request).await?;
    Ok(Json(appointment))
}
