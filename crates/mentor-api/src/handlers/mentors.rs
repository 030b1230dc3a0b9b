//! Mentor directory handlers
//!
//! Mentor profiles, their service offerings and bookable time slots.

use axum::{extract::State, Json};
use mentor_service::dto::{
    CreateMentorRequest, CreateServiceRequest, CreateTimeSlotRequest, MentorListQuery,
    MentorResponse, PaginatedResponse, ServiceResponse, SlotListQuery, TimeSlotResponse,
    UpdateMentorRequest,
};
use mentor_service::MentorService;
use uuid::Uuid;

use crate::extractors::{AuthUser, IdPath, MentorServicePath, MentorSlotPath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create the caller's mentor profile
///
/// POST /mentors
pub async fn create_mentor(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateMentorRequest>,
) -> ApiResult<Created<MentorResponse>> {
    let service = MentorService::new(state.service_context());
    let mentor = service.create_profile(auth.actor, request).await?;
    Ok(Created(mentor))
}

/// Browse active mentors
///
/// GET /mentors
pub async fn browse_mentors(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<MentorListQuery>,
) -> ApiResult<Json<PaginatedResponse<MentorResponse>>> {
    let service = MentorService::new(state.service_context());
    let page = service.browse(query).await?;
    Ok(Json(page))
}

/// Get a mentor profile
///
/// GET /mentors/{mentor_id}
pub async fn get_mentor(
    State(state): State<AppState>,
    IdPath(mentor_id): IdPath<Uuid>,
) -> ApiResult<Json<MentorResponse>> {
    let service = MentorService::new(state.service_context());
    let mentor = service.get_mentor(mentor_id).await?;
    Ok(Json(mentor))
}

/// Update a mentor profile
///
/// PATCH /mentors/{mentor_id}
pub async fn update_mentor(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(mentor_id): IdPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateMentorRequest>,
) -> ApiResult<Json<MentorResponse>> {
    let service = MentorService::new(state.service_context());
    let mentor = service.update_profile(auth.actor, mentor_id, request).await?;
    Ok(Json(mentor))
}

/// List a mentor's active services
///
/// GET /mentors/{mentor_id}/services
pub async fn list_services(
    State(state): State<AppState>,
    IdPath(mentor_id): IdPath<Uuid>,
) -> ApiResult<Json<Vec<ServiceResponse>>> {
    let service = MentorService::new(state.service_context());
    let services = service.list_services(mentor_id).await?;
    Ok(Json(services))
}

/// Offer a new service
///
/// POST /mentors/{mentor_id}/services
pub async fn create_service(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(mentor_id): IdPath<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateServiceRequest>,
) -> ApiResult<Created<ServiceResponse>> {
    let service = MentorService::new(state.service_context());
    let offering = service.create_service(auth.actor, mentor_id, request).await?;
    Ok(Created(offering))
}

/// Withdraw a service
///
/// DELETE /mentors/{mentor_id}/services/{service_id}
pub async fn deactivate_service(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(path): IdPath<MentorServicePath>,
) -> ApiResult<NoContent> {
    let service = MentorService::new(state.service_context());
    service
        .deactivate_service(auth.actor, path.mentor_id, path.service_id)
        .await?;
    Ok(NoContent)
}

/// List bookable slots
///
/// GET /mentors/{mentor_id}/slots
pub async fn list_slots(
    State(state): State<AppState>,
    IdPath(mentor_id): IdPath<Uuid>,
    ValidatedQuery(query): ValidatedQuery<SlotListQuery>,
) -> ApiResult<Json<Vec<TimeSlotResponse>>> {
    let service = MentorService::new(state.service_context());
    let slots = service.list_available_slots(mentor_id, query).await?;
    Ok(Json(slots))
}

/// Publish a time slot
///
/// POST /mentors/{mentor_id}/slots
pub async fn create_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(mentor_id): IdPath<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateTimeSlotRequest>,
) -> ApiResult<Created<TimeSlotResponse>> {
    let service = MentorService::new(state.service_context());
    let slot = service.create_time_slot(auth.actor, mentor_id, request).await?;
    Ok(Created(slot))
}

/// Withdraw a time slot
///
/// DELETE /mentors/{mentor_id}/slots/{slot_id}
pub async fn deactivate_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(path): IdPath<MentorSlotPath>,
) -> ApiResult<NoContent> {
    let service = MentorService::new(state.service_context());
    service
        .deactivate_time_slot(auth.actor, path.mentor_id, path.slot_id)
        .await?;
    Ok(NoContent)
}
