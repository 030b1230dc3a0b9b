//! Weekly availability handlers

use axum::{extract::State, Json};
use mentor_service::dto::{AvailabilityResponse, ReplaceAvailabilityRequest};
use mentor_service::AvailabilityService;
use uuid::Uuid;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get a mentor's weekly schedule
///
/// GET /mentors/{mentor_id}/availability
pub async fn get_availability(
    State(state): State<AppState>,
    IdPath(mentor_id): IdPath<Uuid>,
) -> ApiResult<Json<Vec<AvailabilityResponse>>> {
    let service = AvailabilityService::new(state.service_context());
    let rows = service.get_availability(mentor_id).await?;
    Ok(Json(rows))
}

/// Replace a mentor's weekly schedule
///
/// PUT /mentors/{mentor_id}/availability
pub async fn replace_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(mentor_id): IdPath<Uuid>,
    ValidatedJson(request): ValidatedJson<ReplaceAvailabilityRequest>,
) -> ApiResult<Json<Vec<AvailabilityResponse>>> {
    let service = AvailabilityService::new(state.service_context());
    let rows = service.replace_all(auth.actor, mentor_id, request).await?;
    Ok(Json(rows))
}
