//! User handlers
//!
//! The caller's own profile, mirrored from the identity provider.

use axum::{extract::State, Json};
use mentor_service::dto::{SyncProfileRequest, UserResponse};
use mentor_service::UserService;

use crate::extractors::{AuthUser, OptionalValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.actor).await?;
    Ok(Json(response))
}

/// Create or refresh the current user from token claims
///
/// PUT /users/@me
pub async fn sync_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    body: OptionalValidatedJson<SyncProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service
        .sync_profile(auth.actor, auth.profile(), body.into_inner_or_default())
        .await?;
    Ok(Json(response))
}
