//! Booking handlers
//!
//! Slot reservations and their lifecycle.

use axum::{extract::State, Json};
use mentor_service::dto::{
    BookingResponse, CancelRequest, CreateBookingRequest, ListQuery, PaginatedResponse,
    UpdatePaymentStatusRequest, UpdateStatusRequest,
};
use mentor_service::BookingService;
use uuid::Uuid;

use crate::extractors::{AuthUser, IdPath, OptionalValidatedJson, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Book a time slot
///
/// POST /bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<Created<BookingResponse>> {
    let service = BookingService::new(state.service_context());
    let booking = service.create_booking(auth.actor, request).await?;
    Ok(Created(booking))
}

/// List the caller's bookings
///
/// GET /bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> ApiResult<Json<PaginatedResponse<BookingResponse>>> {
    let service = BookingService::new(state.service_context());
    let page = service.list_my_bookings(auth.actor, query).await?;
    Ok(Json(page))
}

/// Get a booking
///
/// GET /bookings/{booking_id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(booking_id): IdPath<Uuid>,
) -> ApiResult<Json<BookingResponse>> {
    let service = BookingService::new(state.service_context());
    let booking = service.get_booking(auth.actor, booking_id).await?;
    Ok(Json(booking))
}

/// Cancel a booking and release its seat
///
/// POST /bookings/{booking_id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(booking_id): IdPath<Uuid>,
    body: OptionalValidatedJson<CancelRequest>,
) -> ApiResult<Json<BookingResponse>> {
    let service = BookingService::new(state.service_context());
    let booking = service
        .cancel_booking(auth.actor, booking_id, body.into_inner_or_default())
        .await?;
    Ok(Json(booking))
}

/// Move a booking through its lifecycle
///
/// PATCH /bookings/{booking_id}/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(booking_id): IdPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<BookingResponse>> {
    let service = BookingService::new(state.service_context());
    let booking = service.update_status(auth.actor, booking_id, request).await?;
    Ok(Json(booking))
}

/// Record a payment outcome
///
/// PATCH /bookings/{booking_id}/payment-status
pub async fn update_payment_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(booking_id): IdPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdatePaymentStatusRequest>,
) -> ApiResult<Json<BookingResponse>> {
    let service = BookingService::new(state.service_context());
    let booking = service
        .update_payment_status(auth.actor, booking_id, request)
        .await?;
    Ok(Json(booking))
}
