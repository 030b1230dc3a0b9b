//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL (JWT_SECRET optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use mentor_core::UserRole;
use reqwest::StatusCode;
use serde_json::json;

/// Mentor with one 60-minute service and one slot of the given capacity
async fn bookable_slot(server: &TestServer, capacity: i32) -> (Persona, MentorBody, SlotBody) {
    let (mentor, profile) = server.mentor().await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/mentors/{}/services", profile.id),
            &mentor.token,
            &CreateServiceRequest::hour_session(),
        )
        .await
        .unwrap();
    let service: ServiceBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/mentors/{}/slots", profile.id),
            &mentor.token,
            &CreateTimeSlotRequest::hour(service.id, 2, capacity),
        )
        .await
        .unwrap();
    let slot: SlotBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    (mentor, profile, slot)
}

async fn open_slots(server: &TestServer, mentor_id: uuid::Uuid) -> Vec<SlotBody> {
    let response = server
        .get(&format!("/api/v1/mentors/{mentor_id}/slots"))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_sync_and_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let student = server.persona(UserRole::Student).await.unwrap();
    assert_eq!(student.user.role, "student");

    let response = server.get_auth("/api/v1/users/@me", &student.token).await.unwrap();
    let me: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, student.user.id);
    assert_eq!(me.email, student.user.email);
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/bookings").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Mentor Directory Tests
// ============================================================================

#[tokio::test]
async fn test_mentor_profile_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (mentor, profile) = server.mentor().await.unwrap();
    assert_eq!(profile.user_id, mentor.user.id);
    assert_eq!(profile.currency, "USD");
    assert!(profile.expertise.contains(&"rust".to_string()));
    assert!(!profile.is_verified);

    // One profile per user
    let response = server
        .post_auth("/api/v1/mentors", &mentor.token, &CreateMentorRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Students cannot open a profile
    let student = server.persona(UserRole::Student).await.unwrap();
    let response = server
        .post_auth("/api/v1/mentors", &student.token, &CreateMentorRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Only the owner edits it
    let patch = json!({ "title": "Principal Engineer" });
    let response = server
        .patch_auth(&format!("/api/v1/mentors/{}", profile.id), &student.token, &patch)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&format!("/api/v1/mentors/{}", profile.id), &mentor.token, &patch)
        .await
        .unwrap();
    let updated: MentorBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Principal Engineer");
}

#[tokio::test]
async fn test_browse_mentors_by_search() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, profile) = server.mentor().await.unwrap();

    let response = server
        .get(&format!("/api/v1/mentors?search={}", profile.title.replace(' ', "%20")))
        .await
        .unwrap();
    let page: Page<MentorBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.data.iter().any(|m| m.id == profile.id));
    assert!(page.data.iter().all(|m| m.is_active));
    assert_eq!(page.pagination.offset, 0);

    let response = server.get(&format!("/api/v1/mentors/{}", profile.id)).await.unwrap();
    let fetched: MentorBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, profile.id);
}

#[tokio::test]
async fn test_unknown_mentor_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get(&format!("/api/v1/mentors/{}", uuid::Uuid::new_v4()))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_deactivated_service_disappears_from_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (mentor, profile, slot) = bookable_slot(&server, 1).await;

    let path = format!("/api/v1/mentors/{}/services", profile.id);
    let response = server.get(&path).await.unwrap();
    let services: Vec<ServiceBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(services.len(), 1);
    assert!(services[0].is_active);

    let response = server
        .delete_auth(&format!("{path}/{}", slot.service_id), &mentor.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let services: Vec<ServiceBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(services.is_empty());
}

// ============================================================================
// Booking Tests
// ============================================================================

#[tokio::test]
async fn test_single_seat_booking_scenario() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, profile, slot) = bookable_slot(&server, 1).await;
    let first = server.persona(UserRole::Student).await.unwrap();
    let second = server.persona(UserRole::Student).await.unwrap();

    let response = server
        .post_auth("/api/v1/bookings", &first.token, &CreateBookingRequest::for_slot(&slot))
        .await
        .unwrap();
    let booking: BookingBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(booking.status, "pending");
    assert_eq!(booking.payment_status, "pending");
    assert_eq!(booking.student_id, first.user.id);
    assert_eq!(booking.price_cents, 10_000);
    assert_eq!(booking.platform_fee_cents + booking.mentor_earnings_cents, booking.price_cents);

    // Full slots are no longer offered
    assert!(open_slots(&server, profile.id).await.iter().all(|s| s.id != slot.id));

    let response = server
        .post_auth("/api/v1/bookings", &second.token, &CreateBookingRequest::for_slot(&slot))
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Time slot is not available");

    let response = server
        .post_empty(&format!("/api/v1/bookings/{}/cancel", booking.id), &first.token)
        .await
        .unwrap();
    let cancelled: BookingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cancelled.status, "cancelled");
    assert_eq!(cancelled.cancelled_by, Some(first.user.id));

    let reopened = open_slots(&server, profile.id).await;
    let reopened = reopened.iter().find(|s| s.id == slot.id).expect("slot offered again");
    assert_eq!(reopened.current_bookings, 0);
    assert!(!reopened.is_booked);
}

#[tokio::test]
async fn test_concurrent_bookings_respect_capacity() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, profile, slot) = bookable_slot(&server, 3).await;

    let mut students = Vec::new();
    for _ in 0..8 {
        students.push(server.persona(UserRole::Student).await.unwrap());
    }

    let request = CreateBookingRequest::for_slot(&slot);
    let attempts = students
        .iter()
        .map(|student| server.post_auth("/api/v1/bookings", &student.token, &request));
    let statuses: Vec<StatusCode> = join_all(attempts)
        .await
        .into_iter()
        .map(|r| r.unwrap().status())
        .collect();

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let rejected = statuses.iter().filter(|s| **s == StatusCode::BAD_REQUEST).count();
    assert_eq!(created, 3, "statuses: {statuses:?}");
    assert_eq!(rejected, 5, "statuses: {statuses:?}");
    assert!(open_slots(&server, profile.id).await.iter().all(|s| s.id != slot.id));
}

#[tokio::test]
async fn test_double_cancel_keeps_counter() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, profile, slot) = bookable_slot(&server, 2).await;
    let keeper = server.persona(UserRole::Student).await.unwrap();
    let leaver = server.persona(UserRole::Student).await.unwrap();

    for student in [&keeper, &leaver] {
        let response = server
            .post_auth("/api/v1/bookings", &student.token, &CreateBookingRequest::for_slot(&slot))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get_auth("/api/v1/bookings", &leaver.token).await.unwrap();
    let page: Page<BookingBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 1);
    let booking_id = page.data[0].id;

    let cancel = format!("/api/v1/bookings/{booking_id}/cancel");
    let response = server.post_empty(&cancel, &leaver.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(&cancel, &leaver.token, &json!({ "reason": "again" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let slots = open_slots(&server, profile.id).await;
    let current = slots.iter().find(|s| s.id == slot.id).expect("slot still offered");
    assert_eq!(current.current_bookings, 1);
    assert_eq!(current.remaining_capacity, 1);
}

#[tokio::test]
async fn test_booking_status_flow_and_access() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (mentor, _, slot) = bookable_slot(&server, 1).await;
    let student = server.persona(UserRole::Student).await.unwrap();
    let outsider = server.persona(UserRole::Student).await.unwrap();

    let response = server
        .post_auth("/api/v1/bookings", &student.token, &CreateBookingRequest::for_slot(&slot))
        .await
        .unwrap();
    let booking: BookingBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/bookings/{}", booking.id);

    let response = server.get_auth(&path, &outsider.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Students cannot confirm their own booking
    let status_path = format!("{path}/status");
    let response = server
        .patch_auth(&status_path, &student.token, &StatusRequest { status: "confirmed" })
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    for status in ["confirmed", "completed"] {
        let response = server
            .patch_auth(&status_path, &mentor.token, &StatusRequest { status })
            .await
            .unwrap();
        let updated: BookingBody = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(updated.status, status);
    }

    let response = server
        .patch_auth(&format!("{path}/payment-status"), &mentor.token, &json!({ "payment_status": "paid" }))
        .await
        .unwrap();
    let paid: BookingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(paid.payment_status, "paid");

    // Completed bookings are final
    let response = server
        .post_empty(&format!("{path}/cancel"), &student.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get_auth(&path, &student.token).await.unwrap();
    let fetched: BookingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.status, "completed");
    assert_eq!(fetched.time_slot_id, slot.id);
}

// ============================================================================
// Availability Tests
// ============================================================================

#[tokio::test]
async fn test_replace_availability() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (mentor, profile) = server.mentor().await.unwrap();
    let path = format!("/api/v1/mentors/{}/availability", profile.id);

    let schedule = json!({
        "slots": [
            { "day_of_week": 3, "start_time": "14:00:00", "end_time": "17:00:00" },
            { "day_of_week": 1, "start_time": "09:00:00", "end_time": "12:00:00", "timezone": "Europe/Berlin" }
        ]
    });
    let response = server.put_auth(&path, &mentor.token, &schedule).await.unwrap();
    let rows: Vec<AvailabilityBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].day_of_week, 1);
    assert_eq!(rows[0].start_time, "09:00:00");

    let response = server.get(&path).await.unwrap();
    let rows: Vec<AvailabilityBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rows.len(), 2);

    // An inverted window rejects the whole replacement
    let invalid = json!({
        "slots": [{ "day_of_week": 2, "start_time": "12:00:00", "end_time": "11:00:00" }]
    });
    let response = server.put_auth(&path, &mentor.token, &invalid).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    for _ in 0..2 {
        let response = server
            .put_auth(&path, &mentor.token, &json!({ "slots": [] }))
            .await
            .unwrap();
        let rows: Vec<AvailabilityBody> = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(rows.is_empty());
    }

    let response = server.get(&path).await.unwrap();
    let rows: Vec<AvailabilityBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(rows.is_empty());
}

// ============================================================================
// Appointment Tests
// ============================================================================

#[tokio::test]
async fn test_appointment_overlap_detection() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (mentor, profile) = server.mentor().await.unwrap();
    let student = server.persona(UserRole::Student).await.unwrap();
    let other = server.persona(UserRole::Student).await.unwrap();
    let start = future_hour(3);

    let request = |minutes_in: i64, duration_minutes: i32| CreateAppointmentRequest {
        mentor_id: profile.id,
        scheduled_at: start + chrono::Duration::minutes(minutes_in),
        duration_minutes,
        notes: None,
    };

    let response = server
        .post_auth("/api/v1/appointments", &student.token, &request(0, 60))
        .await
        .unwrap();
    let first: AppointmentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(first.ends_at - first.scheduled_at, chrono::Duration::minutes(60));
    assert_eq!(first.status, "pending");

    // Starts inside the first appointment
    let response = server
        .post_auth("/api/v1/appointments", &other.token, &request(30, 60))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Wraps the first appointment entirely
    let response = server
        .post_auth("/api/v1/appointments", &other.token, &request(-30, 120))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Back to back is fine
    let response = server
        .post_auth("/api/v1/appointments", &other.token, &request(60, 30))
        .await
        .unwrap();
    let second: AppointmentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(second.mentor_id, profile.id);

    let conflicts = format!(
        "/api/v1/appointments/conflicts?mentor_id={}&scheduled_at={}&duration_minutes=90",
        profile.id,
        start.format("%Y-%m-%dT%H:%M:%SZ")
    );
    let response = server.get_auth(&conflicts, &mentor.token).await.unwrap();
    let hits: Vec<AppointmentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(hits.len(), 2);

    let response = server.get_auth(&conflicts, &student.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_appointment_reschedule_and_cancel() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (mentor, profile) = server.mentor().await.unwrap();
    let student = server.persona(UserRole::Student).await.unwrap();
    let start = future_hour(4);

    let response = server
        .post_auth(
            "/api/v1/appointments",
            &student.token,
            &CreateAppointmentRequest {
                mentor_id: profile.id,
                scheduled_at: start,
                duration_minutes: 45,
                notes: Some("System design mock".to_string()),
            },
        )
        .await
        .unwrap();
    let appointment: AppointmentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/appointments/{}", appointment.id);

    // Moving onto its own window does not conflict with itself
    let moved_to = start + chrono::Duration::minutes(15);
    let response = server
        .post_auth(&format!("{path}/reschedule"), &student.token, &json!({ "scheduled_at": moved_to }))
        .await
        .unwrap();
    let moved: AppointmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(moved.scheduled_at, moved_to);
    assert_eq!(moved.duration_minutes, 45);

    let response = server
        .patch_auth(&format!("{path}/status"), &mentor.token, &StatusRequest { status: "confirmed" })
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(&format!("{path}/cancel"), &student.token, &json!({ "reason": "Conflict at work" }))
        .await
        .unwrap();
    let cancelled: AppointmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cancelled.status, "cancelled");

    let response = server
        .post_auth(&format!("{path}/reschedule"), &student.token, &json!({ "scheduled_at": start }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get_auth("/api/v1/appointments?role=student", &student.token).await.unwrap();
    let page: Page<AppointmentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].user_id, student.user.id);
}
