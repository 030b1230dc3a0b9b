//! In-memory repositories for service tests
//!
//! One mutex guards the whole store, so every repository call behaves like a
//! serializable transaction: it either applies completely or not at all.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mentor_core::entities::{
    Appointment, Booking, Mentor, MentorAvailability, NewAppointment, NewAvailability,
    NewBooking, ServiceOffering, TimeSlot, User,
};
use mentor_core::traits::{
    AppointmentQuery, AppointmentRepository, AvailabilityRepository, BookingQuery,
    BookingRepository, MentorQuery, MentorRepository, RepoResult, ServiceRepository, SlotQuery,
    TimeSlotRepository, UserRepository,
};
use mentor_core::{BookingStatus, DomainError, PaymentStatus, TimeWindow, UserRole};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::services::{Actor, ServiceContext, ServiceContextBuilder};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    mentors: HashMap<Uuid, Mentor>,
    services: HashMap<Uuid, ServiceOffering>,
    slots: HashMap<Uuid, TimeSlot>,
    bookings: HashMap<Uuid, Booking>,
    appointments: HashMap<Uuid, Appointment>,
    availability: Vec<MentorAvailability>,
    fail_next_booking_insert: bool,
}

impl State {
    fn live_bookings(&self, slot_id: Uuid) -> i64 {
        self.bookings
            .values()
            .filter(|b| b.time_slot_id == slot_id && b.holds_capacity())
            .count() as i64
    }

    fn conflicts(&self, mentor_id: Uuid, window: &TimeWindow, exclude: Option<Uuid>) -> Vec<Appointment> {
        let mut hits: Vec<Appointment> = self
            .appointments
            .values()
            .filter(|a| a.mentor_id == mentor_id && Some(a.id) != exclude && a.conflicts_with(window))
            .cloned()
            .collect();
        hits.sort_by_key(|a| a.scheduled_at);
        hits
    }
}

/// Every repository trait over one shared in-memory state
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Service context whose repositories all point at `store`
    pub fn context(store: Arc<Self>) -> ServiceContext {
        ServiceContextBuilder::new()
            .user_repo(store.clone())
            .mentor_repo(store.clone())
            .service_repo(store.clone())
            .time_slot_repo(store.clone())
            .booking_repo(store.clone())
            .appointment_repo(store.clone())
            .availability_repo(store)
            .build()
            .expect("all repositories set")
    }

    /// Insert a user and return it as a caller
    pub async fn add_user(&self, role: UserRole) -> Actor {
        let id = Uuid::new_v4();
        let user = User::new(id, format!("{id}@example.com"), format!("user-{role}"), role);
        self.state.lock().await.users.insert(id, user);
        Actor::new(id, role)
    }

    pub async fn slot(&self, id: Uuid) -> TimeSlot {
        self.state.lock().await.slots[&id].clone()
    }

    pub async fn live_bookings(&self, slot_id: Uuid) -> i64 {
        self.state.lock().await.live_bookings(slot_id)
    }

    /// Make the next booking insert fail the way a foreign-key violation does
    pub async fn fail_next_booking_insert(&self) {
        self.state.lock().await.fail_next_booking_insert = true;
    }
}

/// A student, a mentor with one priced offering and one future slot, and an admin
pub struct Seed {
    pub student: Actor,
    pub mentor_actor: Actor,
    pub admin: Actor,
    pub mentor: Mentor,
    pub service: ServiceOffering,
    pub slot: TimeSlot,
}

impl Seed {
    pub async fn new(store: &MemoryStore, capacity: i32) -> Self {
        let student = store.add_user(UserRole::Student).await;
        let mentor_actor = store.add_user(UserRole::Mentor).await;
        let admin = store.add_user(UserRole::Admin).await;

        let mentor = Mentor::new(Uuid::new_v4(), mentor_actor.user_id, "Staff Engineer".to_string());
        let service = ServiceOffering::new(
            Uuid::new_v4(),
            mentor.id,
            "Career review".to_string(),
            60,
            10_000,
            "USD".to_string(),
        );
        let start = Utc::now() + Duration::days(1);
        let window = TimeWindow::from_duration(start, 60).expect("positive duration");
        let slot = TimeSlot::new(Uuid::new_v4(), mentor.id, service.id, window, capacity)
            .expect("capacity at least one");

        {
            let mut state = store.state.lock().await;
            state.mentors.insert(mentor.id, mentor.clone());
            state.services.insert(service.id, service.clone());
            state.slots.insert(slot.id, slot.clone());
        }

        Self {
            student,
            mentor_actor,
            admin,
            mentor,
            service,
            slot,
        }
    }
}

fn page<T>(mut rows: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    let offset = usize::try_from(offset.max(0)).unwrap_or(0).min(rows.len());
    let limit = usize::try_from(limit.clamp(1, 100)).unwrap_or(1);
    rows.drain(..offset);
    rows.truncate(limit);
    rows
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn upsert(&self, user: &User) -> RepoResult<User> {
        let mut state = self.state.lock().await;
        let stored = match state.users.get(&user.id) {
            Some(existing) => User {
                created_at: existing.created_at,
                updated_at: Utc::now(),
                ..user.clone()
            },
            None => user.clone(),
        };
        state.users.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl MentorRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Mentor>> {
        Ok(self.state.lock().await.mentors.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> RepoResult<Option<Mentor>> {
        let state = self.state.lock().await;
        Ok(state.mentors.values().find(|m| m.user_id == user_id).cloned())
    }

    async fn create(&self, mentor: &Mentor) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&mentor.user_id) {
            return Err(DomainError::ConstraintViolation("mentors_user_id_fkey".into()));
        }
        if state.mentors.values().any(|m| m.user_id == mentor.user_id) {
            return Err(DomainError::MentorProfileExists);
        }
        state.mentors.insert(mentor.id, mentor.clone());
        Ok(())
    }

    async fn update(&self, mentor: &Mentor) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        let slot = state
            .mentors
            .get_mut(&mentor.id)
            .ok_or(DomainError::MentorNotFound(mentor.id))?;
        *slot = mentor.clone();
        Ok(())
    }

    async fn search(&self, query: &MentorQuery) -> RepoResult<Vec<Mentor>> {
        let state = self.state.lock().await;
        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut hits: Vec<Mentor> = state
            .mentors
            .values()
            .filter(|m| m.is_active)
            .filter(|m| {
                needle.as_deref().is_none_or(|n| {
                    m.title.to_lowercase().contains(n)
                        || m.bio.as_deref().is_some_and(|b| b.to_lowercase().contains(n))
                        || m.expertise.iter().any(|t| t.to_lowercase().contains(n))
                })
            })
            .filter(|m| {
                query
                    .expertise
                    .as_deref()
                    .is_none_or(|tag| m.expertise.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| {
            b.is_verified
                .cmp(&a.is_verified)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(page(hits, query.limit, query.offset))
    }
}

#[async_trait]
impl ServiceRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ServiceOffering>> {
        Ok(self.state.lock().await.services.get(&id).cloned())
    }

    async fn find_by_mentor(&self, mentor_id: Uuid, active_only: bool) -> RepoResult<Vec<ServiceOffering>> {
        let state = self.state.lock().await;
        let mut rows: Vec<ServiceOffering> = state
            .services
            .values()
            .filter(|s| s.mentor_id == mentor_id && (s.is_active || !active_only))
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.created_at);
        Ok(rows)
    }

    async fn create(&self, service: &ServiceOffering) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        if !state.mentors.contains_key(&service.mentor_id) {
            return Err(DomainError::ConstraintViolation("services_mentor_id_fkey".into()));
        }
        state.services.insert(service.id, service.clone());
        Ok(())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        let service = state.services.get_mut(&id).ok_or(DomainError::ServiceNotFound(id))?;
        service.is_active = is_active;
        service.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl TimeSlotRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<TimeSlot>> {
        Ok(self.state.lock().await.slots.get(&id).cloned())
    }

    async fn create(&self, slot: &TimeSlot) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        if !state.services.contains_key(&slot.service_id) {
            return Err(DomainError::ConstraintViolation("time_slots_service_id_fkey".into()));
        }
        state.slots.insert(slot.id, slot.clone());
        Ok(())
    }

    async fn find_available(
        &self,
        mentor_id: Uuid,
        query: SlotQuery,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<TimeSlot>> {
        let state = self.state.lock().await;
        let mut rows: Vec<TimeSlot> = state
            .slots
            .values()
            .filter(|s| s.mentor_id == mentor_id && s.is_active && !s.is_booked)
            .filter(|s| s.start_date_time > now)
            .filter(|s| query.from.is_none_or(|from| s.start_date_time >= from))
            .filter(|s| query.to.is_none_or(|to| s.start_date_time < to))
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.start_date_time);
        Ok(rows)
    }

    async fn deactivate(&self, id: Uuid) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        let slot = state.slots.get_mut(&id).ok_or(DomainError::TimeSlotNotFound(id))?;
        slot.is_active = false;
        slot.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        Ok(self.state.lock().await.bookings.get(&id).cloned())
    }

    async fn find_many(&self, query: &BookingQuery) -> RepoResult<Vec<Booking>> {
        let state = self.state.lock().await;
        let unscoped = query.student_id.is_none() && query.mentor_id.is_none();
        let mut rows: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| {
                unscoped
                    || Some(b.student_id) == query.student_id
                    || Some(b.mentor_id) == query.mentor_id
            })
            .filter(|b| query.status.is_none_or(|s| b.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(rows, query.limit, query.offset))
    }

    async fn create_with_slot_reservation(&self, booking: NewBooking) -> RepoResult<Booking> {
        let mut state = self.state.lock().await;

        let mut slot = state
            .slots
            .get(&booking.time_slot_id)
            .cloned()
            .ok_or(DomainError::TimeSlotUnavailable)?;
        slot.ensure_bookable(booking.mentor_id, booking.service_id)?;

        if std::mem::take(&mut state.fail_next_booking_insert)
            || !state.users.contains_key(&booking.student_id)
        {
            return Err(DomainError::ConstraintViolation("bookings_student_id_fkey".into()));
        }

        slot.reserve()?;
        let created = booking.into_booking(Utc::now());
        state.bookings.insert(created.id, created.clone());
        state.slots.insert(slot.id, slot);
        Ok(created)
    }

    async fn cancel(&self, id: Uuid, cancelled_by: Uuid, reason: Option<String>) -> RepoResult<Booking> {
        let mut state = self.state.lock().await;

        let mut booking = state.bookings.get(&id).cloned().ok_or(DomainError::BookingNotFound(id))?;
        booking.cancel(cancelled_by, reason, Utc::now())?;
        state.bookings.insert(id, booking.clone());

        let live = state.live_bookings(booking.time_slot_id);
        if let Some(slot) = state.slots.get_mut(&booking.time_slot_id) {
            slot.recompute(live);
        }
        Ok(booking)
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> RepoResult<Booking> {
        if status == BookingStatus::Cancelled {
            return Err(DomainError::ValidationError(
                "cancellation must go through cancel".to_string(),
            ));
        }
        let mut state = self.state.lock().await;
        let booking = state.bookings.get_mut(&id).ok_or(DomainError::BookingNotFound(id))?;
        booking.check_transition(status)?;
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> RepoResult<Booking> {
        let mut state = self.state.lock().await;
        let booking = state.bookings.get_mut(&id).ok_or(DomainError::BookingNotFound(id))?;
        booking.set_payment_status(status)?;
        Ok(booking.clone())
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Appointment>> {
        Ok(self.state.lock().await.appointments.get(&id).cloned())
    }

    async fn find_many(&self, query: &AppointmentQuery) -> RepoResult<Vec<Appointment>> {
        let state = self.state.lock().await;
        let unscoped = query.user_id.is_none() && query.mentor_id.is_none();
        let mut rows: Vec<Appointment> = state
            .appointments
            .values()
            .filter(|a| {
                unscoped || Some(a.user_id) == query.user_id || Some(a.mentor_id) == query.mentor_id
            })
            .filter(|a| query.status.is_none_or(|s| a.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        Ok(page(rows, query.limit, query.offset))
    }

    async fn find_conflicting(
        &self,
        mentor_id: Uuid,
        window: TimeWindow,
        exclude: Option<Uuid>,
    ) -> RepoResult<Vec<Appointment>> {
        Ok(self.state.lock().await.conflicts(mentor_id, &window, exclude))
    }

    async fn create_checked(&self, appointment: NewAppointment) -> RepoResult<Appointment> {
        let mut state = self.state.lock().await;
        let conflicts = state.conflicts(appointment.mentor_id, &appointment.window, None);
        if !conflicts.is_empty() {
            return Err(DomainError::SchedulingConflict {
                count: conflicts.len(),
            });
        }
        let created = appointment.into_appointment(Utc::now());
        state.appointments.insert(created.id, created.clone());
        Ok(created)
    }

    async fn reschedule_checked(&self, id: Uuid, window: TimeWindow) -> RepoResult<Appointment> {
        let mut state = self.state.lock().await;
        let mut appointment = state
            .appointments
            .get(&id)
            .cloned()
            .ok_or(DomainError::AppointmentNotFound(id))?;
        appointment.ensure_modifiable()?;

        let conflicts = state.conflicts(appointment.mentor_id, &window, Some(id));
        if !conflicts.is_empty() {
            return Err(DomainError::SchedulingConflict {
                count: conflicts.len(),
            });
        }
        appointment.reschedule(window, Utc::now())?;
        state.appointments.insert(id, appointment.clone());
        Ok(appointment)
    }

    async fn cancel(&self, id: Uuid, cancelled_by: Uuid, reason: Option<String>) -> RepoResult<Appointment> {
        let mut state = self.state.lock().await;
        let appointment = state
            .appointments
            .get_mut(&id)
            .ok_or(DomainError::AppointmentNotFound(id))?;
        appointment.cancel(cancelled_by, reason, Utc::now())?;
        Ok(appointment.clone())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> RepoResult<Appointment> {
        let mut state = self.state.lock().await;
        let appointment = state
            .appointments
            .get_mut(&id)
            .ok_or(DomainError::AppointmentNotFound(id))?;
        appointment.check_transition(status)?;
        appointment.status = status;
        appointment.updated_at = Utc::now();
        Ok(appointment.clone())
    }
}

#[async_trait]
impl AvailabilityRepository for MemoryStore {
    async fn find_by_mentor(&self, mentor_id: Uuid) -> RepoResult<Vec<MentorAvailability>> {
        let state = self.state.lock().await;
        let mut rows: Vec<MentorAvailability> = state
            .availability
            .iter()
            .filter(|a| a.mentor_id == mentor_id)
            .cloned()
            .collect();
        rows.sort_by_key(|a| (a.day_of_week, a.start_time));
        Ok(rows)
    }

    async fn replace_all(
        &self,
        mentor_id: Uuid,
        slots: Vec<NewAvailability>,
    ) -> RepoResult<Vec<MentorAvailability>> {
        let mut state = self.state.lock().await;
        state.availability.retain(|a| a.mentor_id != mentor_id);

        let now = Utc::now();
        let mut inserted: Vec<MentorAvailability> = slots
            .into_iter()
            .map(|slot| slot.into_availability(mentor_id, now))
            .collect();
        state.availability.extend(inserted.iter().cloned());

        inserted.sort_by_key(|a| (a.day_of_week, a.start_time));
        Ok(inserted)
    }
}
