//! Service context - dependency container for services
//!
//! Holds one typed repository per aggregate plus the booking settings.
//! Built once at start-up and shared behind an `Arc`.

use std::sync::Arc;

use mentor_common::BookingConfig;
use mentor_core::traits::{
    AppointmentRepository, AvailabilityRepository, BookingRepository, MentorRepository,
    ServiceRepository, TimeSlotRepository, UserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    mentor_repo: Arc<dyn MentorRepository>,
    service_repo: Arc<dyn ServiceRepository>,
    time_slot_repo: Arc<dyn TimeSlotRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    appointment_repo: Arc<dyn AppointmentRepository>,
    availability_repo: Arc<dyn AvailabilityRepository>,
    booking_config: BookingConfig,
}

impl ServiceContext {
    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn mentor_repo(&self) -> &dyn MentorRepository {
        self.mentor_repo.as_ref()
    }

    pub fn service_repo(&self) -> &dyn ServiceRepository {
        self.service_repo.as_ref()
    }

    pub fn time_slot_repo(&self) -> &dyn TimeSlotRepository {
        self.time_slot_repo.as_ref()
    }

    pub fn booking_repo(&self) -> &dyn BookingRepository {
        self.booking_repo.as_ref()
    }

    pub fn appointment_repo(&self) -> &dyn AppointmentRepository {
        self.appointment_repo.as_ref()
    }

    pub fn availability_repo(&self) -> &dyn AvailabilityRepository {
        self.availability_repo.as_ref()
    }

    // === Settings ===

    /// Pricing settings applied to new bookings
    pub fn booking_config(&self) -> &BookingConfig {
        &self.booking_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("booking_config", &self.booking_config)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    mentor_repo: Option<Arc<dyn MentorRepository>>,
    service_repo: Option<Arc<dyn ServiceRepository>>,
    time_slot_repo: Option<Arc<dyn TimeSlotRepository>>,
    booking_repo: Option<Arc<dyn BookingRepository>>,
    appointment_repo: Option<Arc<dyn AppointmentRepository>>,
    availability_repo: Option<Arc<dyn AvailabilityRepository>>,
    booking_config: Option<BookingConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn mentor_repo(mut self, repo: Arc<dyn MentorRepository>) -> Self {
        self.mentor_repo = Some(repo);
        self
    }

    pub fn service_repo(mut self, repo: Arc<dyn ServiceRepository>) -> Self {
        self.service_repo = Some(repo);
        self
    }

    pub fn time_slot_repo(mut self, repo: Arc<dyn TimeSlotRepository>) -> Self {
        self.time_slot_repo = Some(repo);
        self
    }

    pub fn booking_repo(mut self, repo: Arc<dyn BookingRepository>) -> Self {
        self.booking_repo = Some(repo);
        self
    }

    pub fn appointment_repo(mut self, repo: Arc<dyn AppointmentRepository>) -> Self {
        self.appointment_repo = Some(repo);
        self
    }

    pub fn availability_repo(mut self, repo: Arc<dyn AvailabilityRepository>) -> Self {
        self.availability_repo = Some(repo);
        self
    }

    /// Optional; defaults to [`BookingConfig::default`]
    pub fn booking_config(mut self, config: BookingConfig) -> Self {
        self.booking_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// Returns an error if any repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            mentor_repo: self
                .mentor_repo
                .ok_or_else(|| ServiceError::validation("mentor_repo is required"))?,
            service_repo: self
                .service_repo
                .ok_or_else(|| ServiceError::validation("service_repo is required"))?,
            time_slot_repo: self
                .time_slot_repo
                .ok_or_else(|| ServiceError::validation("time_slot_repo is required"))?,
            booking_repo: self
                .booking_repo
                .ok_or_else(|| ServiceError::validation("booking_repo is required"))?,
            appointment_repo: self
                .appointment_repo
                .ok_or_else(|| ServiceError::validation("appointment_repo is required"))?,
            availability_repo: self
                .availability_repo
                .ok_or_else(|| ServiceError::validation("availability_repo is required"))?,
            booking_config: self.booking_config.unwrap_or_default(),
        })
    }
}
