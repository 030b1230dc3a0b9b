//! # mentor-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `mentor-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the transactional booking,
//!   appointment and availability paths
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mentor_db::pool::{create_pool, default_migrations_dir, run_migrations, PoolConfig};
//! use mentor_db::repositories::PgBookingRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     run_migrations(&pool, &default_migrations_dir()).await?;
//!     let bookings = PgBookingRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, default_migrations_dir, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgAppointmentRepository, PgAvailabilityRepository, PgBookingRepository, PgMentorRepository,
    PgServiceRepository, PgTimeSlotRepository, PgUserRepository,
};
