//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and path parameters.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::AuthUser;
pub use path::{IdPath, MentorServicePath, MentorSlotPath};
pub use query::ValidatedQuery;
pub use validated::{OptionalValidatedJson, ValidatedJson};
