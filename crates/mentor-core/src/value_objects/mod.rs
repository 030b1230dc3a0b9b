//! Value objects - immutable types that represent domain concepts

mod role;
mod status;
mod time_window;

pub use role::UserRole;
pub use status::{BookingStatus, PaymentStatus, StatusParseError};
pub use time_window::TimeWindow;
