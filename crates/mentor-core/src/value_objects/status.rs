//! Booking and payment status value objects
//!
//! Both the slot-based `Booking` and the legacy `Appointment` share
//! `BookingStatus`. Statuses are persisted as lowercase strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a booking or appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl BookingStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Completed,
        Self::NoShow,
    ];

    /// Database / wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::NoShow => "no_show",
        }
    }

    /// Cancelled and completed records never change status again
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether the record still occupies the mentor's calendar
    #[inline]
    pub fn is_scheduled(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Check whether a status update from `self` to `next` is allowed
    pub fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(
                next,
                Self::Confirmed | Self::Cancelled | Self::Completed | Self::NoShow
            ),
            Self::Confirmed => matches!(next, Self::Cancelled | Self::Completed | Self::NoShow),
            Self::NoShow => next == Self::Cancelled,
            Self::Cancelled | Self::Completed => false,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            "no_show" => Ok(Self::NoShow),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

/// Payment status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
    Failed,
}

impl PaymentStatus {
    /// Database / wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
            Self::Failed => "failed",
        }
    }

    /// Check whether a payment status update is allowed
    pub fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Paid | Self::Failed),
            Self::Failed => matches!(next, Self::Paid | Self::Pending),
            Self::Paid => next == Self::Refunded,
            Self::Refunded => false,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "refunded" => Ok(Self::Refunded),
            "failed" => Ok(Self::Failed),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

/// Error when parsing a status from its string form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct StatusParseError(pub String);
