//! Half-open time interval used for scheduling checks

use chrono::{DateTime, Duration, Utc};

/// A half-open interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window; returns `None` unless `start < end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Window starting at `start` lasting `minutes`; `None` when the end
    /// falls outside the representable range
    pub fn from_duration(start: DateTime<Utc>, minutes: i32) -> Option<Self> {
        let end = start.checked_add_signed(Duration::minutes(i64::from(minutes)))?;
        Self::new(start, end)
    }

    /// True interval intersection. Touching endpoints do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length in whole minutes, saturating at `i32::MAX`
    pub fn minutes(&self) -> i32 {
        i32::try_from(self.duration().num_minutes()).unwrap_or(i32::MAX)
    }
}
