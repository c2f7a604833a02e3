//! Business-hour window arithmetic.
//!
//! Every goal computation is scoped to a session's operating hours. The
//! window is stored as a pair of inclusive hour-of-day bounds and falls
//! back to store defaults when a session has not been configured yet.

use serde::{Deserialize, Serialize};

/// Opening hour assumed when a session has no configured range.
pub const DEFAULT_START_HOUR: i32 = 9;

/// Closing hour assumed when a session has no configured range.
pub const DEFAULT_END_HOUR: i32 = 21;

/// Inclusive range of operating hours for one business day.
///
/// Hours are hour-of-day values (0-23). Both bounds are part of the
/// window: a `9..=21` window spans thirteen hour slots. A window whose
/// start exceeds its end is degenerate and simply contains no hours;
/// computations over it yield empty results rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessWindow {
    start_hour: i32,
    end_hour: i32,
}

impl BusinessWindow {
    /// Creates a window from explicit bounds.
    pub fn new(start_hour: i32, end_hour: i32) -> Self {
        BusinessWindow {
            start_hour,
            end_hour,
        }
    }

    /// Builds a window from optional bounds, substituting the store
    /// defaults for whichever bound is missing.
    pub fn resolve(start_hour: Option<i32>, end_hour: Option<i32>) -> Self {
        BusinessWindow {
            start_hour: start_hour.unwrap_or(DEFAULT_START_HOUR),
            end_hour: end_hour.unwrap_or(DEFAULT_END_HOUR),
        }
    }

    /// First hour of the window (inclusive).
    pub fn start_hour(&self) -> i32 {
        self.start_hour
    }

    /// Last hour of the window (inclusive).
    pub fn end_hour(&self) -> i32 {
        self.end_hour
    }

    /// Returns true if `hour` falls inside the window.
    pub fn contains(&self, hour: i32) -> bool {
        hour >= self.start_hour && hour <= self.end_hour
    }

    /// Iterates the hours of the window in ascending order.
    ///
    /// Empty for a degenerate window.
    pub fn hours(&self) -> std::ops::RangeInclusive<i32> {
        self.start_hour..=self.end_hour
    }

    /// Number of hour slots in the window.
    pub fn hour_count(&self) -> usize {
        if self.start_hour > self.end_hour {
            0
        } else {
            (self.end_hour - self.start_hour + 1) as usize
        }
    }
}

impl Default for BusinessWindow {
    fn default() -> Self {
        BusinessWindow::resolve(None, None)
    }
}

impl std::fmt::Display for BusinessWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:00-{}:00", self.start_hour, self.end_hour)
    }
}
