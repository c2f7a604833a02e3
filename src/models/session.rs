//! Session, weight and template records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{SessionId, TemplateId};

use super::time::BusinessWindow;

/// One business day's goal configuration.
///
/// A session is identified by its calendar date (at most one per date)
/// and carries the total daily goal plus the optional operating-hour
/// range. Hours stay unset until an admin configures them or a prior
/// session is copied forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySession {
    pub id: SessionId,
    /// Calendar date; unique across sessions.
    pub date: NaiveDate,
    /// Total revenue goal for the day, in currency units.
    pub total_daily_goal: f64,
    /// Opening hour (0-23); `None` until configured.
    pub start_hour: Option<i32>,
    /// Closing hour (0-23), inclusive; `None` until configured.
    pub end_hour: Option<i32>,
}

impl DailySession {
    /// Operating window for the day, falling back to store defaults
    /// for unconfigured bounds.
    pub fn window(&self) -> BusinessWindow {
        BusinessWindow::resolve(self.start_hour, self.end_hour)
    }

    /// True once both hour bounds have been set.
    pub fn is_configured(&self) -> bool {
        self.start_hour.is_some() && self.end_hour.is_some()
    }
}

/// Share of the daily goal attributed to one hour of one session.
///
/// Keyed by `(session_id, hour_start)`. Hours without a record weigh
/// zero. Percentages are not forced to sum to 100; configuration
/// checks flag mismatches without blocking computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeight {
    pub session_id: SessionId,
    /// Hour of day (0-23) the weight applies to.
    pub hour_start: i32,
    /// Percentage of the daily goal (0-100).
    pub percentage: f64,
}

/// Bare `(hour, percentage)` pair used when writing weight rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub hour_start: i32,
    pub percentage: f64,
}

impl WeightEntry {
    pub fn new(hour_start: i32, percentage: f64) -> Self {
        WeightEntry {
            hour_start,
            percentage,
        }
    }
}

impl From<&HourlyWeight> for WeightEntry {
    fn from(weight: &HourlyWeight) -> Self {
        WeightEntry {
            hour_start: weight.hour_start,
            percentage: weight.percentage,
        }
    }
}

/// Reusable snapshot of an hour range and weight distribution.
///
/// Applying a template to a session overwrites the session's hours and
/// replaces its weight rows wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTemplate {
    pub id: TemplateId,
    /// Human-readable label, unique across templates.
    pub name: String,
    pub start_hour: i32,
    pub end_hour: i32,
    pub weights: Vec<WeightEntry>,
}

impl SessionTemplate {
    pub fn window(&self) -> BusinessWindow {
        BusinessWindow::new(self.start_hour, self.end_hour)
    }
}
