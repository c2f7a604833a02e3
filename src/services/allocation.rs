//! Goal allocation engine.
//!
//! Splits a session's daily goal across its operating hours and across
//! the advisors active in each hour. Each hour's store goal is the
//! configured weight percentage of the daily goal; it is divided
//! equally among the advisors active during that hour, independent of
//! anyone's sales performance. An advisor's personal goal is the sum
//! of their shares over the day.
//!
//! The engine is deliberately forgiving: weights that do not sum to
//! 100, a zero daily goal, a degenerate hour range or an hour with no
//! active advisor all yield zeros, never an error or a NaN. An hour
//! with no active advisor keeps its store goal but assigns it to
//! nobody; the unassigned amount is not redistributed.

use serde::{Deserialize, Serialize};

use crate::api::AdvisorId;
use crate::models::{Advisor, AdvisorAvailability, BusinessWindow, DailySession, HourlyWeight};
use crate::routes::advisor_view::HourlyShare;

/// Immutable view of one session's configuration and roster.
///
/// All goal computations are pure functions of this snapshot, so a
/// dashboard, a self-service page and a report built from the same
/// snapshot always agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session: DailySession,
    pub weights: Vec<HourlyWeight>,
    pub advisors: Vec<Advisor>,
    /// Availability rows of every advisor in the session. Sparse:
    /// hours without a row default to active.
    pub availability: Vec<AdvisorAvailability>,
}

impl SessionSnapshot {
    pub fn new(
        session: DailySession,
        weights: Vec<HourlyWeight>,
        advisors: Vec<Advisor>,
        availability: Vec<AdvisorAvailability>,
    ) -> Self {
        SessionSnapshot {
            session,
            weights,
            advisors,
            availability,
        }
    }

    /// Operating window the computations iterate over.
    pub fn window(&self) -> BusinessWindow {
        self.session.window()
    }

    /// Weight percentage configured for an hour, 0 if no row exists.
    pub fn weight_for(&self, hour: i32) -> f64 {
        self.weights
            .iter()
            .find(|w| w.hour_start == hour)
            .map(|w| w.percentage)
            .unwrap_or(0.0)
    }

    /// Store-level goal for one hour.
    pub fn hourly_store_goal(&self, hour: i32) -> f64 {
        self.session.total_daily_goal * self.weight_for(hour) / 100.0
    }

    /// Stored availability override for `(advisor, hour)`, if any.
    pub fn availability_override(&self, advisor_id: AdvisorId, hour: i32) -> Option<bool> {
        self.availability
            .iter()
            .find(|a| a.advisor_id == advisor_id && a.hour_start == hour)
            .map(|a| a.is_active)
    }

    /// Whether an advisor counts as active for an hour.
    ///
    /// The default-active rule lives here and only here: an advisor
    /// with no override row is active for every hour, including hours
    /// added to the window after the advisor was created.
    pub fn is_active(&self, advisor_id: AdvisorId, hour: i32) -> bool {
        self.availability_override(advisor_id, hour).unwrap_or(true)
    }

    /// Number of advisors in the session active during an hour.
    ///
    /// Counts the whole roster, not just the advisor whose goal is
    /// being computed.
    pub fn active_count(&self, hour: i32) -> usize {
        self.advisors
            .iter()
            .filter(|a| self.is_active(a.id, hour))
            .count()
    }

    /// One advisor's computed daily goal.
    ///
    /// Sums the advisor's equal-split share of each in-window hour's
    /// store goal. Hours where the advisor is off, and hours with no
    /// active advisor at all, contribute 0.
    pub fn personal_goal(&self, advisor_id: AdvisorId) -> f64 {
        let window = self.window();
        self.weights
            .iter()
            .filter(|w| window.contains(w.hour_start))
            .map(|w| self.advisor_share(advisor_id, w.hour_start))
            .sum()
    }

    /// Store goal accumulated over in-window hours up to and including
    /// `upto_hour`.
    ///
    /// A pure store-level figure: availability plays no part. For
    /// non-negative weights the curve is non-decreasing in `upto_hour`.
    pub fn cumulative_store_goal(&self, upto_hour: i32) -> f64 {
        let window = self.window();
        window
            .hours()
            .filter(|&h| h <= upto_hour)
            .map(|h| self.hourly_store_goal(h))
            .sum()
    }

    /// Store goal summed over the whole window.
    pub fn store_goal_total(&self) -> f64 {
        self.cumulative_store_goal(self.window().end_hour())
    }

    /// Per-hour breakdown of one advisor's goal.
    ///
    /// One row per window hour, whether or not a weight is configured,
    /// so consumers can render the full day.
    pub fn hourly_breakdown(&self, advisor_id: AdvisorId) -> Vec<HourlyShare> {
        self.window()
            .hours()
            .map(|hour| HourlyShare {
                hour,
                percentage: self.weight_for(hour),
                store_goal: self.hourly_store_goal(hour),
                active_count: self.active_count(hour),
                is_active: self.is_active(advisor_id, hour),
                share: self.advisor_share(advisor_id, hour),
            })
            .collect()
    }

    /// One advisor's slice of one hour's store goal.
    ///
    /// The zero-active case short-circuits before the division, so a
    /// fully-off hour yields 0 rather than NaN.
    fn advisor_share(&self, advisor_id: AdvisorId, hour: i32) -> f64 {
        if !self.window().contains(hour) {
            return 0.0;
        }
        let active = self.active_count(hour);
        if active == 0 || !self.is_active(advisor_id, hour) {
            return 0.0;
        }
        self.hourly_store_goal(hour) / active as f64
    }
}
