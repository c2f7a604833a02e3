//! Store-level hourly performance records.

use serde::{Deserialize, Serialize};

use crate::api::SessionId;

/// Figures recorded for one hour of one session, keyed by
/// `(session_id, hour)`.
///
/// Traffic and tickets are counts; the sales fields are currency
/// amounts. Derived ratios (conversion, growth, average ticket) are
/// computed on read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreHourlyMetric {
    pub session_id: SessionId,
    /// Hour of day (0-23) the figures cover.
    pub hour: i32,
    /// Visitors entering the store during the hour.
    pub traffic: i64,
    /// Transactions rung up during the hour.
    pub tickets: i64,
    /// Sales for the same hour one year earlier.
    pub last_year_sales: f64,
    /// Sales recorded so far for the hour.
    pub current_sales: f64,
}

impl StoreHourlyMetric {
    /// Empty record for an hour nothing has been captured for yet.
    pub fn empty(session_id: SessionId, hour: i32) -> Self {
        StoreHourlyMetric {
            session_id,
            hour,
            traffic: 0,
            tickets: 0,
            last_year_sales: 0.0,
            current_sales: 0.0,
        }
    }
}
