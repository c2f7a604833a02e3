//! Advisor roster and hourly availability records.

use serde::{Deserialize, Serialize};

use crate::api::{AccessToken, AdvisorId, SessionId};

/// Sales staff member attached to one session's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisor {
    pub id: AdvisorId,
    pub session_id: SessionId,
    /// Display name, unique within a session (case-insensitive).
    pub name: String,
    /// Opaque identifier embedded in the advisor's personal link.
    /// Possession of the token is the only credential for self-service.
    pub access_token: AccessToken,
    /// Cumulative sales the advisor has reported, in currency units.
    pub total_sales: f64,
    /// Cumulative transaction count the advisor has reported.
    pub tickets_count: i64,
}

/// Per-hour availability override for one advisor.
///
/// Records exist only for hours an admin has touched; an absent record
/// means the advisor is active for that hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorAvailability {
    pub advisor_id: AdvisorId,
    /// Hour of day (0-23) the override applies to.
    pub hour_start: i32,
    pub is_active: bool,
}
