use serde::{Deserialize, Serialize};

use crate::api::AdvisorId;
use crate::models::{Advisor, AdvisorAvailability, DailySession, HourlyWeight};

// =========================================================
// Advisor self-service view types
// =========================================================

/// Everything needed to render one advisor's day, assembled from a
/// token lookup.
///
/// Carries the whole session roster because personal goals depend on
/// how many colleagues are active each hour. This is the service-layer
/// bundle; HTTP responses use [`AdvisorViewData`], which strips other
/// advisors' tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorContext {
    pub advisor: Advisor,
    pub session: DailySession,
    pub weights: Vec<HourlyWeight>,
    /// The requesting advisor's own availability rows.
    pub availability: Vec<AdvisorAvailability>,
    pub all_advisors: Vec<Advisor>,
    pub all_availability: Vec<AdvisorAvailability>,
}

/// Roster entry safe to show to any token holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorSummary {
    pub id: AdvisorId,
    pub name: String,
    pub total_sales: f64,
    pub tickets_count: i64,
}

impl From<&Advisor> for AdvisorSummary {
    fn from(advisor: &Advisor) -> Self {
        AdvisorSummary {
            id: advisor.id,
            name: advisor.name.clone(),
            total_sales: advisor.total_sales,
            tickets_count: advisor.tickets_count,
        }
    }
}

/// One hour of an advisor's goal breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyShare {
    pub hour: i32,
    /// Weight percentage configured for the hour (0 if none).
    pub percentage: f64,
    /// Store-level goal for the hour.
    pub store_goal: f64,
    /// Number of advisors active during the hour.
    pub active_count: usize,
    /// Whether this advisor is active during the hour.
    pub is_active: bool,
    /// This advisor's slice of the hour's store goal.
    pub share: f64,
}

/// Aggregated progress figures for one advisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorProgress {
    pub personal_goal: f64,
    pub total_sales: f64,
    pub tickets_count: i64,
    pub compliance_pct: f64,
    pub remaining: f64,
    pub average_ticket: f64,
    pub hourly: Vec<HourlyShare>,
}

/// HTTP payload for the advisor self-service page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorViewData {
    /// The requesting advisor's own record, token included.
    pub advisor: Advisor,
    pub session: DailySession,
    pub progress: AdvisorProgress,
    pub team: Vec<AdvisorSummary>,
}

/// Route function name constant for the advisor view
pub const GET_ADVISOR_CONTEXT: &str = "get_advisor_context";
