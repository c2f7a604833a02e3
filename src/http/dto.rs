//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies live here; response types are mostly re-exported from
//! the routes module since they already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Advisor self-service view
    AdvisorProgress, AdvisorSummary, AdvisorViewData, HourlyShare,
    // Dashboard
    AdvisorGoalRow, DashboardData,
    // Metrics table
    HourlyMetricRow, MetricsTableData, StoreTotals,
    // Reports
    AdminReport, AdminReportRow, AdvisorReport, ReportTotals,
};
pub use crate::models::{
    Advisor, AdvisorAvailability, DailySession, HourlyWeight, SessionTemplate, StoreHourlyMetric,
    WeightEntry,
};
pub use crate::services::validation::ConfigWarning;

/// Response for the health check endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status ("ok")
    pub status: String,
    /// API version
    pub version: String,
    /// Storage backend status
    pub database: String,
}

/// Request body for updating a session's daily goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    pub total_daily_goal: f64,
}

/// Request body for updating a session's operating hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateHoursRequest {
    pub start_hour: i32,
    pub end_hour: i32,
}

/// Request body for upserting weight rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertWeightsRequest {
    pub weights: Vec<WeightEntry>,
}

/// Response for a weight save: the stored rows plus any configuration
/// warnings the save surfaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsResponse {
    pub weights: Vec<HourlyWeight>,
    pub warnings: Vec<ConfigWarning>,
}

/// Request body for adding an advisor to the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdvisorRequest {
    pub name: String,
}

/// Request body for toggling one availability slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub hour_start: i32,
    pub is_active: bool,
}

/// Request body for saving store metric rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetricsRequest {
    pub rows: Vec<StoreHourlyMetric>,
}

/// Request body for saving a session's configuration as a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
}

/// Request body for applying a template to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyTemplateRequest {
    pub template_id: i64,
}

/// Request body for an advisor's sales self-report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSalesRequest {
    pub total_sales: f64,
    pub tickets_count: i64,
}
